pub mod config;
pub mod encoding;
pub mod error;
pub mod request;
pub mod response;
pub mod router;
pub mod routes;
pub mod server;
pub mod store;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeaderName(String);

impl HeaderName {
    pub fn from_str(src: &str) -> Self {
        Self(src.to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ordered header list. Insertion order is wire order and duplicate names
/// are kept; lookups return the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(HeaderName, String)>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<V: Into<String>>(&mut self, name: HeaderName, value: V) {
        self.0.push((name, value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let name = HeaderName::from_str(name);
        self.0
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &str)> {
        self.0.iter().map(|(n, v)| (n, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        let mut headers = Headers::new();
        headers.push(HeaderName::from_str("Content-Type"), "text/plain");
        assert_eq!(headers.get("content-type"), Some("text/plain"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("text/plain"));
        assert_eq!(headers.get("content-length"), None);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let mut headers = Headers::new();
        headers.push(HeaderName::from_str("x-tag"), "first");
        headers.push(HeaderName::from_str("X-Tag"), "second");
        assert_eq!(headers.get("x-tag"), Some("first"));
        let values: Vec<_> = headers.iter().map(|(_, v)| v).collect();
        assert_eq!(values, ["first", "second"]);
    }
}
