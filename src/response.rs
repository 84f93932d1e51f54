use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::{HeaderName, Headers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: Status,
    headers: Headers,
    body: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    OK,
    Created,
    NotFound,
}

#[derive(Default)]
pub struct Builder {
    status: Status,
    headers: Headers,
}

impl Response {
    pub fn builder() -> Builder {
        Default::default()
    }

    pub fn not_found() -> Self {
        Self::builder().with_status(Status::NotFound).with_body(Vec::new())
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub(crate) fn push_header<V: Into<String>>(&mut self, name: &str, value: V) {
        self.headers.push(HeaderName::from_str(name), value);
    }

    pub(crate) fn replace_body(&mut self, body: Vec<u8>) {
        self.body = body;
    }

    pub async fn try_write_to<W: AsyncWrite + Unpin>(self, mut dest: W) -> std::io::Result<()> {
        dest.write_all(&self.into_bytes()).await?;
        dest.flush().await
    }

    /// Serializes the response. `content-length` is appended after the
    /// stored headers and always matches the final body.
    pub fn into_bytes(self) -> Vec<u8> {
        let first_line = format!("HTTP/1.1 {}\r\n", self.status.as_str());
        let headers = self
            .headers
            .iter()
            .map(|(hn, hv)| format!("{}: {}\r\n", hn.as_str(), hv))
            .collect::<String>();
        let content_length = format!("content-length: {}\r\n", self.body.len());

        let complete_header = first_line + &headers + &content_length + "\r\n";

        let mut result = complete_header.into_bytes();
        result.extend_from_slice(&self.body);
        result
    }
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Self::OK => 200,
            Self::Created => 201,
            Self::NotFound => 404,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OK => "200 OK",
            Self::Created => "201 Created",
            Self::NotFound => "404 Not Found",
        }
    }
}

impl Builder {
    pub fn with_status(&mut self, status: Status) -> &mut Self {
        self.status = status;
        self
    }

    pub fn as_text(&mut self) -> &mut Self {
        self.with_header("content-type", "text/plain")
    }

    pub fn as_octet_stream(&mut self) -> &mut Self {
        self.with_header("content-type", "application/octet-stream")
    }

    pub fn with_header<N: AsRef<str>, V: Into<String>>(&mut self, name: N, value: V) -> &mut Self {
        let name = HeaderName::from_str(name.as_ref());
        debug_assert_ne!(name.as_str(), "content-length", "content-length is computed on write");
        self.headers.push(name, value);
        self
    }

    pub fn with_body<B: Into<Vec<u8>>>(&mut self, body: B) -> Response {
        Response {
            status: self.status,
            headers: self.headers.clone(),
            body: body.into(),
        }
    }
}
