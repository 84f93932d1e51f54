use std::io::{self, Write};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::{debug, trace};

use crate::request::Request;
use crate::response::Response;

/// Content codings the server can apply to a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Gzip,
}

impl ContentEncoding {
    /// Picks an encoding from an `Accept-Encoding` value.
    ///
    /// Tokens are only trimmed and compared exactly: `gzip;q=0` and `*` are
    /// not recognised, and `GZIP` does not match.
    pub fn select(accept_encoding: &str) -> Option<Self> {
        accept_encoding
            .split(',')
            .any(|token| token.trim() == "gzip")
            .then_some(Self::Gzip)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
        }
    }

    pub fn encode(self, data: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            Self::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(data)?;
                encoder.finish()
            }
        }
    }
}

/// Compresses the response body if the request allows it and records the
/// coding in `content-encoding`. Must run once, after the handler.
pub fn negotiate(req: &Request, resp: &mut Response) -> io::Result<()> {
    let Some(accept) = req.header("accept-encoding") else {
        return Ok(());
    };
    let Some(encoding) = ContentEncoding::select(accept) else {
        trace!(accept, "no supported encoding accepted.");
        return Ok(());
    };

    let encoded = encoding.encode(resp.body())?;
    debug!(
        encoding = encoding.name(),
        from = resp.body().len(),
        to = encoded.len(),
        "encoded response body."
    );
    resp.push_header("content-encoding", encoding.name());
    resp.replace_body(encoded);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::io::Read;

    use flate2::read::GzDecoder;

    use super::*;

    fn gunzip(data: &[u8]) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        GzDecoder::new(data).read_to_end(&mut out)?;
        Ok(out)
    }

    #[test]
    fn test_select() {
        assert_eq!(ContentEncoding::select("gzip"), Some(ContentEncoding::Gzip));
        assert_eq!(
            ContentEncoding::select("deflate,  gzip ,br"),
            Some(ContentEncoding::Gzip)
        );
        assert_eq!(ContentEncoding::select("deflate, br"), None);
        assert_eq!(ContentEncoding::select("invalid-encoding"), None);
        assert_eq!(ContentEncoding::select(""), None);
    }

    #[test]
    fn test_select_is_a_plain_token_match() {
        // quality values and wildcards are not understood
        assert_eq!(ContentEncoding::select("gzip;q=0"), None);
        assert_eq!(ContentEncoding::select("*"), None);
        assert_eq!(ContentEncoding::select("GZIP"), None);
    }

    #[test]
    fn test_negotiate_gzip() -> Result<(), Box<dyn Error>> {
        let req = Request::parse(b"GET /echo/abc HTTP/1.1\r\nAccept-Encoding: gzip\r\n\r\n")?;
        let mut resp = Response::builder().as_text().with_body("abc");
        negotiate(&req, &mut resp)?;

        assert_eq!(resp.headers().get("Content-Encoding"), Some("gzip"));
        assert_eq!(resp.headers().get("content-type"), Some("text/plain"));
        assert_eq!(gunzip(resp.body())?, b"abc");

        let wire = resp.clone().into_bytes();
        let length = format!("content-length: {}\r\n", resp.body().len());
        assert!(wire.windows(length.len()).any(|w| w == length.as_bytes()));
        assert!(wire.ends_with(resp.body()));
        Ok(())
    }

    #[test]
    fn test_negotiate_without_gzip() -> Result<(), Box<dyn Error>> {
        for raw in [
            &b"GET / HTTP/1.1\r\n\r\n"[..],
            &b"GET / HTTP/1.1\r\nAccept-Encoding: deflate, br\r\n\r\n"[..],
        ] {
            let req = Request::parse(raw)?;
            let mut resp = Response::builder().with_body("abc");
            negotiate(&req, &mut resp)?;
            assert_eq!(resp.body(), b"abc");
            assert_eq!(resp.headers().get("content-encoding"), None);
        }
        Ok(())
    }

    #[test]
    fn test_gzip_empty_body() -> Result<(), Box<dyn Error>> {
        let encoded = ContentEncoding::Gzip.encode(b"")?;
        assert!(!encoded.is_empty());
        assert!(gunzip(&encoded)?.is_empty());
        Ok(())
    }
}
