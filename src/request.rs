use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

use crate::error::ParseError;
use crate::{HeaderName, Headers};

/// Capacity of the single read a request has to fit in.
pub const READ_BUF_SIZE: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: String,
    target: String,
    version: String,
    headers: Headers,
    body: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Other,
}

/// Performs exactly one read into `buf`.
///
/// A read that fills the whole buffer may have been cut short, and there is
/// no second read to pick up the rest, so it is rejected instead.
pub async fn read_bounded<R: AsyncRead + Unpin>(
    src: &mut R,
    buf: &mut [u8],
) -> Result<usize, ParseError> {
    let n = src.read(buf).await?;
    trace!(n, "read request bytes.");
    if n == buf.len() {
        return Err(ParseError::OversizedRequest { limit: buf.len() });
    }
    Ok(n)
}

impl Request {
    pub async fn try_parse_from<R: AsyncRead + Unpin>(mut src: R) -> Result<Self, ParseError> {
        let mut buf = [0; READ_BUF_SIZE];
        let n = read_bounded(&mut src, &mut buf).await?;
        Self::parse(&buf[..n])
    }

    /// Parses one complete message: request line, headers up to the first
    /// blank line, then a single body line.
    ///
    /// Only the request line and headers are decoded as text; the body keeps
    /// its raw bytes.
    pub fn parse(raw: &[u8]) -> Result<Self, ParseError> {
        let mut lines = raw.split(|&b| b == b'\n');

        let first_line = String::from_utf8_lossy(lines.next().unwrap_or_default());
        let request_line: Vec<&str> = first_line.split_whitespace().collect();
        let [method, target, version] = request_line.as_slice() else {
            let parts = request_line.iter().map(|s| s.to_string()).collect();
            return Err(ParseError::MalformedRequestLine(parts));
        };

        let mut headers = Headers::new();
        for line in lines.by_ref() {
            let line = String::from_utf8_lossy(line);
            let line = line.trim();
            if line.is_empty() {
                break;
            }
            let (name, value) = line
                .split_once(": ")
                .ok_or_else(|| ParseError::MalformedHeader(line.to_owned()))?;
            headers.push(HeaderName::from_str(name), value);
        }

        let body = lines.next().unwrap_or_default().to_vec();

        Ok(Self {
            method: method.to_string(),
            target: target.to_string(),
            version: version.to_string(),
            headers,
            body,
        })
    }

    pub fn method(&self) -> Method {
        Method::from_token(&self.method)
    }

    /// The method token exactly as it appeared on the request line.
    pub fn method_str(&self) -> &str {
        &self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

impl Method {
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            _ => Self::Other,
        }
    }
}
