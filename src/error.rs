use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("expected 3 parts in request line, got {0:?}")]
    MalformedRequestLine(Vec<String>),

    #[error("request fills the whole {limit} byte read buffer")]
    OversizedRequest { limit: usize },

    #[error("expected `name: value` header, got {0:?}")]
    MalformedHeader(String),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0} header not found")]
    MissingHeader(&'static str),

    #[error("no path segment to extract from target {0:?}")]
    MalformedTarget(String),

    #[error("invalid method {0}")]
    UnsupportedMethod(String),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Everything that can end a connection early. None of these are answered
/// with a response; the connection is logged and closed.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("error parsing request: {0}")]
    Parse(#[from] ParseError),

    #[error("error handling request: {0}")]
    Handler(#[from] HandlerError),

    #[error("error encoding response body: {0}")]
    Encoding(#[source] io::Error),

    #[error("error writing response to connection: {0}")]
    Write(#[source] io::Error),
}
