//! Error types for the request pipeline.
//!
//! Parsing and serialization each have their own error enum. The connection
//! handler wraps everything into [`Error`] so a single `?` chain can carry a
//! failure from any stage up to the point where it is logged.

use thiserror::Error;

/// Failures while turning raw bytes into a [`Request`](crate::http::request::Request).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed request line")]
    MalformedRequestLine,

    #[error("missing blank line between headers and body")]
    MissingHeaderBodySeparator,

    #[error("malformed header line: {0:?}")]
    MalformedHeader(String),

    #[error("malformed cookie pair: {0:?}")]
    MalformedCookie(String),
}

/// Failures while turning a response into bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SerializeError {
    #[error("unknown status code {0}")]
    UnknownStatusCode(u16),
}

/// Anything that can abort a single connection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("serialize error: {0}")]
    Serialize(#[from] SerializeError),

    #[error("socket I/O error: {0}")]
    SocketIo(#[from] std::io::Error),

    #[error("handler failed: {0:#}")]
    Handler(#[from] anyhow::Error),

    #[error("handler task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}
