//! Error taxonomy shared by the parser and the client.

use thiserror::Error;

pub type Result<T, E = PattonError> = std::result::Result<T, E>;

/// Errors surfaced by Patton client operations.
#[derive(Error, Debug)]
pub enum PattonError {
    /// The query is not a string or a list of strings, or it holds no items.
    #[error("Invalid input format: {0}")]
    InvalidFormat(String),

    /// Non-200 status, or a 200 body that is not the expected JSON shape.
    #[error("Server error: {detail}")]
    ServerResponse { status: u16, detail: String },

    #[error("Can't connect to Patton server: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("Patton session has already been closed")]
    SessionClosed,

    /// The HTTP session or a request could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),
}

impl PattonError {
    pub fn invalid_format(message: impl Into<String>) -> Self {
        PattonError::InvalidFormat(message.into())
    }

    /// Whether the error came from the transport rather than from the server.
    pub fn is_connection(&self) -> bool {
        matches!(self, PattonError::Connection(_))
    }

    /// Raw response detail for server-side failures.
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            PattonError::ServerResponse { detail, .. } => Some(detail),
            _ => None,
        }
    }
}
