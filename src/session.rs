//! The HTTP session shared by every request a client issues.

use std::time::Duration;

use patton_core::{PattonError, Result};
use reqwest::Client;
use tracing::debug;

/// Pooled HTTP connection context owned by exactly one `PattonClient`.
///
/// Released once, either by `close` or when dropped.
pub struct Session {
    client: Option<Client>,
}

impl Session {
    pub fn open(connect_timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build().map_err(PattonError::Client)?;
        debug!("HTTP session opened");
        Ok(Self::from_client(client))
    }

    /// Adopt an already-configured `reqwest::Client`.
    pub fn from_client(client: Client) -> Self {
        Self {
            client: Some(client),
        }
    }

    pub fn client(&self) -> Result<&Client> {
        self.client.as_ref().ok_or(PattonError::SessionClosed)
    }

    pub fn is_open(&self) -> bool {
        self.client.is_some()
    }

    /// Returns false when the session was already closed.
    pub fn close(&mut self) -> bool {
        match self.client.take() {
            Some(client) => {
                drop(client);
                debug!("HTTP session has been closed");
                true
            }
            None => false,
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.is_open() {
            debug!("HTTP session dropped without close_session, releasing it");
            self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_is_idempotent() {
        let mut session = Session::from_client(Client::new());
        assert!(session.is_open());
        assert!(session.close());
        assert!(!session.close());
        assert!(!session.is_open());
    }

    #[test]
    fn test_closed_session_has_no_client() {
        let mut session = Session::open(Some(Duration::from_secs(5))).unwrap();
        assert!(session.client().is_ok());
        session.close();
        assert!(matches!(session.client(), Err(PattonError::SessionClosed)));
    }
}
