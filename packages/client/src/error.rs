//! Error types for the terminal client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Gave up opening a connection after repeated handshake failures
    #[error("giving up after {attempts} connection attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    /// A non-retryable error ended the client
    #[error("connection aborted: {0}")]
    Aborted(String),
}
