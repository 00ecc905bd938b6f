//! Error types for device transport and discovery

use thiserror::Error;

/// Errors that can occur while talking to a blaster device
#[derive(Debug, Error)]
pub enum TransportError {
    /// Device reported a read failure while polling for a captured packet
    #[error("device read error: {0}")]
    Read(String),

    /// Device reported a storage failure for its capture buffer
    #[error("device storage error: {0}")]
    Storage(String),

    /// Authentication handshake failed
    #[error("authentication failed for {host}: {reason}")]
    Auth { host: String, reason: String },

    /// Malformed or unexpected response from the device
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    /// Whether a learning poll may swallow this error and retry.
    ///
    /// Only per-poll read and capture-buffer failures are retryable; auth,
    /// protocol and I/O failures end the session.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Read(_) | Self::Storage(_))
    }
}
