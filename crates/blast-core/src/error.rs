//! Error types for the command engine

use std::path::PathBuf;

use blast_device::{DeviceKind, TransportError};
use thiserror::Error;

/// Errors decoding an inbound bus payload
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Payload is not valid JSON for the command schema
    #[error("invalid command payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A name field would escape the signal directory
    #[error("invalid {field} name {value:?}")]
    InvalidName {
        /// Which field was rejected
        field: &'static str,
        /// The offending value
        value: String,
    },
}

/// Errors reading or writing the signal directory
#[derive(Debug, Error)]
pub enum StoreError {
    /// No signal has been learned at this path
    #[error("no stored signal at {}", path.display())]
    NotFound {
        /// The path that was probed
        path: PathBuf,
    },

    /// Filesystem failure
    #[error("failed to access {}: {}", path.display(), source)]
    Io {
        /// The path being accessed
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },

    /// Stored file is not valid hex
    #[error("corrupt signal file {}: {}", path.display(), source)]
    Hex {
        /// The path that failed to decode
        path: PathBuf,
        /// The underlying error
        #[source]
        source: hex::FromHexError,
    },
}

impl StoreError {
    /// Whether this is the absent-signal case
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors raised while executing a single command
///
/// All of these are local to one message: the dispatcher logs them and moves
/// on, they never reach the bus connection.
#[derive(Debug, Error)]
pub enum CommandError {
    /// No device is registered for the addressed host
    #[error("no device registered for host {0:?}")]
    DeviceNotFound(String),

    /// The addressed device does not handle remote codes
    #[error("device kind {0} does not handle remote codes")]
    UnsupportedDevice(DeviceKind),

    /// No dispatch branch matched the (command, action) pair
    #[error("unrecognized command {command:?} with action {action:?}")]
    Unrecognized {
        /// Command name from the message
        command: String,
        /// Action from the message
        action: String,
    },

    /// Learning gave up waiting for a captured packet
    #[error("no packet captured after {attempts} polls")]
    CaptureTimeout {
        /// Number of polls that came back empty
        attempts: u32,
    },

    /// The RF frequency sweep never locked on
    #[error("RF frequency not found after {checks} checks")]
    FrequencyTimeout {
        /// Number of frequency checks performed
        checks: u32,
    },

    /// A macro `pause` line does not carry a valid duration
    #[error("invalid pause duration {value:?} on macro line {line}")]
    InvalidPause {
        /// 1-based line number in the script
        line: usize,
        /// The text that failed to parse
        value: String,
    },

    /// Signal directory failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Device transport failure
    #[error(transparent)]
    Transport(#[from] TransportError),
}
