//! Inbound command messages
//!
//! The bus delivers JSON payloads of the shape
//! `{"host": "...", "command": "...", "action": "..."}` where `action` is
//! optional. Command and action values become path components under the
//! signal directory, so values that could escape it are rejected here,
//! before any dispatch decision is made.

use serde::Deserialize;

use crate::error::DecodeError;

/// A decoded command message from the bus
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandMessage {
    /// Host address of the target device
    pub host: String,
    /// Command name (signal directory key, or the `macro` keyword)
    pub command: String,
    /// Action qualifier; empty when the message omits it
    #[serde(default)]
    pub action: String,
}

impl CommandMessage {
    /// Decode and validate a raw bus payload
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        let msg: Self = serde_json::from_slice(payload)?;
        validate_name("command", &msg.command, false)?;
        validate_name("action", &msg.action, true)?;
        Ok(msg)
    }
}

/// Reject names that would resolve outside the signal directory.
///
/// Path separators and dot-prefixed components are the only way a name can
/// escape `commands/` or `macros/`, since names are used as single path
/// components.
fn validate_name(field: &'static str, value: &str, allow_empty: bool) -> Result<(), DecodeError> {
    let escapes = value.contains(['/', '\\']) || value.starts_with('.');
    if escapes || (value.is_empty() && !allow_empty) {
        return Err(DecodeError::InvalidName {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
