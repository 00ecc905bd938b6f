//! Macro scripts
//!
//! A macro is a plain-text file of steps executed strictly in order:
//!
//! ```text
//! # evening wind-down
//! tv_power
//! pause 500
//! amp_power
//! ```
//!
//! Blank lines and `#` comments are skipped. `pause <ms>` blocks the
//! dispatch task; any other line replays that command's default-action
//! signal directly, without re-entering dispatch (macros cannot invoke
//! macros). Lines are interpreted one at a time as execution reaches them,
//! so a malformed line aborts the run at that point with everything before
//! it already executed.

use std::time::Duration;

use blast_device::Blaster;
use tracing::debug;

use crate::error::CommandError;
use crate::router::replay;
use crate::store::SignalStore;

/// One executable step of a macro script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacroStep {
    /// Block for this many milliseconds
    Pause(u64),
    /// Replay the named command's default-action signal
    Replay(String),
}

impl MacroStep {
    /// Interpret a single script line
    ///
    /// Returns `Ok(None)` for blank lines and comments. `line` is 1-based
    /// and only used for error reporting.
    pub fn parse(line: usize, raw: &str) -> Result<Option<Self>, CommandError> {
        let text = raw.trim_matches([' ', '\t', '\r', '\n']);
        if text.is_empty() || text.starts_with('#') {
            return Ok(None);
        }

        if let Some(rest) = text.strip_prefix("pause ") {
            let value = rest.trim();
            let ms = value.parse().map_err(|_| CommandError::InvalidPause {
                line,
                value: value.to_string(),
            })?;
            return Ok(Some(MacroStep::Pause(ms)));
        }

        Ok(Some(MacroStep::Replay(text.to_string())))
    }
}

/// Executes macro scripts against one device
pub struct MacroPlayer<'a> {
    device: &'a dyn Blaster,
    store: &'a SignalStore,
}

impl<'a> MacroPlayer<'a> {
    /// Create a player for a device and the store scripts and signals live in
    pub fn new(device: &'a dyn Blaster, store: &'a SignalStore) -> Self {
        Self { device, store }
    }

    /// Run the named macro to completion or first failure
    ///
    /// The script is read fresh from disk. A failing step (missing signal,
    /// malformed pause, transport error) aborts all remaining steps.
    pub async fn run(&self, name: &str) -> Result<(), CommandError> {
        debug!("replaying macro {:?}", name);
        let script = self.store.read_macro(name)?;

        for (idx, raw) in script.lines().enumerate() {
            match MacroStep::parse(idx + 1, raw)? {
                None => {}
                Some(MacroStep::Pause(ms)) => {
                    debug!("pausing for {} ms", ms);
                    tokio::time::sleep(Duration::from_millis(ms)).await;
                }
                Some(MacroStep::Replay(command)) => {
                    replay(self.device, self.store, &command, "").await?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(MacroStep::parse(1, "").unwrap(), None);
        assert_eq!(MacroStep::parse(2, "   \t").unwrap(), None);
        assert_eq!(MacroStep::parse(3, "# lights out").unwrap(), None);
        assert_eq!(MacroStep::parse(4, "  # indented comment").unwrap(), None);
    }

    #[test]
    fn pause_lines_carry_milliseconds() {
        assert_eq!(
            MacroStep::parse(1, "pause 500").unwrap(),
            Some(MacroStep::Pause(500))
        );
        assert_eq!(
            MacroStep::parse(1, "pause  1500 ").unwrap(),
            Some(MacroStep::Pause(1500))
        );
    }

    #[test]
    fn other_lines_are_command_references() {
        assert_eq!(
            MacroStep::parse(1, "tv_power").unwrap(),
            Some(MacroStep::Replay("tv_power".to_string()))
        );
        // No space after the keyword means it is just a command name
        assert_eq!(
            MacroStep::parse(1, "pause").unwrap(),
            Some(MacroStep::Replay("pause".to_string()))
        );
    }

    #[test]
    fn malformed_pause_reports_its_line() {
        let err = MacroStep::parse(3, "pause soon").unwrap_err();
        assert!(matches!(
            err,
            CommandError::InvalidPause { line: 3, ref value } if value == "soon"
        ));
    }
}
