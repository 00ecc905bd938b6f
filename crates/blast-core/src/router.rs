//! Command routing
//!
//! The router turns one decoded message into exactly one action. Resolution
//! happens in two stages: the device lookup (unknown host or non-remote
//! device drops the message), then the branch decision in [`route`], which
//! is a pure function of the (command, action, stored-file) triple so the
//! precedence table can be tested exhaustively.
//!
//! Precedence, first match wins:
//!
//! 1. command `macro`            → run the macro named by the action
//! 2. action empty / `auto`      → replay the default signal if stored, else learn IR
//! 3. action `autorf`            → as above with RF learning
//! 4. stored file at the literal (command, action) path → replay it
//! 5. action `record`            → learn IR unconditionally
//! 6. action `recordrf`          → learn RF unconditionally
//! 7. action `replay`            → replay the default signal, failing if absent
//! 8. action `macro`             → run the macro named by the command
//! 9. otherwise                  → unrecognized, dropped
//!
//! Branch 4 sitting above the keyword branches means a stored signal whose
//! action is literally `record` shadows the `record` keyword.

use blast_device::Blaster;
use tracing::{debug, error, warn};

use crate::error::CommandError;
use crate::learn::LearningSession;
use crate::message::CommandMessage;
use crate::registry::DeviceRegistry;
use crate::script::MacroPlayer;
use crate::store::SignalStore;

/// The branch selected for a (command, action) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Run a macro script
    Macro {
        /// Name of the script under `macros/`
        name: String,
    },
    /// Replay the default signal if stored, otherwise record it
    AutoDetect {
        /// Use the RF learning protocol when recording
        rf: bool,
    },
    /// Replay the signal stored at the literal (command, action) path
    ReplayStored,
    /// Record unconditionally onto the default path
    Record {
        /// Use the RF learning protocol
        rf: bool,
    },
    /// Replay the default signal, failing if absent
    Replay,
    /// No branch matched
    Unrecognized,
}

/// Decide what a (command, action) pair means
///
/// `has_stored` is whether a signal file exists at the literal
/// (command, action) path. Pure and total: every input maps to exactly one
/// branch.
pub fn route(command: &str, action: &str, has_stored: bool) -> Route {
    if command == "macro" {
        return Route::Macro {
            name: action.to_string(),
        };
    }

    match action {
        "" | "auto" => Route::AutoDetect { rf: false },
        "autorf" => Route::AutoDetect { rf: true },
        _ if has_stored => Route::ReplayStored,
        "record" => Route::Record { rf: false },
        "recordrf" => Route::Record { rf: true },
        "replay" => Route::Replay,
        "macro" => Route::Macro {
            name: command.to_string(),
        },
        _ => Route::Unrecognized,
    }
}

/// What dispatching a message amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The selected branch ran to completion
    Completed,
    /// The message was dropped before any branch ran
    Dropped,
    /// The selected branch failed; the error was logged
    Failed,
}

/// Replay a stored signal through a device
pub(crate) async fn replay(
    device: &dyn Blaster,
    store: &SignalStore,
    command: &str,
    action: &str,
) -> Result<(), CommandError> {
    let packet = store.read(command, action)?;
    debug!("replaying {} bytes for {:?}", packet.len(), command);
    device.send_data(&packet).await?;
    Ok(())
}

/// Top-level dispatcher for inbound command messages
pub struct CommandRouter {
    registry: DeviceRegistry,
    store: SignalStore,
}

impl CommandRouter {
    /// Create a router over a built registry and signal store
    pub fn new(registry: DeviceRegistry, store: SignalStore) -> Self {
        Self { registry, store }
    }

    /// The signal store this router dispatches against
    pub fn store(&self) -> &SignalStore {
        &self.store
    }

    /// Dispatch one message
    ///
    /// Every failure is handled here: logged and reported in the outcome,
    /// never propagated to the bus connection.
    pub async fn dispatch(&self, msg: &CommandMessage) -> DispatchOutcome {
        match self.run(msg).await {
            Ok(()) => DispatchOutcome::Completed,
            Err(err @ CommandError::DeviceNotFound(_)) => {
                warn!("{}, dropping message", err);
                DispatchOutcome::Dropped
            }
            Err(err @ CommandError::UnsupportedDevice(_)) => {
                debug!("{}, ignoring message", err);
                DispatchOutcome::Dropped
            }
            Err(err @ CommandError::Unrecognized { .. }) => {
                warn!("{}", err);
                DispatchOutcome::Dropped
            }
            Err(err) => {
                error!("error handling command {:?}: {}", msg.command, err);
                DispatchOutcome::Failed
            }
        }
    }

    async fn run(&self, msg: &CommandMessage) -> Result<(), CommandError> {
        let device = self
            .registry
            .get(&msg.host)
            .ok_or_else(|| CommandError::DeviceNotFound(msg.host.clone()))?
            .as_ref();

        let info = device.info();
        if !info.kind.is_remote() {
            return Err(CommandError::UnsupportedDevice(info.kind));
        }

        debug!(
            "command received for {}: {:?} -> {:?}",
            info, msg.command, msg.action
        );

        let has_stored = self.store.has(&msg.command, &msg.action);
        match route(&msg.command, &msg.action, has_stored) {
            Route::Macro { name } => MacroPlayer::new(device, &self.store).run(&name).await,
            Route::AutoDetect { rf } => {
                if self.store.has(&msg.command, "") {
                    replay(device, &self.store, &msg.command, "").await
                } else {
                    let session = LearningSession::new(device, &self.store);
                    if rf {
                        session.record_rf(&msg.command, "").await?;
                    } else {
                        session.record_ir(&msg.command, "").await?;
                    }
                    Ok(())
                }
            }
            Route::ReplayStored => replay(device, &self.store, &msg.command, &msg.action).await,
            Route::Record { rf } => {
                let session = LearningSession::new(device, &self.store);
                if rf {
                    session.record_rf(&msg.command, "").await?;
                } else {
                    session.record_ir(&msg.command, "").await?;
                }
                Ok(())
            }
            Route::Replay => replay(device, &self.store, &msg.command, "").await,
            Route::Unrecognized => Err(CommandError::Unrecognized {
                command: msg.command.clone(),
                action: msg.action.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macro_command_wins_over_everything() {
        assert_eq!(
            route("macro", "evening", false),
            Route::Macro {
                name: "evening".to_string()
            }
        );
        // Even over keyword actions and stored files
        assert_eq!(
            route("macro", "record", true),
            Route::Macro {
                name: "record".to_string()
            }
        );
    }

    #[test]
    fn empty_and_auto_actions_auto_detect() {
        assert_eq!(route("tv_power", "", false), Route::AutoDetect { rf: false });
        assert_eq!(
            route("tv_power", "auto", true),
            Route::AutoDetect { rf: false }
        );
        assert_eq!(
            route("fan_toggle", "autorf", false),
            Route::AutoDetect { rf: true }
        );
    }

    #[test]
    fn stored_file_shadows_keyword_actions() {
        assert_eq!(route("tv_power", "record", true), Route::ReplayStored);
        assert_eq!(route("tv_power", "recordrf", true), Route::ReplayStored);
        assert_eq!(route("tv_power", "replay", true), Route::ReplayStored);
        assert_eq!(route("tv_power", "macro", true), Route::ReplayStored);
    }

    #[test]
    fn keyword_actions_apply_without_a_stored_file() {
        assert_eq!(route("tv_power", "record", false), Route::Record { rf: false });
        assert_eq!(
            route("tv_power", "recordrf", false),
            Route::Record { rf: true }
        );
        assert_eq!(route("tv_power", "replay", false), Route::Replay);
        assert_eq!(
            route("tv_power", "macro", false),
            Route::Macro {
                name: "tv_power".to_string()
            }
        );
    }

    #[test]
    fn named_action_replays_when_stored() {
        assert_eq!(route("tv_power", "on", true), Route::ReplayStored);
    }

    #[test]
    fn named_action_without_file_is_unrecognized() {
        assert_eq!(route("lights", "zzz", false), Route::Unrecognized);
    }
}
