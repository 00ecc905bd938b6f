//! Signal learning sessions
//!
//! Drives a device through its capture state machine with fixed retry
//! budgets. The attempt counts and sleep intervals below are part of the
//! engine's observable contract; both capture paths block the dispatch task
//! for their full duration, which is what serializes commands system-wide.
//!
//! IR capture: arm learning mode, then poll for the packet. RF capture is
//! two-phase: lock the frequency while the user holds the button, then
//! capture the packet on a single press.

use std::time::Duration;

use blast_device::Blaster;
use tracing::debug;

use crate::error::CommandError;
use crate::store::SignalStore;

/// Maximum data polls for an IR capture
pub const IR_POLL_ATTEMPTS: u32 = 8;
/// Sleep before each IR data poll
pub const IR_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Maximum frequency checks during an RF sweep
pub const RF_SWEEP_CHECKS: u32 = 20;
/// Interval between RF frequency checks
pub const RF_SWEEP_INTERVAL: Duration = Duration::from_secs(1);
/// Settle time between frequency lock and packet capture
pub const RF_SETTLE_DELAY: Duration = Duration::from_secs(5);
/// Maximum data polls for an RF capture
pub const RF_POLL_ATTEMPTS: u32 = 6;
/// Sleep before each RF data poll
pub const RF_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// A bounded-retry learning session against one device
pub struct LearningSession<'a> {
    device: &'a dyn Blaster,
    store: &'a SignalStore,
}

impl<'a> LearningSession<'a> {
    /// Create a session for a device and the store captures persist to
    pub fn new(device: &'a dyn Blaster, store: &'a SignalStore) -> Self {
        Self { device, store }
    }

    /// Capture an IR signal and persist it under (command, action)
    ///
    /// Transient per-poll errors are swallowed and count against the attempt
    /// budget; nothing is written unless a packet is captured.
    pub async fn record_ir(&self, command: &str, action: &str) -> Result<Vec<u8>, CommandError> {
        debug!("recording IR signal for {:?}, waiting for a button press", command);
        self.device.enter_learning().await?;

        let mut packet = None;
        for attempt in 1..=IR_POLL_ATTEMPTS {
            tokio::time::sleep(IR_POLL_INTERVAL).await;
            match self.device.check_data().await {
                Ok(Some(data)) => {
                    packet = Some(data);
                    break;
                }
                Ok(None) => {}
                Err(err) if err.is_transient() => {
                    debug!("poll {}/{} failed: {}", attempt, IR_POLL_ATTEMPTS, err);
                }
                Err(err) => return Err(err.into()),
            }
        }

        let Some(packet) = packet else {
            return Err(CommandError::CaptureTimeout {
                attempts: IR_POLL_ATTEMPTS,
            });
        };

        self.store.write(command, action, &packet)?;
        debug!("captured {} bytes for {:?}", packet.len(), command);
        Ok(packet)
    }

    /// Capture an RF signal and persist it under (command, action)
    ///
    /// Phase 1 sweeps for the frequency while the button is held; if the
    /// sweep never locks, it is cancelled and packet capture is not
    /// attempted. Phase 2 captures the packet on a single press.
    pub async fn record_rf(&self, command: &str, action: &str) -> Result<Vec<u8>, CommandError> {
        debug!("recording RF signal for {:?}, press and hold the button", command);
        self.device.sweep_frequency().await?;

        let mut locked = false;
        for _ in 0..RF_SWEEP_CHECKS {
            if self.device.check_frequency().await? {
                locked = true;
                break;
            }
            tokio::time::sleep(RF_SWEEP_INTERVAL).await;
        }

        if !locked {
            self.device.cancel_sweep_frequency().await?;
            return Err(CommandError::FrequencyTimeout {
                checks: RF_SWEEP_CHECKS,
            });
        }

        debug!("RF frequency locked, release and single press the button");
        tokio::time::sleep(RF_SETTLE_DELAY).await;
        self.device.find_rf_packet().await?;

        let mut packet = None;
        for _ in 0..RF_POLL_ATTEMPTS {
            tokio::time::sleep(RF_POLL_INTERVAL).await;
            if let Some(data) = self.device.check_data().await? {
                packet = Some(data);
                break;
            }
        }

        let Some(packet) = packet else {
            return Err(CommandError::CaptureTimeout {
                attempts: RF_POLL_ATTEMPTS,
            });
        };

        self.store.write(command, action, &packet)?;
        debug!("captured {} bytes for {:?}", packet.len(), command);
        Ok(packet)
    }
}
