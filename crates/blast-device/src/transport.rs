//! Transport and discovery boundaries
//!
//! Real hardware speaks an encrypted UDP protocol; simulated devices live in
//! memory. Both sides of that divide implement [`Blaster`], and everything
//! above this crate is written against the trait.
//!
//! The learning-related calls mirror the hardware's capture state machine:
//! [`enter_learning`](Blaster::enter_learning) arms IR capture, the RF path
//! goes through [`sweep_frequency`](Blaster::sweep_frequency) /
//! [`check_frequency`](Blaster::check_frequency) /
//! [`find_rf_packet`](Blaster::find_rf_packet), and in both cases
//! [`check_data`](Blaster::check_data) polls for the captured packet.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::model::DeviceInfo;

/// An authenticated handle to an IR/RF blaster device
#[async_trait]
pub trait Blaster: Send + Sync {
    /// Identity of the device behind this handle
    fn info(&self) -> &DeviceInfo;

    /// Put the device into IR learning mode
    async fn enter_learning(&self) -> Result<(), TransportError>;

    /// Poll for a captured packet
    ///
    /// Returns `Ok(None)` while nothing has been captured yet. Used by both
    /// the IR and RF learning sequences.
    async fn check_data(&self) -> Result<Option<Vec<u8>>, TransportError>;

    /// Start an RF frequency sweep
    async fn sweep_frequency(&self) -> Result<(), TransportError>;

    /// Poll whether the frequency sweep has locked on
    async fn check_frequency(&self) -> Result<bool, TransportError>;

    /// Abort an RF frequency sweep
    async fn cancel_sweep_frequency(&self) -> Result<(), TransportError>;

    /// Ask the device to capture an RF packet on the locked frequency
    async fn find_rf_packet(&self) -> Result<(), TransportError>;

    /// Transmit a previously captured packet
    async fn send_data(&self, packet: &[u8]) -> Result<(), TransportError>;
}

/// Discovery and authentication of devices by host address
///
/// One implementation exists per transport backend; the registry drives it
/// once at startup for every configured host.
#[async_trait]
pub trait Discovery: Send + Sync {
    /// Probe a host, perform the auth handshake, and return a usable handle
    async fn hello(&self, host: &str) -> Result<Arc<dyn Blaster>, TransportError>;
}
