//! Simulated blaster device
//!
//! Capture outcomes are scripted by call-count thresholds: "the frequency
//! sweep locks on the Nth check", "the packet appears on the Nth data poll".
//! `None` thresholds mean the event never happens, which is how timeout
//! paths are exercised.

use std::sync::Mutex;

use async_trait::async_trait;
use blast_device::{Blaster, DeviceInfo, DeviceKind, MacAddr, TransportError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for a simulated blaster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimBlasterConfig {
    /// Host address the device answers on
    pub host: String,
    /// Hardware address
    pub mac: MacAddr,
    /// Model family tag
    pub kind: DeviceKind,
    /// Packet "captured" by a successful learning sequence
    pub packet: Vec<u8>,
    /// Data poll (1-based, counted per capture) on which the IR packet
    /// appears; `None` means learning never captures anything
    pub ir_packet_on_poll: Option<u32>,
    /// Number of leading data polls that fail with a transient read error
    pub ir_transient_errors: u32,
    /// Frequency check (1-based) on which the RF sweep locks; `None` means
    /// the sweep never finds a frequency
    pub rf_lock_on_check: Option<u32>,
    /// Data poll (1-based) on which the RF packet appears after
    /// `find_rf_packet`; `None` means it never appears
    pub rf_packet_on_poll: Option<u32>,
}

impl Default for SimBlasterConfig {
    fn default() -> Self {
        Self {
            host: "sim-blaster".to_string(),
            mac: MacAddr::default(),
            kind: DeviceKind::Rm4Pro,
            // Shaped like a short learned IR pulse train
            packet: vec![0x26, 0x00, 0x0a, 0x00, 0x0d, 0x1e, 0x0d, 0x1e],
            ir_packet_on_poll: Some(1),
            ir_transient_errors: 0,
            rf_lock_on_check: Some(1),
            rf_packet_on_poll: Some(1),
        }
    }
}

#[derive(Debug, Default)]
struct SimState {
    learning: bool,
    sweeping: bool,
    rf_capture: bool,
    data_polls: u32,
    freq_checks: u32,
    transient_left: u32,
    sent: Vec<Vec<u8>>,
    find_rf_invoked: bool,
    sweep_cancelled: bool,
}

/// A scripted in-memory blaster
#[derive(Debug)]
pub struct SimBlaster {
    info: DeviceInfo,
    config: SimBlasterConfig,
    state: Mutex<SimState>,
}

impl SimBlaster {
    /// Create a simulated device with default behavior
    pub fn new(host: impl Into<String>, kind: DeviceKind) -> Self {
        Self::from_config(SimBlasterConfig {
            host: host.into(),
            kind,
            ..Default::default()
        })
    }

    /// Create a simulated device from configuration
    pub fn from_config(config: SimBlasterConfig) -> Self {
        let info = DeviceInfo::new(config.host.clone(), config.mac, config.kind);
        Self {
            info,
            config,
            state: Mutex::new(SimState::default()),
        }
    }

    /// Packets transmitted through this device, oldest first
    pub fn sent_packets(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().sent.clone()
    }

    /// Whether the engine ever asked for RF packet capture
    pub fn find_rf_packet_invoked(&self) -> bool {
        self.state.lock().unwrap().find_rf_invoked
    }

    /// Whether an RF sweep was cancelled
    pub fn sweep_cancelled(&self) -> bool {
        self.state.lock().unwrap().sweep_cancelled
    }

    /// Number of data polls in the current (or last) capture
    pub fn data_poll_count(&self) -> u32 {
        self.state.lock().unwrap().data_polls
    }

    /// Number of frequency checks so far
    pub fn frequency_check_count(&self) -> u32 {
        self.state.lock().unwrap().freq_checks
    }
}

#[async_trait]
impl Blaster for SimBlaster {
    fn info(&self) -> &DeviceInfo {
        &self.info
    }

    async fn enter_learning(&self) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        state.learning = true;
        state.rf_capture = false;
        state.data_polls = 0;
        state.transient_left = self.config.ir_transient_errors;
        debug!("{} entered IR learning mode", self.info.host);
        Ok(())
    }

    async fn check_data(&self) -> Result<Option<Vec<u8>>, TransportError> {
        let mut state = self.state.lock().unwrap();
        if !state.learning && !state.rf_capture {
            return Err(TransportError::Protocol(
                "check_data outside a capture sequence".to_string(),
            ));
        }

        state.data_polls += 1;
        if state.transient_left > 0 {
            state.transient_left -= 1;
            return Err(TransportError::Read("capture buffer busy".to_string()));
        }

        let threshold = if state.rf_capture {
            self.config.rf_packet_on_poll
        } else {
            self.config.ir_packet_on_poll
        };

        match threshold {
            Some(n) if state.data_polls >= n => {
                state.learning = false;
                state.rf_capture = false;
                Ok(Some(self.config.packet.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn sweep_frequency(&self) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        state.sweeping = true;
        state.freq_checks = 0;
        debug!("{} started RF frequency sweep", self.info.host);
        Ok(())
    }

    async fn check_frequency(&self) -> Result<bool, TransportError> {
        let mut state = self.state.lock().unwrap();
        if !state.sweeping {
            return Ok(false);
        }
        state.freq_checks += 1;
        Ok(matches!(self.config.rf_lock_on_check, Some(n) if state.freq_checks >= n))
    }

    async fn cancel_sweep_frequency(&self) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        state.sweeping = false;
        state.sweep_cancelled = true;
        debug!("{} cancelled RF frequency sweep", self.info.host);
        Ok(())
    }

    async fn find_rf_packet(&self) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        state.sweeping = false;
        state.rf_capture = true;
        state.find_rf_invoked = true;
        state.data_polls = 0;
        state.transient_left = 0;
        debug!("{} capturing RF packet", self.info.host);
        Ok(())
    }

    async fn send_data(&self, packet: &[u8]) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        state.sent.push(packet.to_vec());
        debug!("{} transmitted {} bytes", self.info.host, packet.len());
        Ok(())
    }
}
