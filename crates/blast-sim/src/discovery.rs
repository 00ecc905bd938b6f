//! Simulated device discovery
//!
//! Maps configured host addresses to scripted devices, standing in for the
//! hello/authenticate handshake a hardware backend performs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use blast_device::{Blaster, Discovery, TransportError};
use tracing::debug;

use crate::blaster::{SimBlaster, SimBlasterConfig};

/// Discovery over a configured fleet of simulated devices
#[derive(Debug, Default)]
pub struct SimDiscovery {
    fleet: HashMap<String, SimBlasterConfig>,
}

impl SimDiscovery {
    /// Create an empty fleet
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fleet from device configurations, keyed by host
    pub fn from_configs(configs: impl IntoIterator<Item = SimBlasterConfig>) -> Self {
        let fleet = configs
            .into_iter()
            .map(|config| (config.host.clone(), config))
            .collect();
        Self { fleet }
    }

    /// Add one device to the fleet
    pub fn with_device(mut self, config: SimBlasterConfig) -> Self {
        self.fleet.insert(config.host.clone(), config);
        self
    }
}

#[async_trait]
impl Discovery for SimDiscovery {
    async fn hello(&self, host: &str) -> Result<Arc<dyn Blaster>, TransportError> {
        let config = self.fleet.get(host).ok_or_else(|| {
            TransportError::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                format!("no answer from {host}"),
            ))
        })?;

        debug!("simulated hello answered by {}", host);
        Ok(Arc::new(SimBlaster::from_config(config.clone())))
    }
}
