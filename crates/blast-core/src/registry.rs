//! Device registry
//!
//! Built once at startup by running discovery over the configured hosts and
//! indexing each device by the host address it answered on. Entries are
//! never mutated or removed for the lifetime of the process.

use std::collections::HashMap;
use std::sync::Arc;

use blast_device::{Blaster, Discovery, TransportError};
use tracing::info;

/// Host-indexed registry of authenticated devices
#[derive(Default)]
pub struct DeviceRegistry {
    devices: HashMap<String, Arc<dyn Blaster>>,
}

impl DeviceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover and authenticate every configured host
    ///
    /// Empty host entries are skipped. A host that fails discovery fails
    /// startup as a whole; an empty result is the caller's fatal condition.
    pub async fn discover(
        hosts: &[String],
        discovery: &dyn Discovery,
    ) -> Result<Self, TransportError> {
        let mut registry = Self::new();
        for host in hosts {
            if host.is_empty() {
                continue;
            }
            let device = discovery.hello(host).await?;
            info!("found {}", device.info());
            registry.insert(device);
        }
        Ok(registry)
    }

    /// Add a device, indexed by its resolved host address
    pub fn insert(&mut self, device: Arc<dyn Blaster>) {
        self.devices.insert(device.info().host.clone(), device);
    }

    /// Exact-match lookup by host address
    pub fn get(&self, host: &str) -> Option<&Arc<dyn Blaster>> {
        self.devices.get(host)
    }

    /// Number of registered devices
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether the registry holds no devices
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

impl std::fmt::Debug for DeviceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceRegistry")
            .field("hosts", &self.devices.keys().collect::<Vec<_>>())
            .finish()
    }
}
