//! Daemon configuration
//!
//! A single JSON file with explicit named fields, every one of them
//! defaulted so a minimal deployment only lists its devices:
//!
//! ```json
//! {
//!     "data_dir": "/var/lib/blastbridge",
//!     "devices": [
//!         { "host": "10.0.0.8", "kind": "rm4pro" }
//!     ],
//!     "mqtt": { "broker": "mqtt.lan" }
//! }
//! ```
//!
//! The `DATA_DIR` environment variable overrides `data_dir`, which keeps
//! container deployments configuration-free.

use std::path::{Path, PathBuf};

use blast_sim::SimBlasterConfig;
use serde::Deserialize;
use thiserror::Error;

/// Errors loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File exists but could not be read
    #[error("failed to read config file {}: {}", path.display(), source)]
    Io {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid configuration JSON
    #[error("invalid config file {}: {}", path.display(), source)]
    Parse {
        /// Path that failed to parse
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

/// MQTT connection and topic settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MqttSettings {
    /// Broker host name or address
    pub broker: String,
    /// Broker port
    pub port: u16,
    /// Client identifier presented to the broker
    pub client_id: String,
    /// Optional username for broker auth
    pub username: Option<String>,
    /// Optional password for broker auth
    pub password: Option<String>,
    /// Topic command messages arrive on
    pub command_topic: String,
    /// Topic the retained birth payload is published to after connect
    pub birth_topic: String,
    /// Birth payload
    pub birth_payload: String,
    /// Last-will topic registered with the broker
    pub will_topic: String,
    /// Last-will payload
    pub will_payload: String,
}

impl Default for MqttSettings {
    fn default() -> Self {
        Self {
            broker: "localhost".to_string(),
            port: 1883,
            client_id: "blastbridge".to_string(),
            username: None,
            password: None,
            command_topic: "cmnd/blastbridge".to_string(),
            birth_topic: "stat/blastbridge/lwt".to_string(),
            birth_payload: r#"{"online":true}"#.to_string(),
            will_topic: "stat/blastbridge/lwt".to_string(),
            will_payload: r#"{"online":false}"#.to_string(),
        }
    }
}

/// Top-level daemon configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Root of the signal store (`commands/`, `macros/`)
    pub data_dir: PathBuf,
    /// The device fleet, keyed by host address
    pub devices: Vec<SimBlasterConfig>,
    /// Bus connection settings
    pub mqtt: MqttSettings,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            devices: Vec::new(),
            mqtt: MqttSettings::default(),
        }
    }
}

impl BridgeConfig {
    /// Load configuration from a file
    ///
    /// A missing file yields the defaults; an unreadable or malformed file
    /// is a startup error. `DATA_DIR` in the environment wins over the
    /// file's `data_dir`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if let Ok(dir) = std::env::var("DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    /// Host addresses of the configured fleet
    pub fn device_hosts(&self) -> Vec<String> {
        self.devices.iter().map(|d| d.host.clone()).collect()
    }
}
