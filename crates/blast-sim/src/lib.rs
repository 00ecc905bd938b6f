//! Blaster Simulation Layer
//!
//! Provides in-memory [`Blaster`](blast_device::Blaster) implementations
//! that follow the hardware's capture state machine without any hardware:
//! scripted capture outcomes, injectable per-poll errors, and an
//! inspectable record of everything the engine asked the device to do.
//!
//! Used two ways:
//!
//! - by the bridge daemon, to run a virtual fleet from configuration
//! - by engine tests, to script learning outcomes and assert on device
//!   interactions
//!
//! # Example
//!
//! ```rust
//! use blast_device::Blaster;
//! use blast_sim::{SimBlaster, SimBlasterConfig};
//!
//! let device = SimBlaster::from_config(SimBlasterConfig {
//!     host: "10.0.0.8".into(),
//!     ..Default::default()
//! });
//! assert_eq!(device.info().host, "10.0.0.8");
//! ```

mod blaster;
mod discovery;

pub use blaster::{SimBlaster, SimBlasterConfig};
pub use discovery::SimDiscovery;
