//! Blaster Device Library
//!
//! This crate defines the device-side vocabulary for network-attached IR/RF
//! "blaster" appliances (universal remotes in the Broadlink RM family and
//! friends):
//!
//! - **Device model**: [`DeviceKind`], [`MacAddr`] and [`DeviceInfo`]
//! - **Transport boundary**: the [`Blaster`] trait, covering the learning
//!   and transmit primitives a device must expose
//! - **Discovery boundary**: the [`Discovery`] trait, covering the
//!   hello/authenticate handshake that produces a usable device handle
//!
//! # Architecture
//!
//! The wire protocol spoken to real hardware lives behind [`Blaster`]; the
//! engine crate only ever talks to the trait. Capability is a property of
//! [`DeviceKind`], not a list kept by callers: a dispatcher asks
//! [`DeviceKind::is_remote`] instead of comparing model names.
//!
//! # Example
//!
//! ```rust
//! use blast_device::DeviceKind;
//!
//! assert!(DeviceKind::Rm4Pro.is_remote());
//! assert!(!DeviceKind::Sp2.is_remote());
//! ```

pub mod error;
pub mod model;
pub mod transport;

pub use error::TransportError;
pub use model::{DeviceInfo, DeviceKind, MacAddr};
pub use transport::{Blaster, Discovery};
