//! Blaster Command Engine
//!
//! This crate provides the core engine of the bridge: deciding what a
//! (command, action) pair means, capturing IR and RF signals through a
//! bounded-retry learning protocol, playing back macro scripts, and keeping
//! the file-backed signal store.
//!
//! # Architecture
//!
//! Inbound messages flow through a single mpsc channel into
//! [`run_dispatch_loop`], which decodes each payload and hands it to the
//! [`CommandRouter`]. The router resolves the device through the
//! [`DeviceRegistry`] and picks exactly one branch (replay, learn, or
//! macro) via the pure [`route`] precedence function. Everything below the
//! router talks to devices through the [`Blaster`](blast_device::Blaster)
//! trait and persists through the [`SignalStore`].
//!
//! Execution is strictly sequential: every sleep inside a learning session
//! or macro blocks the dispatch task, so at most one command is in flight
//! system-wide.
//!
//! # Example
//!
//! ```rust,no_run
//! use blast_core::{CommandRouter, DeviceRegistry, SignalStore};
//! use tokio::sync::mpsc;
//!
//! # async fn demo(registry: DeviceRegistry) {
//! let store = SignalStore::new("/var/lib/blastbridge");
//! let router = CommandRouter::new(registry, store);
//!
//! let (tx, rx) = mpsc::channel(64);
//! tokio::spawn(blast_core::run_dispatch_loop(rx, router));
//!
//! // The bus client enqueues raw payloads:
//! tx.send(br#"{"host": "10.0.0.8", "command": "tv_power"}"#.to_vec())
//!     .await
//!     .unwrap();
//! # }
//! ```

pub mod dispatch;
pub mod error;
pub mod learn;
pub mod message;
pub mod registry;
pub mod router;
pub mod script;
pub mod store;

pub use dispatch::run_dispatch_loop;
pub use error::{CommandError, DecodeError, StoreError};
pub use learn::LearningSession;
pub use message::CommandMessage;
pub use registry::DeviceRegistry;
pub use router::{route, CommandRouter, DispatchOutcome, Route};
pub use script::{MacroPlayer, MacroStep};
pub use store::{SignalStore, DEFAULT_ACTION};
