//! Inbound dispatch loop
//!
//! One channel, one consumer: the bus client enqueues raw payloads and this
//! loop decodes and dispatches them strictly one at a time. Awaiting each
//! dispatch before the next `recv` is what gives the engine its
//! one-command-in-flight guarantee; a learning session or macro pause keeps
//! later messages queued in the channel.

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::message::CommandMessage;
use crate::router::CommandRouter;

/// Consume payloads until the channel closes
pub async fn run_dispatch_loop(mut rx: mpsc::Receiver<Vec<u8>>, router: CommandRouter) {
    info!("dispatch loop started");

    while let Some(payload) = rx.recv().await {
        let msg = match CommandMessage::decode(&payload) {
            Ok(msg) => msg,
            Err(err) => {
                error!(
                    "failed to decode payload {:?}: {}",
                    String::from_utf8_lossy(&payload),
                    err
                );
                continue;
            }
        };

        router.dispatch(&msg).await;
    }

    info!("dispatch loop stopped");
}
