//! Bus client
//!
//! Owns the MQTT connection and feeds raw command payloads into the
//! dispatch channel. Everything command-related happens on the other side
//! of that channel; this task only ever enqueues, so a learning session in
//! progress back-pressures into the channel instead of into the broker.
//!
//! Connection lifecycle follows the usual daemon pattern: the last-will is
//! registered before connecting, the retained birth payload goes out on
//! every (re)connect, and connection errors retry after a fixed delay.

use std::time::Duration;

use rumqttc::{AsyncClient, Event, LastWill, MqttOptions, Packet, QoS};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::MqttSettings;

const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Run the bus connection until the dispatch side goes away
pub async fn run_bus_loop(settings: MqttSettings, tx: mpsc::Sender<Vec<u8>>) {
    let mut options = MqttOptions::new(
        settings.client_id.clone(),
        settings.broker.clone(),
        settings.port,
    );
    options.set_keep_alive(Duration::from_secs(60));
    options.set_last_will(LastWill::new(
        settings.will_topic.clone(),
        settings.will_payload.clone(),
        QoS::AtMostOnce,
        true,
    ));
    if let (Some(user), Some(pass)) = (&settings.username, &settings.password) {
        options.set_credentials(user.clone(), pass.clone());
    }

    let (client, mut eventloop) = AsyncClient::new(options, 64);
    info!(
        "connecting to MQTT broker at {}:{}",
        settings.broker, settings.port
    );

    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                info!("MQTT connected");

                if let Err(err) = client
                    .publish(
                        settings.birth_topic.clone(),
                        QoS::AtMostOnce,
                        true,
                        settings.birth_payload.clone(),
                    )
                    .await
                {
                    warn!("failed to publish birth payload: {}", err);
                }

                debug!("subscribing to command topic {}", settings.command_topic);
                if let Err(err) = client
                    .subscribe(settings.command_topic.clone(), QoS::AtMostOnce)
                    .await
                {
                    warn!("failed to subscribe to {}: {}", settings.command_topic, err);
                }
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                debug!(
                    "message on {} ({} bytes)",
                    publish.topic,
                    publish.payload.len()
                );
                if tx.send(publish.payload.to_vec()).await.is_err() {
                    info!("dispatch loop gone, closing bus connection");
                    return;
                }
            }
            Ok(_) => {}
            Err(err) => {
                warn!(
                    "MQTT connection error: {}, reconnecting in {}s",
                    err,
                    RECONNECT_DELAY.as_secs()
                );
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }
}
