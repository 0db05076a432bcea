//! # roomctl-adapter-mqtt
//!
//! MQTT adapter: carries room state over an MQTT broker.
//!
//! ## How it works
//!
//! [`start`] builds a `rumqttc` client and spawns a task driving its event
//! loop. The task owns the connection lifecycle: `rumqttc` reconnects on the
//! next poll after an error, and every successful `CONNACK` is forwarded to
//! the controller as [`ChannelEvent::Connected`](roomctl_app::ports::ChannelEvent)
//! so it re-subscribes. Incoming publishes are forwarded as messages.
//!
//! Publishes and subscriptions go through [`MqttChannel`], which only
//! enqueues requests (`try_publish` / `try_subscribe`) and never waits on the
//! network.
//!
//! | Operation | QoS | Retain |
//! |-----------|-----|--------|
//! | Publish room state | 1 | yes |
//! | Subscribe room topic | 0 | - |
//!
//! ## Dependency rule
//!
//! Depends on `roomctl-app` (port traits) only.

mod config;
mod error;
mod event_loop;

pub use config::MqttConfig;
pub use error::MqttError;

use rumqttc::{AsyncClient, MqttOptions, QoS};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use roomctl_app::controller::ControllerEvent;
use roomctl_app::ports::{ChannelError, Delivery, SyncChannel};

/// [`SyncChannel`] backed by a `rumqttc` client.
#[derive(Clone)]
pub struct MqttChannel {
    client: AsyncClient,
}

impl MqttChannel {
    /// Wrap an existing client.
    #[must_use]
    pub fn new(client: AsyncClient) -> Self {
        Self { client }
    }
}

fn qos(delivery: Delivery) -> QoS {
    match delivery {
        Delivery::AtMostOnce => QoS::AtMostOnce,
        Delivery::AtLeastOnce => QoS::AtLeastOnce,
    }
}

impl SyncChannel for MqttChannel {
    fn subscribe(&self, topic: &str, delivery: Delivery) -> Result<(), ChannelError> {
        self.client
            .try_subscribe(topic, qos(delivery))
            .map_err(|err| MqttError::from(err).into())
    }

    fn publish(
        &self,
        topic: &str,
        payload: Vec<u8>,
        delivery: Delivery,
        retained: bool,
    ) -> Result<(), ChannelError> {
        self.client
            .try_publish(topic, qos(delivery), retained, payload)
            .map_err(|err| MqttError::from(err).into())
    }
}

/// Create the client and spawn the event-loop task feeding `events`.
///
/// The task runs until the controller queue closes or the handle is aborted.
#[must_use]
pub fn start(
    config: &MqttConfig,
    events: mpsc::Sender<ControllerEvent>,
) -> (MqttChannel, JoinHandle<()>) {
    let mut options = MqttOptions::new(
        config.client_id.clone(),
        config.broker_host.clone(),
        config.broker_port,
    );
    options.set_keep_alive(config.keep_alive());
    options.set_clean_session(true);

    let (client, eventloop) = AsyncClient::new(options, config.request_capacity.max(1));

    tracing::info!(
        host = %config.broker_host,
        port = config.broker_port,
        client_id = %config.client_id,
        "MQTT client started"
    );

    let handle = tokio::spawn(event_loop::drive(
        eventloop,
        events,
        config.reconnect_delay(),
    ));
    (MqttChannel::new(client), handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(capacity: usize) -> (MqttChannel, rumqttc::EventLoop) {
        let (client, eventloop) =
            AsyncClient::new(MqttOptions::new("test", "localhost", 1883), capacity);
        (MqttChannel::new(client), eventloop)
    }

    #[test]
    fn should_map_delivery_to_qos() {
        assert_eq!(qos(Delivery::AtMostOnce), QoS::AtMostOnce);
        assert_eq!(qos(Delivery::AtLeastOnce), QoS::AtLeastOnce);
    }

    #[test]
    fn should_enqueue_publish_without_network() {
        let (channel, _eventloop) = channel(4);
        let result = channel.publish(
            "home/room/1",
            br#"{"light":1,"temperature":22}"#.to_vec(),
            Delivery::AtLeastOnce,
            true,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn should_enqueue_subscribe_without_network() {
        let (channel, _eventloop) = channel(4);
        assert!(channel.subscribe("home/room/1", Delivery::AtMostOnce).is_ok());
    }

    #[test]
    fn should_reject_publish_when_request_queue_is_full() {
        let (channel, _eventloop) = channel(1);
        channel
            .publish("home/room/1", Vec::new(), Delivery::AtLeastOnce, true)
            .unwrap();
        let result = channel.publish("home/room/2", Vec::new(), Delivery::AtLeastOnce, true);
        assert!(matches!(result, Err(ChannelError::Rejected(_))));
    }

    #[tokio::test]
    async fn should_start_client_without_blocking() {
        let (tx, _rx) = mpsc::channel(4);
        let config = MqttConfig {
            broker_host: "127.0.0.1".to_string(),
            broker_port: 1,
            reconnect_delay_secs: 60,
            ..MqttConfig::default()
        };
        let (channel, handle) = start(&config, tx);
        assert!(channel.subscribe("home/room/1", Delivery::AtMostOnce).is_ok());
        handle.abort();
    }
}
