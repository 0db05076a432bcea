//! Event-loop task: drives the `rumqttc` connection and forwards what
//! matters to the controller queue.

use std::time::Duration;

use rumqttc::{Event, EventLoop, Packet};
use tokio::sync::mpsc;

use roomctl_app::controller::ControllerEvent;
use roomctl_app::ports::ChannelEvent;

/// Keep polling the connection until the controller queue closes.
///
/// Poll errors are logged; the next poll reconnects after `reconnect_delay`.
pub(crate) async fn drive(
    mut eventloop: EventLoop,
    events: mpsc::Sender<ControllerEvent>,
    reconnect_delay: Duration,
) {
    loop {
        match eventloop.poll().await {
            Ok(event) => {
                let Some(channel_event) = translate(event) else {
                    continue;
                };
                if events.send(channel_event.into()).await.is_err() {
                    tracing::debug!("controller queue closed, MQTT event loop stopping");
                    return;
                }
            }
            Err(err) => {
                tracing::warn!(
                    %err,
                    retry_in_secs = reconnect_delay.as_secs(),
                    "MQTT connection error, reconnecting"
                );
                tokio::time::sleep(reconnect_delay).await;
            }
        }
    }
}

/// Keep connection acknowledgements and incoming publishes, drop the rest.
pub(crate) fn translate(event: Event) -> Option<ChannelEvent> {
    match event {
        Event::Incoming(Packet::ConnAck(ack)) => {
            tracing::info!(session_present = ack.session_present, "MQTT connected");
            Some(ChannelEvent::Connected)
        }
        Event::Incoming(Packet::Publish(publish)) => {
            tracing::debug!(topic = %publish.topic, retain = publish.retain, "MQTT message received");
            Some(ChannelEvent::Message {
                topic: publish.topic,
                payload: publish.payload.to_vec(),
            })
        }
        _ => None,
    }
}
