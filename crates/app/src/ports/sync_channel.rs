//! Sync channel port: publish/subscribe transport with retained delivery.
//!
//! The channel knows nothing about rooms: it moves opaque payloads on topic
//! strings. Requests are non-blocking handoffs to the transport (enqueue);
//! connection management and retries belong to the adapter.

use std::sync::Arc;

/// Delivery guarantee requested for a publish or subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Best effort, QoS 0.
    AtMostOnce,
    /// Retried until acknowledged, QoS 1.
    AtLeastOnce,
}

/// Transport-level failure to accept a request.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The transport is shut down and accepts nothing anymore.
    #[error("sync channel closed")]
    Closed,

    /// The transport refused the request (queue full, invalid topic, …).
    #[error("sync channel rejected the request")]
    Rejected(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Notifications the transport delivers to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// A (re)connection completed; subscriptions must be re-established.
    Connected,
    /// A message arrived on a subscribed topic.
    Message { topic: String, payload: Vec<u8> },
}

/// Outbound side of a publish/subscribe transport.
pub trait SyncChannel {
    /// Subscribe to `topic`. Subscribing twice to the same topic is harmless.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] when the transport cannot take the request.
    fn subscribe(&self, topic: &str, delivery: Delivery) -> Result<(), ChannelError>;

    /// Publish `payload` on `topic`. With `retained`, the broker keeps it as
    /// the topic's last value and hands it to every later subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] when the transport cannot take the request.
    fn publish(
        &self,
        topic: &str,
        payload: Vec<u8>,
        delivery: Delivery,
        retained: bool,
    ) -> Result<(), ChannelError>;
}

impl<T: SyncChannel> SyncChannel for Arc<T> {
    fn subscribe(&self, topic: &str, delivery: Delivery) -> Result<(), ChannelError> {
        (**self).subscribe(topic, delivery)
    }

    fn publish(
        &self,
        topic: &str,
        payload: Vec<u8>,
        delivery: Delivery,
        retained: bool,
    ) -> Result<(), ChannelError> {
        (**self).publish(topic, payload, delivery, retained)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_closed_error() {
        assert_eq!(ChannelError::Closed.to_string(), "sync channel closed");
    }

    #[test]
    fn should_keep_rejection_cause_as_source() {
        let cause = std::io::Error::other("queue full");
        let err = ChannelError::Rejected(Box::new(cause));
        assert_eq!(err.to_string(), "sync channel rejected the request");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("queue full"));
    }
}
