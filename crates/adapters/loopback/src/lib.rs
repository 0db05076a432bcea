//! # roomctl-adapter-loopback
//!
//! In-process broker with retained last-value semantics, used when no MQTT
//! broker is configured and as a stand-in transport in tests.
//!
//! ## Behaviour
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | `connect` | emits `Connected` to the controller |
//! | `subscribe` | registers the topic and immediately delivers its retained value |
//! | `publish` | logs the message (last [`PUBLISH_LOG_CAPACITY`] kept), stores it when retained (empty payload clears), delivers it to a matching subscription |
//! | `disconnect` | drops every subscription, like a lost clean session |
//!
//! Topics match exactly; wildcards are not supported. Deliveries use a
//! non-blocking send; when the controller queue is full the delivery is
//! dropped and logged, as a QoS 0 broker would.
//!
//! ## Dependency rule
//!
//! Depends on `roomctl-app` (port traits) only.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use roomctl_app::controller::ControllerEvent;
use roomctl_app::ports::{ChannelError, ChannelEvent, Delivery, SyncChannel};

/// Number of publishes kept in the log; older ones are discarded.
pub const PUBLISH_LOG_CAPACITY: usize = 256;

/// A message that went through [`LoopbackBroker::publish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub topic: String,
    pub payload: Vec<u8>,
    pub delivery: Delivery,
    pub retained: bool,
}

#[derive(Default)]
struct BrokerState {
    retained: HashMap<String, Vec<u8>>,
    subscriptions: BTreeSet<String>,
    published: VecDeque<PublishedMessage>,
}

/// Single-subscriber broker living in the same process as the controller.
pub struct LoopbackBroker {
    state: Mutex<BrokerState>,
    events: mpsc::Sender<ControllerEvent>,
}

impl LoopbackBroker {
    /// Create a broker delivering to the controller queue `events`.
    #[must_use]
    pub fn new(events: mpsc::Sender<ControllerEvent>) -> Self {
        Self {
            state: Mutex::new(BrokerState::default()),
            events,
        }
    }

    /// Announce a (re)connection to the controller.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Closed`] if the controller queue is closed and
    /// [`ChannelError::Rejected`] if it is full.
    pub fn connect(&self) -> Result<(), ChannelError> {
        tracing::info!("loopback broker connected");
        self.events
            .try_send(ChannelEvent::Connected.into())
            .map_err(|err| match err {
                TrySendError::Closed(_) => ChannelError::Closed,
                TrySendError::Full(_) => ChannelError::Rejected("controller queue full".into()),
            })
    }

    /// Forget every subscription.
    pub fn disconnect(&self) {
        self.lock().subscriptions.clear();
        tracing::info!("loopback broker disconnected");
    }

    /// Retained value of `topic`, if any.
    #[must_use]
    pub fn retained(&self, topic: &str) -> Option<Vec<u8>> {
        self.lock().retained.get(topic).cloned()
    }

    /// The last [`PUBLISH_LOG_CAPACITY`] published messages, oldest first.
    #[must_use]
    pub fn published(&self) -> Vec<PublishedMessage> {
        self.lock().published.iter().cloned().collect()
    }

    /// Currently subscribed topics, sorted.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<String> {
        self.lock().subscriptions.iter().cloned().collect()
    }

    fn deliver(&self, topic: &str, payload: Vec<u8>) {
        let event = ChannelEvent::Message {
            topic: topic.to_string(),
            payload,
        };
        if let Err(err) = self.events.try_send(event.into()) {
            tracing::warn!(%err, %topic, "loopback delivery dropped");
        }
    }

    fn lock(&self) -> MutexGuard<'_, BrokerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SyncChannel for LoopbackBroker {
    fn subscribe(&self, topic: &str, _delivery: Delivery) -> Result<(), ChannelError> {
        if self.events.is_closed() {
            return Err(ChannelError::Closed);
        }
        let retained = {
            let mut state = self.lock();
            state.subscriptions.insert(topic.to_string());
            state.retained.get(topic).cloned()
        };
        if let Some(payload) = retained {
            self.deliver(topic, payload);
        }
        Ok(())
    }

    fn publish(
        &self,
        topic: &str,
        payload: Vec<u8>,
        delivery: Delivery,
        retained: bool,
    ) -> Result<(), ChannelError> {
        if self.events.is_closed() {
            return Err(ChannelError::Closed);
        }
        let subscribed = {
            let mut state = self.lock();
            if retained {
                if payload.is_empty() {
                    state.retained.remove(topic);
                } else {
                    state.retained.insert(topic.to_string(), payload.clone());
                }
            }
            if state.published.len() == PUBLISH_LOG_CAPACITY {
                state.published.pop_front();
            }
            state.published.push_back(PublishedMessage {
                topic: topic.to_string(),
                payload: payload.clone(),
                delivery,
                retained,
            });
            state.subscriptions.contains(topic)
        };
        if subscribed {
            self.deliver(topic, payload);
        }
        Ok(())
    }
}
