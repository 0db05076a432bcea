//! Sync engine: binds the room table to the publish/subscribe channel.
//!
//! Each room lives on its own topic as a retained message, which turns the
//! broker into a last-write-wins copy of the room table: a device that
//! (re)subscribes immediately receives the last known value of every room.
//! Subscribing to all rooms on every connection is the only recovery path
//! after a transport disruption; the device keeps no durable state.

use roomctl_domain::error::{PayloadError, TopicError};
use roomctl_domain::menu::MenuState;
use roomctl_domain::room::RoomId;
use roomctl_domain::room_store::RoomStore;
use roomctl_domain::sync_message::SyncMessage;
use roomctl_domain::topic::RoomTopics;

use crate::ports::{ChannelError, Delivery, SyncChannel};

/// Reasons a sync operation did not go through.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Inbound topic does not address a known room.
    #[error("inbound topic rejected")]
    Topic(#[from] TopicError),

    /// Inbound payload is not a room state.
    #[error("inbound payload rejected")]
    Payload(#[from] PayloadError),

    /// The transport did not accept a publish or subscribe.
    #[error("sync channel request failed")]
    Channel(#[from] ChannelError),
}

/// A remote update that was written to the room table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub room: RoomId,
    /// The updated room is on screen and the display must be refreshed.
    pub redraw: bool,
}

/// Publishes local edits and applies remote ones.
pub struct SyncEngine<C> {
    channel: C,
    topics: RoomTopics,
}

impl<C: SyncChannel> SyncEngine<C> {
    /// Create an engine publishing on `topics` through `channel`.
    pub fn new(channel: C, topics: RoomTopics) -> Self {
        Self { channel, topics }
    }

    /// The underlying transport.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Topic naming in use.
    pub fn topics(&self) -> &RoomTopics {
        &self.topics
    }

    /// Subscribe to every room topic.
    ///
    /// Safe to call after each reconnect without unsubscribing first. Every
    /// room is attempted even when an earlier one fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`SyncError::Channel`] encountered.
    pub fn on_channel_connected(&self) -> Result<(), SyncError> {
        let mut first_err = None;
        for room in RoomId::all() {
            let topic = self.topics.topic(room);
            match self.channel.subscribe(&topic, Delivery::AtMostOnce) {
                Ok(()) => tracing::info!(%topic, "subscribed to room topic"),
                Err(err) => {
                    tracing::warn!(%err, %topic, "failed to subscribe to room topic");
                    first_err.get_or_insert(err);
                }
            }
        }
        first_err.map_or(Ok(()), |err| Err(err.into()))
    }

    /// Publish the current state of `room` as a retained, at-least-once message.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Channel`] if the transport refuses the message.
    pub fn publish(&self, rooms: &RoomStore, room: RoomId) -> Result<(), SyncError> {
        let topic = self.topics.topic(room);
        let payload = SyncMessage::from(rooms.get(room)).to_payload();
        self.channel
            .publish(&topic, payload, Delivery::AtLeastOnce, true)?;
        tracing::info!(%topic, room = room.number(), "room state published");
        Ok(())
    }

    /// Apply an inbound message to the room table.
    ///
    /// The update is all-or-nothing: the table is only touched once both the
    /// topic and the payload parsed. The last message received wins, even if
    /// it is older than a local edit of the same room.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Topic`] or [`SyncError::Payload`] when the
    /// message is dropped.
    pub fn on_message(
        &self,
        rooms: &mut RoomStore,
        view: &MenuState,
        topic: &str,
        payload: &[u8],
    ) -> Result<Applied, SyncError> {
        let room = self.topics.parse(topic)?;
        let message = SyncMessage::from_payload(payload)?;
        rooms.set(room, message.light, message.temperature);
        let state = rooms.get(room);
        tracing::info!(
            room = room.number(),
            light_on = state.light_on,
            temperature = state.temperature,
            "room updated from sync channel"
        );
        Ok(Applied {
            room,
            redraw: view.shows_room(room),
        })
    }
}
