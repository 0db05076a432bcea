//! Room store: the authoritative in-memory table of room states.

use crate::room::{ROOM_COUNT, Room, RoomId};

/// Table of every room's current state.
///
/// Plain data: no locking, no buffering. The single owner of the store
/// serializes access; every write is visible to the next read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomStore {
    rooms: [Room; ROOM_COUNT],
}

impl RoomStore {
    /// Create a store with every room at its default state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `room`.
    #[must_use]
    pub fn get(&self, room: RoomId) -> Room {
        self.rooms[room.index()]
    }

    /// Overwrite `room`, wrapping `temperature` into range.
    pub fn set(&mut self, room: RoomId, light_on: bool, temperature: i32) {
        self.rooms[room.index()] = Room::new(light_on, temperature);
    }

    /// Flip the light of `room` and return the new state.
    pub fn toggle_light(&mut self, room: RoomId) -> Room {
        let entry = &mut self.rooms[room.index()];
        entry.toggle_light();
        *entry
    }

    /// Raise the setpoint of `room` by one degree (with wrap) and return the new state.
    pub fn increment_temperature(&mut self, room: RoomId) -> Room {
        let entry = &mut self.rooms[room.index()];
        entry.increment_temperature();
        *entry
    }

    /// Iterate over `(id, state)` pairs in room order.
    pub fn iter(&self) -> impl Iterator<Item = (RoomId, Room)> + '_ {
        RoomId::all().map(|id| (id, self.get(id)))
    }
}
