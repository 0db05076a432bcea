//! Sync message: the wire form of one room's state.
//!
//! Encoded as `{"light":<0|1>,"temperature":<integer>}` in that field order.
//! Parsing tolerates whitespace and unknown extra fields, but both known
//! fields are required and `light` must be `0` or `1`.

use serde::{Deserialize, Serialize};

use crate::error::PayloadError;
use crate::room::Room;

/// One room's state as published on its topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncMessage {
    #[serde(with = "light_flag")]
    pub light: bool,
    pub temperature: i32,
}

impl SyncMessage {
    /// Encode to the JSON payload.
    #[must_use]
    pub fn to_payload(&self) -> Vec<u8> {
        // Two plain integer fields, serialization cannot fail.
        serde_json::to_vec(self).unwrap_or_default()
    }

    /// Decode a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] when the bytes are not a JSON object with
    /// integer `light` (0 or 1) and `temperature` fields.
    pub fn from_payload(payload: &[u8]) -> Result<Self, PayloadError> {
        Ok(serde_json::from_slice(payload)?)
    }
}

impl From<Room> for SyncMessage {
    fn from(room: Room) -> Self {
        Self {
            light: room.light_on,
            temperature: room.temperature,
        }
    }
}

mod light_flag {
    use serde::de::{Error, Unexpected};
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(D::Error::invalid_value(
                Unexpected::Unsigned(u64::from(other)),
                &"0 or 1",
            )),
        }
    }
}
