//! Error types for the sync wire format.
//!
//! Both errors describe inbound data that gets dropped; neither is fatal.

/// A topic that does not address a known room.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopicError {
    /// The topic does not follow the `<root>/room/<N>` layout.
    #[error("topic {0:?} does not match the room topic layout")]
    UnknownLayout(String),

    /// The room number parsed but no such room exists.
    #[error("room number {0} is out of range")]
    RoomOutOfRange(usize),
}

/// A payload that does not have the expected `{"light":…,"temperature":…}` shape.
#[derive(Debug, thiserror::Error)]
#[error("malformed room payload")]
pub struct PayloadError(#[from] pub serde_json::Error);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_unknown_layout_with_topic() {
        let err = TopicError::UnknownLayout("home/kitchen".to_string());
        assert_eq!(
            err.to_string(),
            "topic \"home/kitchen\" does not match the room topic layout"
        );
    }

    #[test]
    fn should_display_out_of_range_room_number() {
        assert_eq!(
            TopicError::RoomOutOfRange(9).to_string(),
            "room number 9 is out of range"
        );
    }

    #[test]
    fn should_keep_json_error_as_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{{bad").unwrap_err();
        let err = PayloadError::from(json_err);
        assert_eq!(err.to_string(), "malformed room payload");
        assert!(std::error::Error::source(&err).is_some());
    }
}
