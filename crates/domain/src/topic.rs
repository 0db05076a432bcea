//! Per-room topic naming: `<root>/room/<N>` with `N` the 1-based room number.

use crate::error::TopicError;
use crate::room::RoomId;

/// Default topic root.
pub const DEFAULT_ROOT: &str = "home";

const ROOM_SEGMENT: &str = "/room/";

/// Builds and parses the topics rooms are synchronized on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomTopics {
    root: String,
}

impl Default for RoomTopics {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

impl RoomTopics {
    /// Use `root` as the fixed topic prefix.
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    /// The topic prefix.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Topic for `room`, e.g. `home/room/2` for index 1.
    #[must_use]
    pub fn topic(&self, room: RoomId) -> String {
        format!("{}{ROOM_SEGMENT}{}", self.root, room.number())
    }

    /// Recover the room a topic addresses.
    ///
    /// # Errors
    ///
    /// Returns [`TopicError::UnknownLayout`] when the prefix or number does
    /// not parse, and [`TopicError::RoomOutOfRange`] when the number is not
    /// a known room.
    pub fn parse(&self, topic: &str) -> Result<RoomId, TopicError> {
        let unknown = || TopicError::UnknownLayout(topic.to_string());
        let number = topic
            .strip_prefix(self.root.as_str())
            .and_then(|rest| rest.strip_prefix(ROOM_SEGMENT))
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(unknown)?
            .parse::<usize>()
            .map_err(|_| unknown())?;
        RoomId::from_number(number).ok_or(TopicError::RoomOutOfRange(number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_format_one_based_topic() {
        let topics = RoomTopics::default();
        assert_eq!(topics.topic(RoomId::FIRST), "home/room/1");
        assert_eq!(
            topics.topic(RoomId::from_index(3).unwrap()),
            "home/room/4"
        );
    }

    #[test]
    fn should_use_custom_root() {
        let topics = RoomTopics::new("flat/42");
        assert_eq!(topics.topic(RoomId::FIRST), "flat/42/room/1");
        assert_eq!(topics.parse("flat/42/room/1"), Ok(RoomId::FIRST));
    }

    #[test]
    fn should_parse_every_room_topic_back() {
        let topics = RoomTopics::default();
        for room in RoomId::all() {
            assert_eq!(topics.parse(&topics.topic(room)), Ok(room));
        }
    }

    #[test]
    fn should_reject_room_zero_and_past_last_room() {
        let topics = RoomTopics::default();
        assert_eq!(
            topics.parse("home/room/0"),
            Err(TopicError::RoomOutOfRange(0))
        );
        assert_eq!(
            topics.parse("home/room/5"),
            Err(TopicError::RoomOutOfRange(5))
        );
    }

    #[test]
    fn should_reject_foreign_layouts() {
        let topics = RoomTopics::default();
        for topic in [
            "",
            "home",
            "home/room/",
            "home/room/x",
            "home/room/2/extra",
            "home/room/-1",
            "office/room/1",
            "home/rooms/1",
        ] {
            assert!(
                matches!(topics.parse(topic), Err(TopicError::UnknownLayout(_))),
                "{topic} should not parse"
            );
        }
    }

    #[test]
    fn should_reject_numbers_too_large_for_usize() {
        let topics = RoomTopics::default();
        let result = topics.parse("home/room/99999999999999999999999");
        assert!(matches!(result, Err(TopicError::UnknownLayout(_))));
    }
}
