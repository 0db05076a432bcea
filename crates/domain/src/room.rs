//! Room: a controllable space with a light and a temperature setpoint.

use std::fmt;

/// Number of rooms handled by the controller.
pub const ROOM_COUNT: usize = 4;

/// Lowest temperature setpoint, in degrees Celsius.
pub const TEMP_MIN: i32 = 15;

/// Highest temperature setpoint, in degrees Celsius.
pub const TEMP_MAX: i32 = 30;

const TEMP_SPAN: i32 = TEMP_MAX - TEMP_MIN + 1;

/// Index of a room, guaranteed to be in `0..ROOM_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(usize);

impl RoomId {
    /// The first room.
    pub const FIRST: Self = Self(0);

    /// Wrap a 0-based index, returning `None` when it is out of range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        (index < ROOM_COUNT).then_some(Self(index))
    }

    /// Wrap a 1-based room number as shown to users and used in topics.
    #[must_use]
    pub fn from_number(number: usize) -> Option<Self> {
        number.checked_sub(1).and_then(Self::from_index)
    }

    /// 0-based index into the room table.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }

    /// 1-based room number.
    #[must_use]
    pub fn number(self) -> usize {
        self.0 + 1
    }

    /// The next room, or `None` after the last one.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.0 + 1)
    }

    /// Iterate over every room in index order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ROOM_COUNT).map(Self)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Room {}", self.number())
    }
}

/// Bring any temperature back into `TEMP_MIN..=TEMP_MAX` by modular wrap.
///
/// `TEMP_MAX + 1` becomes `TEMP_MIN`, `TEMP_MIN - 1` becomes `TEMP_MAX`.
#[must_use]
pub fn wrap_temperature(value: i32) -> i32 {
    // Widened so values near the `i32` bounds cannot overflow.
    let offset = (i64::from(value) - i64::from(TEMP_MIN)).rem_euclid(i64::from(TEMP_SPAN));
    TEMP_MIN + i32::try_from(offset).unwrap_or_default()
}

/// State of a single room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    pub light_on: bool,
    pub temperature: i32,
}

impl Default for Room {
    fn default() -> Self {
        Self {
            light_on: false,
            temperature: TEMP_MIN,
        }
    }
}

impl Room {
    /// Build a room, wrapping `temperature` into range.
    #[must_use]
    pub fn new(light_on: bool, temperature: i32) -> Self {
        Self {
            light_on,
            temperature: wrap_temperature(temperature),
        }
    }

    /// Flip the light.
    pub fn toggle_light(&mut self) {
        self.light_on = !self.light_on;
    }

    /// Raise the setpoint by one degree, wrapping to [`TEMP_MIN`] past [`TEMP_MAX`].
    pub fn increment_temperature(&mut self) {
        self.temperature = wrap_temperature(self.temperature + 1);
    }
}
