//! Menu: the two-button navigation state machine.
//!
//! The menu is driven by two discrete button edges:
//!
//! - **select** moves the cursor of the active screen forward (wrapping), or
//!   on the temperature screen raises the setpoint by one degree
//! - **confirm** enters or leaves a screen; confirming the light screen
//!   toggles the light on the way out
//!
//! ```text
//! MainMenu ──▶ ViewStatus
//!    │  ▲
//!    ▼  │
//! ChangeMenu ──▶ RoomSettings ──▶ AdjustLight
//!                     ▲    └────▶ AdjustTemperature
//! ```
//!
//! Every edge yields a [`Transition`]; a transition that edited a room names
//! the room to publish.

use crate::room::RoomId;
use crate::room_store::RoomStore;

/// A debounced button press edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left button: move cursor / increment.
    Select,
    /// Right button: enter / leave / OK.
    Confirm,
}

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainOption {
    #[default]
    ViewStatus,
    MakeChanges,
}

impl MainOption {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::ViewStatus => Self::MakeChanges,
            Self::MakeChanges => Self::ViewStatus,
        }
    }
}

/// Cursor over the room list, with a trailing "back" slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomCursor {
    Room(RoomId),
    Back,
}

impl Default for RoomCursor {
    fn default() -> Self {
        Self::Room(RoomId::FIRST)
    }
}

impl RoomCursor {
    /// Advance through every room then "back", wrapping to the first room.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Room(room) => room.next().map_or(Self::Back, Self::Room),
            Self::Back => Self::default(),
        }
    }
}

/// Entries of the per-room settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsOption {
    #[default]
    Light,
    Temperature,
    Back,
}

impl SettingsOption {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Light => Self::Temperature,
            Self::Temperature => Self::Back,
            Self::Back => Self::Light,
        }
    }
}

/// The screen currently shown, with only the cursor state that screen uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    MainMenu { option: MainOption },
    ViewStatus { cursor: RoomCursor },
    ChangeMenu { cursor: RoomCursor },
    RoomSettings { room: RoomId, option: SettingsOption },
    AdjustLight { room: RoomId },
    AdjustTemperature { room: RoomId },
}

impl Default for MenuState {
    fn default() -> Self {
        Self::MainMenu {
            option: MainOption::default(),
        }
    }
}

impl MenuState {
    /// Whether the screen displays the state of `room`.
    ///
    /// The status list shows every room; the room picker counts the room
    /// under its cursor; the settings and adjust screens show their own room.
    #[must_use]
    pub fn shows_room(&self, room: RoomId) -> bool {
        match *self {
            Self::MainMenu { .. } | Self::ChangeMenu { cursor: RoomCursor::Back } => false,
            Self::ViewStatus { .. } => true,
            Self::ChangeMenu {
                cursor: RoomCursor::Room(current),
            }
            | Self::RoomSettings { room: current, .. }
            | Self::AdjustLight { room: current }
            | Self::AdjustTemperature { room: current } => current == room,
        }
    }

    /// Short screen name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::MainMenu { .. } => "main_menu",
            Self::ViewStatus { .. } => "view_status",
            Self::ChangeMenu { .. } => "change_menu",
            Self::RoomSettings { .. } => "room_settings",
            Self::AdjustLight { .. } => "adjust_light",
            Self::AdjustTemperature { .. } => "adjust_temperature",
        }
    }

    fn select(self, store: &mut RoomStore) -> (Self, Option<RoomId>) {
        match self {
            Self::MainMenu { option } => (
                Self::MainMenu {
                    option: option.next(),
                },
                None,
            ),
            Self::ViewStatus { cursor } => (
                Self::ViewStatus {
                    cursor: cursor.next(),
                },
                None,
            ),
            Self::ChangeMenu { cursor } => (
                Self::ChangeMenu {
                    cursor: cursor.next(),
                },
                None,
            ),
            Self::RoomSettings { room, option } => (
                Self::RoomSettings {
                    room,
                    option: option.next(),
                },
                None,
            ),
            Self::AdjustLight { .. } => (self, None),
            Self::AdjustTemperature { room } => {
                store.increment_temperature(room);
                (self, Some(room))
            }
        }
    }

    fn confirm(self, store: &mut RoomStore) -> (Self, Option<RoomId>) {
        match self {
            Self::MainMenu {
                option: MainOption::ViewStatus,
            } => (
                Self::ViewStatus {
                    cursor: RoomCursor::default(),
                },
                None,
            ),
            Self::MainMenu {
                option: MainOption::MakeChanges,
            } => (
                Self::ChangeMenu {
                    cursor: RoomCursor::default(),
                },
                None,
            ),
            Self::ViewStatus {
                cursor: RoomCursor::Back,
            } => (
                Self::MainMenu {
                    option: MainOption::ViewStatus,
                },
                None,
            ),
            Self::ViewStatus { .. } => (self, None),
            Self::ChangeMenu {
                cursor: RoomCursor::Back,
            } => (
                Self::MainMenu {
                    option: MainOption::MakeChanges,
                },
                None,
            ),
            Self::ChangeMenu {
                cursor: RoomCursor::Room(room),
            } => (
                Self::RoomSettings {
                    room,
                    option: SettingsOption::default(),
                },
                None,
            ),
            Self::RoomSettings { room, option } => match option {
                SettingsOption::Light => (Self::AdjustLight { room }, None),
                SettingsOption::Temperature => (Self::AdjustTemperature { room }, None),
                SettingsOption::Back => (
                    Self::ChangeMenu {
                        cursor: RoomCursor::Room(room),
                    },
                    None,
                ),
            },
            Self::AdjustLight { room } => {
                store.toggle_light(room);
                (
                    Self::RoomSettings {
                        room,
                        option: SettingsOption::Light,
                    },
                    Some(room),
                )
            }
            Self::AdjustTemperature { room } => (
                Self::RoomSettings {
                    room,
                    option: SettingsOption::Temperature,
                },
                None,
            ),
        }
    }
}

/// Outcome of one button edge.
///
/// Every transition needs a redraw, including ones that leave the screen
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: MenuState,
    pub to: MenuState,
    /// Room whose state was edited and must be published.
    pub publish: Option<RoomId>,
}

/// Owner of the active [`MenuState`].
#[derive(Debug, Clone, Default)]
pub struct MenuEngine {
    state: MenuState,
}

impl MenuEngine {
    /// Start on the main menu with the first option selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active screen.
    #[must_use]
    pub fn state(&self) -> &MenuState {
        &self.state
    }

    /// Apply one button edge, editing `store` when the screen calls for it.
    pub fn press(&mut self, button: Button, store: &mut RoomStore) -> Transition {
        let from = self.state;
        let (to, publish) = match button {
            Button::Select => from.select(store),
            Button::Confirm => from.confirm(store),
        };
        self.state = to;
        Transition { from, to, publish }
    }
}
