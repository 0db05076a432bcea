//! Screen layout: the text a menu state shows on the character display.
//!
//! The display is a 128×64 panel driven as 8 text rows of 16 characters.
//! Renderers receive the rows produced here and only have to draw them.

use crate::menu::{MainOption, MenuState, RoomCursor, SettingsOption};
use crate::room::{ROOM_COUNT, Room, RoomId};
use crate::room_store::RoomStore;

/// Number of text rows on the display.
pub const ROWS: usize = 8;

/// One line of text placed on a display row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub row: usize,
    pub text: String,
    /// Drawn inverted.
    pub highlighted: bool,
}

impl Line {
    fn new(row: usize, text: impl Into<String>, highlighted: bool) -> Self {
        Self {
            row,
            text: text.into(),
            highlighted,
        }
    }
}

fn on_off(light_on: bool) -> &'static str {
    if light_on { "ON" } else { "OFF" }
}

fn status_line(room: RoomId, state: Room) -> String {
    format!(
        "Room {}: {}, {}C",
        room.number(),
        on_off(state.light_on),
        state.temperature
    )
}

/// Lay out the lines for `state`, reading room values from `rooms`.
#[must_use]
pub fn layout(state: &MenuState, rooms: &RoomStore) -> Vec<Line> {
    match *state {
        MenuState::MainMenu { option } => vec![
            Line::new(0, "1. View status", option == MainOption::ViewStatus),
            Line::new(1, "2. Make changes", option == MainOption::MakeChanges),
        ],
        MenuState::ViewStatus { cursor } => {
            let mut lines: Vec<Line> = rooms
                .iter()
                .map(|(id, room)| {
                    Line::new(
                        id.index(),
                        status_line(id, room),
                        cursor == RoomCursor::Room(id),
                    )
                })
                .collect();
            lines.push(Line::new(ROOM_COUNT, "Back", cursor == RoomCursor::Back));
            lines
        }
        MenuState::ChangeMenu { cursor } => {
            let mut lines: Vec<Line> = RoomId::all()
                .map(|id| {
                    let selected = cursor == RoomCursor::Room(id);
                    let marker = if selected { "->" } else { "  " };
                    Line::new(id.index(), format!("{marker} Room {}", id.number()), selected)
                })
                .collect();
            lines.push(Line::new(ROOM_COUNT, "Back", cursor == RoomCursor::Back));
            lines
        }
        MenuState::RoomSettings { room, option } => vec![
            Line::new(0, room.to_string(), false),
            Line::new(1, "1. Light", option == SettingsOption::Light),
            Line::new(2, "2. Temperature", option == SettingsOption::Temperature),
            Line::new(3, "3. Back", option == SettingsOption::Back),
        ],
        MenuState::AdjustLight { room } => vec![
            Line::new(0, format!("Light: {}", on_off(rooms.get(room).light_on)), false),
            Line::new(2, "Right button: OK", false),
        ],
        MenuState::AdjustTemperature { room } => vec![
            Line::new(
                0,
                format!("Temperature: {}C", rooms.get(room).temperature),
                false,
            ),
            Line::new(2, "Left button: +", false),
            Line::new(3, "Right button: OK", false),
        ],
    }
}
