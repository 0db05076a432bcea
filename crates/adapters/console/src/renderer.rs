//! Text renderer for the character display.

use std::io::Write;

use roomctl_app::ports::Renderer;
use roomctl_domain::menu::MenuState;
use roomctl_domain::room_store::RoomStore;
use roomctl_domain::screen::{self, ROWS};

/// Draws each frame as [`ROWS`] lines of text under a title bar.
pub struct ConsoleRenderer<W> {
    out: W,
    frames: usize,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    /// Number of frames successfully written.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// The underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn frame(menu: &MenuState, rooms: &RoomStore) -> String {
        let mut rows = vec![String::new(); ROWS];
        for line in screen::layout(menu, rooms) {
            let Some(slot) = rows.get_mut(line.row) else {
                continue;
            };
            *slot = if line.highlighted {
                format!("[{}]", line.text)
            } else {
                format!(" {} ", line.text)
            };
        }
        let mut frame = format!("+--- {} ---\n", menu.name());
        for row in rows {
            frame.push('|');
            frame.push_str(row.trim_end());
            frame.push('\n');
        }
        frame
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, menu: &MenuState, rooms: &RoomStore) {
        let frame = Self::frame(menu, rooms);
        match self
            .out
            .write_all(frame.as_bytes())
            .and_then(|()| self.out.flush())
        {
            Ok(()) => self.frames += 1,
            Err(err) => tracing::warn!(%err, screen = menu.name(), "failed to draw frame"),
        }
    }
}
