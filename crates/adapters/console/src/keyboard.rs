//! Keyboard input: typed commands become button presses.
//!
//! | Command | Button |
//! |---------|--------|
//! | `s`, `select` | select (left) |
//! | `c`, `confirm`, `ok` | confirm (right) |
//!
//! Commands are case-insensitive. Anything else is ignored with a warning.

use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use roomctl_app::ports::ButtonSource;
use roomctl_domain::input::ButtonLevels;
use roomctl_domain::menu::Button;

/// Map one typed command to a button.
#[must_use]
pub fn parse_command(line: &str) -> Option<Button> {
    match line.trim().to_ascii_lowercase().as_str() {
        "s" | "select" => Some(Button::Select),
        "c" | "confirm" | "ok" => Some(Button::Confirm),
        _ => None,
    }
}

#[derive(Default)]
struct Latch {
    queued: VecDeque<Button>,
    held: bool,
}

/// Writer side of the latch; cheap to clone.
#[derive(Clone, Default)]
pub struct KeyboardFeed {
    latch: Arc<Mutex<Latch>>,
}

impl KeyboardFeed {
    /// Queue a press of `button`.
    pub fn press(&self, button: Button) {
        lock(&self.latch).queued.push_back(button);
    }

    /// The button source sampling this feed.
    #[must_use]
    pub fn buttons(&self) -> KeyboardButtons {
        KeyboardButtons {
            latch: Arc::clone(&self.latch),
        }
    }
}

/// [`ButtonSource`] replaying queued presses.
///
/// Each press is held for one sample and released on the next, so two presses
/// of the same button still produce two edges.
pub struct KeyboardButtons {
    latch: Arc<Mutex<Latch>>,
}

impl ButtonSource for KeyboardButtons {
    fn levels(&mut self) -> ButtonLevels {
        let mut latch = lock(&self.latch);
        if std::mem::take(&mut latch.held) {
            return ButtonLevels::default();
        }
        match latch.queued.pop_front() {
            Some(button) => {
                latch.held = true;
                ButtonLevels {
                    select: button == Button::Select,
                    confirm: button == Button::Confirm,
                }
            }
            None => ButtonLevels::default(),
        }
    }
}

fn lock(latch: &Mutex<Latch>) -> MutexGuard<'_, Latch> {
    latch.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Read commands line by line until end of input.
///
/// Blocks the calling thread; run it on a dedicated one for stdin.
///
/// # Errors
///
/// Returns the underlying I/O error if reading fails.
pub fn read_commands<R: BufRead>(reader: R, feed: &KeyboardFeed) -> std::io::Result<()> {
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Some(button) => feed.press(button),
            None => tracing::warn!(command = %line.trim(), "unknown command, use s or c"),
        }
    }
    tracing::debug!("keyboard input closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use roomctl_app::input_poller::InputPoller;

    use super::*;

    #[test]
    fn should_parse_select_and_confirm_aliases() {
        assert_eq!(parse_command("s"), Some(Button::Select));
        assert_eq!(parse_command(" SELECT \n"), Some(Button::Select));
        assert_eq!(parse_command("c"), Some(Button::Confirm));
        assert_eq!(parse_command("confirm"), Some(Button::Confirm));
        assert_eq!(parse_command("Ok"), Some(Button::Confirm));
    }

    #[test]
    fn should_ignore_unknown_commands() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("x"), None);
        assert_eq!(parse_command("select all"), None);
    }

    #[test]
    fn should_report_released_when_nothing_queued() {
        let mut buttons = KeyboardFeed::default().buttons();
        assert_eq!(buttons.levels(), ButtonLevels::default());
    }

    #[test]
    fn should_hold_press_for_one_sample() {
        let feed = KeyboardFeed::default();
        let mut buttons = feed.buttons();
        feed.press(Button::Confirm);
        assert_eq!(
            buttons.levels(),
            ButtonLevels {
                select: false,
                confirm: true
            }
        );
        assert_eq!(buttons.levels(), ButtonLevels::default());
        assert_eq!(buttons.levels(), ButtonLevels::default());
    }

    #[test]
    fn should_turn_repeated_presses_into_separate_edges() {
        let feed = KeyboardFeed::default();
        feed.press(Button::Select);
        feed.press(Button::Select);
        feed.press(Button::Confirm);
        let mut poller = InputPoller::new(feed.buttons(), std::time::Duration::from_millis(10));

        let edges: Vec<Button> = (0..8).flat_map(|_| poller.poll_once()).collect();
        assert_eq!(edges, vec![Button::Select, Button::Select, Button::Confirm]);
    }

    #[test]
    fn should_queue_commands_read_from_input() {
        let feed = KeyboardFeed::default();
        let input: &[u8] = b"s\n\nnope\nok\n";
        read_commands(input, &feed).unwrap();

        let mut buttons = feed.buttons();
        assert!(buttons.levels().select);
        assert_eq!(buttons.levels(), ButtonLevels::default());
        assert!(buttons.levels().confirm);
        assert_eq!(buttons.levels(), ButtonLevels::default());
    }
}
