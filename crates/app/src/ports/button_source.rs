//! Button source port: raw, already debounced button levels.

use roomctl_domain::input::ButtonLevels;

/// Samples the current level of both buttons.
pub trait ButtonSource {
    /// Read both buttons now. `true` means pressed.
    fn levels(&mut self) -> ButtonLevels;
}
