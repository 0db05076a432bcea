//! Edge detection over sampled button levels.

use crate::menu::Button;

/// Sampled level of both buttons at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonLevels {
    pub select: bool,
    pub confirm: bool,
}

/// Reports a press once per released→pressed transition.
///
/// Holding a button yields nothing further; it must be released and pressed
/// again. Both buttons start released.
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    last: ButtonLevels,
}

impl EdgeDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a new sample and return the edges it contains, select first.
    pub fn sample(&mut self, levels: ButtonLevels) -> impl Iterator<Item = Button> + use<> {
        let select = levels.select && !self.last.select;
        let confirm = levels.confirm && !self.last.confirm;
        self.last = levels;
        [
            select.then_some(Button::Select),
            confirm.then_some(Button::Confirm),
        ]
        .into_iter()
        .flatten()
    }
}
