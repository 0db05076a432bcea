//! # roomctl-adapter-console
//!
//! Terminal stand-ins for the panel hardware.
//!
//! - [`ConsoleRenderer`] prints the display rows to any writer, framing the
//!   highlighted row with `[ ]`.
//! - [`keyboard`] turns typed commands into button presses. Commands are
//!   latched into a [`KeyboardButtons`] source, which the input poller samples
//!   like real buttons, so typed presses go through the same edge detection.
//!
//! ## Dependency rule
//!
//! Depends on `roomctl-app` (port traits) and `roomctl-domain` (screen layout).

pub mod keyboard;
mod renderer;

pub use keyboard::{KeyboardButtons, KeyboardFeed};
pub use renderer::ConsoleRenderer;
