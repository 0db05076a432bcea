//! # roomctl-domain
//!
//! Pure domain model for the roomctl room controller.
//!
//! ## Responsibilities
//! - Define **Rooms** (light flag + temperature) and the fixed room set
//! - Hold the authoritative [`RoomStore`](room_store::RoomStore)
//! - Define the **menu state machine** ([`MenuState`](menu::MenuState),
//!   [`MenuEngine`](menu::MenuEngine)) driven by two buttons
//! - Define the **sync wire format**: per-room topics and JSON payloads
//! - Describe what each screen shows on the character display
//! - Contain all invariant enforcement (temperature wrap, cursor wrap)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod input;
pub mod menu;
pub mod room;
pub mod room_store;
pub mod screen;
pub mod sync_message;
pub mod topic;
