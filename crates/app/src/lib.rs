//! # roomctl-app
//!
//! Application layer: the controller loop, the sync engine, and **port
//! definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement:
//!   - `SyncChannel`: publish/subscribe transport with retained delivery
//!   - `Renderer`: draws a snapshot of the menu and the room table
//!   - `ButtonSource`: samples the two physical buttons
//! - Bind the room table to the transport (`SyncEngine`)
//! - Own all mutable state in a single task (`Controller`) fed by one
//!   bounded queue, so button edges and inbound messages never interleave
//! - Turn sampled button levels into edges (`InputPoller`)
//!
//! ## Dependency rule
//! Depends on `roomctl-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod controller;
pub mod input_poller;
pub mod ports;
pub mod sync_engine;
