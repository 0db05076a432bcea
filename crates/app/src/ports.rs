//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the controller and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod button_source;
pub mod renderer;
pub mod sync_channel;

pub use button_source::ButtonSource;
pub use renderer::Renderer;
pub use sync_channel::{ChannelError, ChannelEvent, Delivery, SyncChannel};
