//! Renderer port: draws the active screen.

use roomctl_domain::menu::MenuState;
use roomctl_domain::room_store::RoomStore;

/// Consumer of state snapshots. Never mutates state.
///
/// Drawing failures are the renderer's own concern; the controller does not
/// retry a frame.
pub trait Renderer {
    /// Draw `menu` using the values in `rooms`.
    fn render(&mut self, menu: &MenuState, rooms: &RoomStore);
}
