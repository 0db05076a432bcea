//! Controller: the single owner of the room table and the menu.
//!
//! Button edges and transport notifications are funnelled into one bounded
//! queue. The controller task drains it and handles one event at a time, so a
//! menu transition and an inbound update can never interleave and the
//! renderer never sees a half-applied change.
//!
//! Redraws:
//! - a button edge is drawn before the next event is taken from the queue
//! - inbound updates to a visible room only mark the screen dirty; the frame
//!   is drawn once the queue is drained, so a burst of retained messages
//!   after a reconnect costs a single render

use tokio::sync::mpsc;

use roomctl_domain::menu::{Button, MenuEngine, MenuState};
use roomctl_domain::room_store::RoomStore;

use crate::ports::{ChannelEvent, Renderer, SyncChannel};
use crate::sync_engine::SyncEngine;

/// Everything the controller reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    Button(Button),
    Channel(ChannelEvent),
}

impl From<Button> for ControllerEvent {
    fn from(button: Button) -> Self {
        Self::Button(button)
    }
}

impl From<ChannelEvent> for ControllerEvent {
    fn from(event: ChannelEvent) -> Self {
        Self::Channel(event)
    }
}

/// Owns the room table, the menu, the sync engine and the renderer.
pub struct Controller<C, R> {
    rooms: RoomStore,
    menu: MenuEngine,
    sync: SyncEngine<C>,
    renderer: R,
    redraw_pending: bool,
}

impl<C: SyncChannel, R: Renderer> Controller<C, R> {
    /// Start with every room at its default state on the main menu.
    pub fn new(sync: SyncEngine<C>, renderer: R) -> Self {
        tracing::info!("rooms initialized with default values");
        Self {
            rooms: RoomStore::new(),
            menu: MenuEngine::new(),
            sync,
            renderer,
            // The first frame is drawn before any event arrives.
            redraw_pending: true,
        }
    }

    /// Current room table.
    pub fn rooms(&self) -> &RoomStore {
        &self.rooms
    }

    /// Active screen.
    pub fn menu(&self) -> &MenuState {
        self.menu.state()
    }

    /// The sync engine, for inspecting the transport.
    pub fn sync(&self) -> &SyncEngine<C> {
        &self.sync
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Whether a frame is owed to the renderer.
    pub fn redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    /// Handle one event.
    pub fn handle(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::Button(button) => self.on_button(button),
            ControllerEvent::Channel(ChannelEvent::Connected) => {
                tracing::info!("sync channel connected");
                if let Err(err) = self.sync.on_channel_connected() {
                    tracing::warn!(%err, "room subscriptions incomplete");
                }
            }
            ControllerEvent::Channel(ChannelEvent::Message { topic, payload }) => {
                match self
                    .sync
                    .on_message(&mut self.rooms, self.menu.state(), &topic, &payload)
                {
                    Ok(applied) => self.redraw_pending |= applied.redraw,
                    Err(err) => {
                        tracing::warn!(
                            %err,
                            %topic,
                            payload = %String::from_utf8_lossy(&payload),
                            "inbound message dropped"
                        );
                    }
                }
            }
        }
    }

    fn on_button(&mut self, button: Button) {
        let transition = self.menu.press(button, &mut self.rooms);
        tracing::debug!(
            ?button,
            from = transition.from.name(),
            to = transition.to.name(),
            "menu transition"
        );
        if let Some(room) = transition.publish {
            if let Err(err) = self.sync.publish(&self.rooms, room) {
                tracing::warn!(%err, room = room.number(), "failed to publish room state");
            }
        }
        self.redraw_pending = true;
        self.flush_redraw();
    }

    /// Draw a frame if one is owed. Returns whether a frame was drawn.
    pub fn flush_redraw(&mut self) -> bool {
        if !std::mem::take(&mut self.redraw_pending) {
            return false;
        }
        self.renderer.render(self.menu.state(), &self.rooms);
        true
    }

    /// Consume events until every sender is dropped, then hand the
    /// controller back.
    pub async fn run(mut self, mut events: mpsc::Receiver<ControllerEvent>) -> Self {
        self.flush_redraw();
        while let Some(event) = events.recv().await {
            self.handle(event);
            while let Ok(event) = events.try_recv() {
                self.handle(event);
            }
            self.flush_redraw();
        }
        tracing::info!("controller event queue closed");
        self
    }
}

#[cfg(test)]
mod tests {
    use roomctl_domain::menu::{MainOption, RoomCursor, SettingsOption};
    use roomctl_domain::room::{Room, RoomId, TEMP_MAX, TEMP_MIN};
    use roomctl_domain::topic::RoomTopics;

    use super::*;
    use crate::ports::Delivery;
    use crate::sync_engine::tests::{RecordingChannel, Request};

    /// Keeps every frame it was asked to draw.
    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<(MenuState, RoomStore)>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, menu: &MenuState, rooms: &RoomStore) {
            self.frames.push((*menu, rooms.clone()));
        }
    }

    type TestController = Controller<RecordingChannel, RecordingRenderer>;

    fn controller() -> TestController {
        let sync = SyncEngine::new(RecordingChannel::default(), RoomTopics::default());
        let mut controller = Controller::new(sync, RecordingRenderer::default());
        controller.flush_redraw();
        controller
    }

    fn room(index: usize) -> RoomId {
        RoomId::from_index(index).unwrap()
    }

    fn press(controller: &mut TestController, buttons: &[Button]) {
        for button in buttons {
            controller.handle(ControllerEvent::Button(*button));
        }
    }

    fn message(topic: &str, payload: &str) -> ControllerEvent {
        ChannelEvent::Message {
            topic: topic.to_string(),
            payload: payload.as_bytes().to_vec(),
        }
        .into()
    }

    fn frames(controller: &TestController) -> usize {
        controller.renderer().frames.len()
    }

    /// MainMenu -> ChangeMenu -> RoomSettings(room 1) -> AdjustTemperature.
    const TO_TEMPERATURE: [Button; 5] = [
        Button::Select,
        Button::Confirm,
        Button::Confirm,
        Button::Select,
        Button::Confirm,
    ];

    #[test]
    fn should_draw_initial_screen_once() {
        let mut controller = controller();
        assert_eq!(frames(&controller), 1);
        assert!(!controller.flush_redraw());
        assert_eq!(controller.renderer().frames[0].0, MenuState::default());
    }

    #[test]
    fn should_draw_after_every_button_edge() {
        let mut controller = controller();
        press(&mut controller, &[Button::Select, Button::Select, Button::Select]);
        assert_eq!(frames(&controller), 4);
        assert!(!controller.redraw_pending());
    }

    #[test]
    fn should_draw_even_when_edge_changes_nothing() {
        let mut controller = controller();
        press(&mut controller, &[Button::Select, Button::Confirm, Button::Confirm, Button::Confirm]);
        assert_eq!(*controller.menu(), MenuState::AdjustLight { room: room(0) });
        press(&mut controller, &[Button::Select]);
        assert_eq!(frames(&controller), 6);
    }

    #[test]
    fn should_subscribe_without_publishing_when_connected() {
        let mut controller = controller();
        controller.handle(ChannelEvent::Connected.into());
        let requests = controller.sync().channel().requests();
        assert_eq!(requests.len(), 4);
        assert!(requests.iter().all(|r| matches!(
            r,
            Request::Subscribe {
                delivery: Delivery::AtMostOnce,
                ..
            }
        )));
        assert!(!controller.redraw_pending());
    }

    #[test]
    fn should_publish_each_temperature_press() {
        let mut controller = controller();
        press(&mut controller, &TO_TEMPERATURE);
        assert_eq!(*controller.menu(), MenuState::AdjustTemperature { room: room(0) });
        assert!(controller.sync().channel().publishes().is_empty());

        let presses = usize::try_from(TEMP_MAX - TEMP_MIN + 1).unwrap();
        press(&mut controller, &vec![Button::Select; presses]);

        let payloads: Vec<String> = controller
            .sync()
            .channel()
            .publishes()
            .into_iter()
            .map(|r| match r {
                Request::Publish {
                    topic,
                    payload,
                    retained,
                    ..
                } => {
                    assert_eq!(topic, "home/room/1");
                    assert!(retained);
                    payload
                }
                Request::Subscribe { .. } => unreachable!(),
            })
            .collect();
        let mut expected: Vec<String> = (TEMP_MIN + 1..=TEMP_MAX)
            .map(|t| format!(r#"{{"light":0,"temperature":{t}}}"#))
            .collect();
        expected.push(format!(r#"{{"light":0,"temperature":{TEMP_MIN}}}"#));
        assert_eq!(payloads, expected);
    }

    #[test]
    fn should_publish_twice_and_restore_light_after_two_toggles() {
        let mut controller = controller();
        // MainMenu -> ChangeMenu -> RoomSettings(room 1), light option.
        press(&mut controller, &[Button::Select, Button::Confirm, Button::Confirm]);
        press(&mut controller, &[Button::Confirm, Button::Confirm]);
        assert!(controller.rooms().get(room(0)).light_on);
        press(&mut controller, &[Button::Confirm, Button::Confirm]);
        assert!(!controller.rooms().get(room(0)).light_on);

        let publishes = controller.sync().channel().publishes();
        assert_eq!(publishes.len(), 2);
        assert!(publishes.iter().all(|r| matches!(
            r,
            Request::Publish {
                retained: true,
                delivery: Delivery::AtLeastOnce,
                ..
            }
        )));
    }

    #[test]
    fn should_keep_menu_responsive_when_publish_fails() {
        let sync = SyncEngine::new(RecordingChannel::refusing(), RoomTopics::default());
        let mut controller = Controller::new(sync, RecordingRenderer::default());
        press(&mut controller, &TO_TEMPERATURE);
        press(&mut controller, &[Button::Select]);
        assert_eq!(controller.rooms().get(room(0)).temperature, TEMP_MIN + 1);
        assert_eq!(*controller.menu(), MenuState::AdjustTemperature { room: room(0) });
    }

    #[test]
    fn should_mark_redraw_for_visible_room_update() {
        let mut controller = controller();
        press(&mut controller, &TO_TEMPERATURE);
        let before = frames(&controller);

        controller.handle(message("home/room/1", r#"{"light":1,"temperature":27}"#));
        assert!(controller.redraw_pending());
        assert!(controller.flush_redraw());
        assert_eq!(frames(&controller), before + 1);

        let (menu, rooms) = controller.renderer().frames.last().unwrap();
        assert_eq!(*menu, MenuState::AdjustTemperature { room: room(0) });
        assert_eq!(rooms.get(room(0)), Room::new(true, 27));
    }

    #[test]
    fn should_not_redraw_for_hidden_room_update() {
        let mut controller = controller();
        press(&mut controller, &TO_TEMPERATURE);
        controller.handle(message("home/room/3", r#"{"light":1,"temperature":27}"#));
        assert!(!controller.redraw_pending());
        assert_eq!(controller.rooms().get(room(2)), Room::new(true, 27));
    }

    #[test]
    fn should_coalesce_redraws_for_a_burst_of_updates() {
        let mut controller = controller();
        press(&mut controller, &[Button::Confirm]);
        assert!(matches!(controller.menu(), MenuState::ViewStatus { .. }));
        let before = frames(&controller);

        for n in 1..=4 {
            controller.handle(message(
                &format!("home/room/{n}"),
                r#"{"light":1,"temperature":20}"#,
            ));
        }
        assert!(controller.flush_redraw());
        assert!(!controller.flush_redraw());
        assert_eq!(frames(&controller), before + 1);
    }

    #[test]
    fn should_ignore_malformed_message() {
        let mut controller = controller();
        controller.handle(message("home/room/2", r#"{"light":1}"#));
        controller.handle(message("home/room/9", r#"{"light":1,"temperature":20}"#));
        controller.handle(message("elsewhere", "garbage"));
        assert_eq!(*controller.rooms(), RoomStore::new());
        assert!(!controller.redraw_pending());
    }

    #[test]
    fn should_draw_remote_change_before_next_button_edge_is_seen() {
        let mut controller = controller();
        press(&mut controller, &[Button::Select, Button::Confirm]);
        assert_eq!(
            *controller.menu(),
            MenuState::ChangeMenu {
                cursor: RoomCursor::Room(room(0))
            }
        );
        controller.handle(message("home/room/1", r#"{"light":1,"temperature":21}"#));
        press(&mut controller, &[Button::Confirm]);

        let (menu, rooms) = controller.renderer().frames.last().unwrap();
        assert_eq!(
            *menu,
            MenuState::RoomSettings {
                room: room(0),
                option: SettingsOption::Light
            }
        );
        assert_eq!(rooms.get(room(0)), Room::new(true, 21));
        assert!(!controller.redraw_pending());
    }

    #[test]
    fn should_let_stale_echo_overwrite_local_edit() {
        let mut controller = controller();
        press(&mut controller, &TO_TEMPERATURE);
        press(&mut controller, &[Button::Select, Button::Select]);
        assert_eq!(controller.rooms().get(room(0)).temperature, TEMP_MIN + 2);

        // Retained value from before the edits, delivered late.
        controller.handle(message("home/room/1", r#"{"light":0,"temperature":15}"#));
        assert_eq!(controller.rooms().get(room(0)).temperature, TEMP_MIN);
    }

    #[tokio::test]
    async fn should_process_queued_events_and_return_when_senders_drop() {
        let sync = SyncEngine::new(RecordingChannel::default(), RoomTopics::default());
        let controller = Controller::new(sync, RecordingRenderer::default());
        let (tx, rx) = mpsc::channel(16);

        tx.send(ChannelEvent::Connected.into()).await.unwrap();
        tx.send(Button::Select.into()).await.unwrap();
        tx.send(message("home/room/2", r#"{"light":1,"temperature":23}"#))
            .await
            .unwrap();
        drop(tx);

        let controller = controller.run(rx).await;
        assert_eq!(
            *controller.menu(),
            MenuState::MainMenu {
                option: MainOption::MakeChanges
            }
        );
        assert_eq!(controller.rooms().get(room(1)), Room::new(true, 23));
        assert_eq!(controller.sync().channel().requests().len(), 4);
        // Initial frame plus the select edge; the update is not on screen.
        assert_eq!(frames(&controller), 2);
    }
}
