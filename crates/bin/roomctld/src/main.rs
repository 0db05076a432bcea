//! # roomctld: room panel daemon
//!
//! Composition root that wires the controller to a transport, the console
//! display and the keyboard.
//!
//! ## Responsibilities
//! - Load configuration (`roomctl.toml`, env vars)
//! - Initialise logging
//! - Start the MQTT client, or the loopback broker in demo mode
//! - Spawn the keyboard reader and the input poller
//! - Run the controller until Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::io::{self, BufReader};

use anyhow::Context;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use roomctl_adapter_console::{ConsoleRenderer, KeyboardFeed, keyboard};
use roomctl_adapter_loopback::LoopbackBroker;
use roomctl_app::controller::{Controller, ControllerEvent};
use roomctl_app::input_poller::InputPoller;
use roomctl_app::ports::{Renderer, SyncChannel};
use roomctl_app::sync_engine::SyncEngine;
use roomctl_domain::topic::RoomTopics;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    let filter = EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("invalid log filter {:?}", config.logging.filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let (events, queue) = mpsc::channel(config.controller.queue_capacity);
    let renderer = ConsoleRenderer::new(io::stdout());
    let topics = RoomTopics::new(config.mqtt.base_topic.clone());

    let feed = KeyboardFeed::default();
    let poller = InputPoller::new(feed.buttons(), config.poll_interval());
    let input = tokio::spawn(poller.run(events.clone()));
    let _keyboard = std::thread::Builder::new()
        .name("keyboard".to_string())
        .spawn(move || {
            if let Err(err) = keyboard::read_commands(BufReader::new(io::stdin()), &feed) {
                tracing::warn!(%err, "keyboard input failed");
            }
        })
        .context("failed to spawn keyboard thread")?;

    if config.integrations.mqtt_enabled {
        let (channel, transport) = roomctl_adapter_mqtt::start(&config.mqtt, events);
        serve(Controller::new(SyncEngine::new(channel, topics), renderer), queue).await;
        transport.abort();
    } else {
        tracing::info!("MQTT disabled, using the loopback broker");
        let broker = LoopbackBroker::new(events);
        broker.connect().context("failed to connect the loopback broker")?;
        serve(Controller::new(SyncEngine::new(broker, topics), renderer), queue).await;
    }

    input.abort();
    tracing::info!("roomctld stopped");
    Ok(())
}

/// Run the controller until its queue closes or Ctrl-C is received.
async fn serve<C, R>(controller: Controller<C, R>, queue: mpsc::Receiver<ControllerEvent>)
where
    C: SyncChannel,
    R: Renderer,
{
    tracing::info!("roomctld started, type s (select) or c (confirm)");
    tokio::select! {
        _ = controller.run(queue) => {}
        signal = tokio::signal::ctrl_c() => match signal {
            Ok(()) => tracing::info!("shutdown requested"),
            Err(err) => tracing::warn!(%err, "failed to listen for shutdown signal"),
        },
    }
}
