//! Input poller: samples a button source at a fixed interval and feeds
//! press edges to the controller.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use roomctl_domain::input::EdgeDetector;
use roomctl_domain::menu::Button;

use crate::controller::ControllerEvent;
use crate::ports::ButtonSource;

/// Longest sampling period that still feels immediate.
pub const MAX_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Shortest sampling period; a timer cannot tick at zero.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Periodic sampler turning button levels into edges.
pub struct InputPoller<S> {
    source: S,
    detector: EdgeDetector,
    interval: Duration,
}

impl<S: ButtonSource> InputPoller<S> {
    /// Sample `source` every `interval`, clamped to
    /// [`MIN_POLL_INTERVAL`]..=[`MAX_POLL_INTERVAL`].
    pub fn new(source: S, interval: Duration) -> Self {
        Self {
            source,
            detector: EdgeDetector::new(),
            interval: interval.clamp(MIN_POLL_INTERVAL, MAX_POLL_INTERVAL),
        }
    }

    /// Sampling period in use.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Take one sample and return the edges it produced.
    pub fn poll_once(&mut self) -> Vec<Button> {
        self.detector.sample(self.source.levels()).collect()
    }

    /// Sample forever, stopping once the controller queue is closed.
    pub async fn run(mut self, events: mpsc::Sender<ControllerEvent>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            for button in self.poll_once() {
                tracing::debug!(?button, "button pressed");
                if events.send(button.into()).await.is_err() {
                    tracing::debug!("controller queue closed, input poller stopping");
                    return;
                }
            }
        }
    }
}
