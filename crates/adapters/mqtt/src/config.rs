//! MQTT transport configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the MQTT sync channel.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// MQTT broker hostname or IP address.
    pub broker_host: String,
    /// MQTT broker port.
    pub broker_port: u16,
    /// MQTT client identifier.
    pub client_id: String,
    /// Topic root; rooms live under `<base_topic>/room/<N>`.
    pub base_topic: String,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u16,
    /// Pause after a connection error before the next attempt, in seconds.
    pub reconnect_delay_secs: u16,
    /// Number of outgoing requests buffered before publishes are refused.
    pub request_capacity: usize,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_host: "mqtt.eclipseprojects.io".to_string(),
            broker_port: 1883,
            client_id: "roomctl".to_string(),
            base_topic: "home".to_string(),
            keep_alive_secs: 30,
            reconnect_delay_secs: 5,
            request_capacity: 16,
        }
    }
}

impl MqttConfig {
    /// Keep-alive as a [`Duration`].
    #[must_use]
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(u64::from(self.keep_alive_secs))
    }

    /// Reconnect delay as a [`Duration`].
    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(u64::from(self.reconnect_delay_secs))
    }
}
