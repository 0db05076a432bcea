//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `roomctl.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values.

use std::time::Duration;

use roomctl_adapter_mqtt::MqttConfig;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Broker connection and topic root.
    pub mqtt: MqttConfig,
    /// Controller queue settings.
    pub controller: ControllerConfig,
    /// Button sampling.
    pub input: InputConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Integration toggles.
    pub integrations: IntegrationsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Events buffered before producers wait.
    pub queue_capacity: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Button sampling period in milliseconds.
    pub poll_interval_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Per-integration toggles.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IntegrationsConfig {
    /// Use the MQTT broker; when off, an in-process loopback broker is used.
    pub mqtt_enabled: bool,
}

impl Config {
    /// Load configuration from `roomctl.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("roomctl.toml")?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Runs before logging is set up, so a bad value is an error rather
    /// than a warning nobody sees.
    fn apply_env_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = var("ROOMCTL_MQTT_HOST") {
            self.mqtt.broker_host = val;
        }
        if let Some(val) = var("ROOMCTL_MQTT_PORT") {
            self.mqtt.broker_port = val.parse().map_err(|_| {
                ConfigError::Validation(format!(
                    "ROOMCTL_MQTT_PORT must be a port number, got {val:?}"
                ))
            })?;
        }
        if let Some(val) = var("ROOMCTL_MQTT_CLIENT_ID") {
            self.mqtt.client_id = val;
        }
        if let Some(val) = var("ROOMCTL_TOPIC_ROOT") {
            self.mqtt.base_topic = val;
        }
        if let Some(val) = var("ROOMCTL_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.mqtt.broker_port == 0 {
            return Err(ConfigError::Validation(
                "mqtt broker port must be non-zero".to_string(),
            ));
        }
        if self.mqtt.reconnect_delay_secs == 0 {
            return Err(ConfigError::Validation(
                "mqtt reconnect delay must be non-zero".to_string(),
            ));
        }
        if self.mqtt.base_topic.is_empty() {
            return Err(ConfigError::Validation(
                "mqtt base topic must not be empty".to_string(),
            ));
        }
        if self.mqtt.base_topic.contains(['+', '#']) {
            return Err(ConfigError::Validation(format!(
                "mqtt base topic {:?} must not contain wildcards",
                self.mqtt.base_topic
            )));
        }
        if self.controller.queue_capacity == 0 {
            return Err(ConfigError::Validation(
                "controller queue capacity must be non-zero".to_string(),
            ));
        }
        if !(1..=100).contains(&self.input.poll_interval_ms) {
            return Err(ConfigError::Validation(format!(
                "input poll interval must be between 1 and 100 ms, got {}",
                self.input.poll_interval_ms
            )));
        }
        Ok(())
    }

    /// Button sampling period.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.input.poll_interval_ms)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self { queue_capacity: 32 }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "roomctld=info,roomctl=info".to_string(),
        }
    }
}

impl Default for IntegrationsConfig {
    fn default() -> Self {
        Self { mqtt_enabled: true }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
