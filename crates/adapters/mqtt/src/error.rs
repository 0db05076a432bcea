//! MQTT adapter error types.

use roomctl_app::ports::ChannelError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The rumqttc client refused a request (queue full or event loop gone).
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),
}

impl MqttError {
    /// Convert into a [`ChannelError`] for propagation across the port
    /// boundary.
    #[must_use]
    pub fn into_channel(self) -> ChannelError {
        ChannelError::Rejected(Box::new(self))
    }
}

impl From<MqttError> for ChannelError {
    fn from(err: MqttError) -> Self {
        err.into_channel()
    }
}

impl From<rumqttc::ClientError> for MqttError {
    fn from(err: rumqttc::ClientError) -> Self {
        Self::Client(err)
    }
}
