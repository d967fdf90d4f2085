use rumqttc::{AsyncClient, QoS};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("serialization failure")]
    Serialization(#[from] serde_json::Error),
    #[error("client error")]
    Client(#[from] rumqttc::ClientError),
}

/// Requests a reaction may send to the broker.
///
/// Implementations must only queue the request, not wait for it to be acknowledged. The
/// acknowledgement arrives later as its own event.
pub trait Transport {
    fn publish(&self, topic: &str, payload: &[u8], qos: QoS, retain: bool)
        -> Result<(), ClientError>;

    fn subscribe(&self, topic: &str, qos: QoS) -> Result<(), ClientError>;
}

#[derive(Clone)]
pub struct Client {
    pub mqtt: AsyncClient,
}

impl Transport for Client {
    fn publish(
        &self,
        topic: &str,
        payload: &[u8],
        qos: QoS,
        retain: bool,
    ) -> Result<(), ClientError> {
        log::debug!("Publish on {topic} (retain: {retain}): {} bytes", payload.len());

        self.mqtt
            .try_publish(topic, qos, retain, payload.to_vec())
            .inspect_err(|err| {
                log::warn!("failed to publish to {topic}: {err}");
            })?;

        Ok(())
    }

    fn subscribe(&self, topic: &str, qos: QoS) -> Result<(), ClientError> {
        log::info!("Subscribing to: {topic}");
        self.mqtt.try_subscribe(topic, qos)?;

        Ok(())
    }
}
