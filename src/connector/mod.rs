mod client;
mod error;
mod event;
mod options;

pub use client::*;
pub use error::*;
pub use event::*;
pub use options::*;

use crate::reactor::{EventHandler, SwitchEvent};
use rand::{distributions::Alphanumeric, Rng};
use rumqttc::{AsyncClient, MqttOptions, TlsConfiguration, Transport as MqttTransport};

fn random_client_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(23)
        .map(char::from)
        .collect()
}

/// Drives the MQTT event loop and feeds its events to a handler.
pub struct Connector<H>
where
    H: EventHandler,
{
    options: ConnectorOptions,
    handler: H,
}

impl<H> Connector<H>
where
    H: EventHandler,
{
    pub fn new(options: ConnectorOptions, handler: H) -> Self {
        Self { options, handler }
    }

    fn mqtt_options(&self) -> MqttOptions {
        let client_id = self
            .options
            .client_id
            .clone()
            .unwrap_or_else(random_client_id);

        let mut mqttoptions =
            MqttOptions::new(client_id, self.options.host.clone(), self.options.port());
        mqttoptions.set_keep_alive(self.options.keep_alive);

        if self.options.tls {
            mqttoptions.set_transport(MqttTransport::Tls(TlsConfiguration::Native));
        }

        log::debug!("Options: {mqttoptions:#?}");

        mqttoptions.set_credentials(
            self.options.username.clone(),
            self.options.password.clone().unwrap_or_default(),
        );

        mqttoptions
    }

    /// Run until the task is dropped.
    ///
    /// Connection failures are reported to the handler, after which the event loop is polled
    /// again following the reconnect delay. `rumqttc` re-establishes the connection on that poll.
    pub async fn run(self) {
        let (mqtt, mut eventloop) = AsyncClient::new(self.mqtt_options(), 10);
        let client = Client { mqtt };

        log::info!(
            "Connecting to {}:{}",
            self.options.host,
            self.options.port()
        );

        loop {
            match eventloop.poll().await {
                Ok(event) => match translate(event) {
                    Some(event) => self.handler.handle(&client, event),
                    None => log::trace!("Skipping event"),
                },
                Err(err) => {
                    log::warn!("Connection failed: {err}");
                    self.handler
                        .handle(&client, SwitchEvent::Error((&err).into()));
                    self.handler.handle(&client, SwitchEvent::Disconnected);
                    tokio::time::sleep(self.options.reconnect_delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::DeviceIdentity;
    use crate::reactor::{ErrorDetail, Reactor};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Events(Arc<Mutex<Vec<SwitchEvent>>>);

    impl EventHandler for Events {
        fn handle<T: Transport>(&self, _transport: &T, event: SwitchEvent) {
            self.0.lock().unwrap().push(event);
        }
    }

    #[test]
    fn test_mqtt_options() {
        let mut options = ConnectorOptions::new("broker.local");
        options.client_id = Some("switch-1".into());
        options.password = Some("secret".into());
        options.keep_alive = Duration::from_secs(30);

        let connector = Connector::new(
            options,
            Reactor::new(DeviceIdentity::from_bytes([1, 2, 3, 4, 5, 6])),
        );
        let mqtt = connector.mqtt_options();

        assert_eq!(mqtt.client_id(), "switch-1");
        assert_eq!(
            mqtt.broker_address(),
            ("broker.local".to_string(), 1883)
        );
        assert_eq!(mqtt.keep_alive(), Duration::from_secs(30));
        assert_eq!(
            mqtt.credentials(),
            Some(("homeassistant".to_string(), "secret".to_string()))
        );
    }

    #[tokio::test]
    async fn test_failed_connection_is_reported_and_retried() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let mut options = ConnectorOptions::new("127.0.0.1");
        options.port = Some(port);
        options.reconnect_delay = Duration::from_millis(50);

        let events = Events::default();
        let connector = Connector::new(options, events.clone());

        let result = tokio::time::timeout(Duration::from_secs(1), connector.run()).await;
        assert!(result.is_err(), "run must keep polling");

        let events = events.0.lock().unwrap();
        assert!(events.len() >= 4, "expected repeated attempts: {events:?}");
        for pair in events.chunks(2) {
            assert!(
                matches!(pair[0], SwitchEvent::Error(ErrorDetail::Transport { .. })),
                "unexpected event: {:?}",
                pair[0]
            );
            if let Some(next) = pair.get(1) {
                assert_eq!(next, &SwitchEvent::Disconnected);
            }
        }
    }

    #[test]
    fn test_random_client_id() {
        let id = random_client_id();
        assert_eq!(id.len(), 23);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
