//! Reactions of the switch to transport events.
//!
//! The [`Reactor`] carries nothing but the identity and the topics derived from it. Every
//! reaction works on request-scoped data, so events may be handled in any order and from any
//! task without coordination.

use crate::connector::Transport;
use crate::model::{DeviceIdentity, SwitchDiscovery, SwitchState, Topics};
use bytes::Bytes;
use rumqttc::QoS;
use std::str::FromStr;

/// Quality of service of every request the switch makes.
pub const QOS: QoS = QoS::AtLeastOnce;

/// Events the transport reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwitchEvent {
    Connected,
    Disconnected,
    Subscribed { message_id: u16 },
    Unsubscribed { message_id: u16 },
    Published { message_id: u16 },
    Data { topic: String, payload: Bytes },
    Error(ErrorDetail),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorDetail {
    /// Failure of the TCP/TLS connection.
    Transport {
        /// The OS error number of the socket, if any.
        errno: Option<i32>,
        /// Error reported by the TLS stack, if any.
        tls: Option<String>,
        message: String,
    },
    Other {
        message: String,
    },
}

/// Consumes transport events.
pub trait EventHandler {
    fn handle<T: Transport>(&self, transport: &T, event: SwitchEvent);
}

#[derive(Clone, Debug)]
pub struct Reactor {
    identity: DeviceIdentity,
    topics: Topics,
}

impl Reactor {
    pub fn new(identity: DeviceIdentity) -> Self {
        Self {
            topics: Topics::new(&identity),
            identity,
        }
    }

    pub fn topics(&self) -> &Topics {
        &self.topics
    }

    fn connected(&self, transport: &impl Transport) {
        let discovery = SwitchDiscovery::new(&self.identity, &self.topics);

        match discovery.to_payload() {
            Ok(payload) => {
                log::debug!("Discovery payload: {}", String::from_utf8_lossy(&payload));
                if self.publish(transport, &self.topics.config, &payload) {
                    log::info!("Announced switch on {}", self.topics.config);
                }
            }
            Err(err) => log::error!("Failed to encode discovery payload: {err}"),
        }

        if let Err(err) = transport.subscribe(&self.topics.command, QOS) {
            log::warn!("Failed to subscribe to {}: {err}", self.topics.command);
        }
    }

    /// Publish a retained message, returning whether the request was queued.
    fn publish(&self, transport: &impl Transport, topic: &str, payload: &[u8]) -> bool {
        match transport.publish(topic, payload, QOS, true) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Failed to publish to {topic}: {err}");
                false
            }
        }
    }

    fn update_state(&self, transport: &impl Transport, payload: &[u8]) {
        if self.publish(transport, &self.topics.state, payload) {
            log::info!(
                "Sent state to {}: {}",
                self.topics.state,
                String::from_utf8_lossy(payload)
            );
        }
    }

    fn data(&self, transport: &impl Transport, topic: &str, payload: &[u8]) {
        log::info!("Received on {topic}: {}", String::from_utf8_lossy(payload));

        if topic != self.topics.command {
            log::info!("Skipping unknown topic: {topic}");
            return;
        }

        let known = std::str::from_utf8(payload)
            .ok()
            .and_then(|s| SwitchState::from_str(s).ok())
            .is_some();
        if !known {
            log::debug!("Echoing payload outside of the ON/OFF vocabulary");
        }

        self.update_state(transport, payload);
    }
}

impl EventHandler for Reactor {
    fn handle<T: Transport>(&self, transport: &T, event: SwitchEvent) {
        match event {
            SwitchEvent::Connected => {
                log::info!("Connected");
                self.connected(transport);
            }
            SwitchEvent::Disconnected => log::info!("Disconnected"),
            SwitchEvent::Subscribed { message_id } => {
                log::info!("Subscribed, message id: {message_id}");
                self.update_state(transport, SwitchState::On.payload());
            }
            SwitchEvent::Unsubscribed { message_id } => {
                log::info!("Unsubscribed, message id: {message_id}")
            }
            SwitchEvent::Published { message_id } => {
                log::info!("Published, message id: {message_id}")
            }
            SwitchEvent::Data { topic, payload } => self.data(transport, &topic, &payload),
            SwitchEvent::Error(detail) => log_error(&detail),
        }
    }
}

fn log_error(detail: &ErrorDetail) {
    match detail {
        ErrorDetail::Transport {
            errno,
            tls,
            message,
        } => {
            log::warn!("Transport error: {message}");
            if let Some(tls) = tls {
                log::error!("Last error reported from tls stack: {tls}");
            }
            if let Some(errno) = errno.filter(|errno| *errno != 0) {
                log::error!("Last error captured as transport's socket errno: 0x{errno:x}");
                log::info!(
                    "Last errno string ({})",
                    std::io::Error::from_raw_os_error(errno)
                );
            }
        }
        ErrorDetail::Other { message } => log::warn!("Error: {message}"),
    }
}
