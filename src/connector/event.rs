use crate::reactor::{ErrorDetail, SwitchEvent};
use rumqttc::{ConnectionError, Event, Incoming, StateError, TlsError};

/// Map an event of the MQTT event loop to the event the switch reacts to.
///
/// Outgoing packets and keep-alive traffic have no counterpart and yield `None`.
pub fn translate(event: Event) -> Option<SwitchEvent> {
    let Event::Incoming(incoming) = event else {
        return None;
    };

    Some(match incoming {
        Incoming::ConnAck(_) => SwitchEvent::Connected,
        Incoming::Disconnect => SwitchEvent::Disconnected,
        Incoming::SubAck(ack) => SwitchEvent::Subscribed {
            message_id: ack.pkid,
        },
        Incoming::UnsubAck(ack) => SwitchEvent::Unsubscribed {
            message_id: ack.pkid,
        },
        Incoming::PubAck(ack) => SwitchEvent::Published {
            message_id: ack.pkid,
        },
        Incoming::Publish(publish) => SwitchEvent::Data {
            topic: publish.topic,
            payload: publish.payload,
        },
        _ => return None,
    })
}

impl From<&ConnectionError> for ErrorDetail {
    fn from(err: &ConnectionError) -> Self {
        let message = err.to_string();
        match err {
            ConnectionError::Io(io) | ConnectionError::MqttState(StateError::Io(io)) => {
                Self::Transport {
                    errno: io.raw_os_error(),
                    tls: None,
                    message,
                }
            }
            ConnectionError::Tls(tls @ TlsError::Io(io)) => Self::Transport {
                errno: io.raw_os_error(),
                tls: Some(tls.to_string()),
                message,
            },
            ConnectionError::Tls(tls) => Self::Transport {
                errno: None,
                tls: Some(tls.to_string()),
                message,
            },
            ConnectionError::NetworkTimeout | ConnectionError::FlushTimeout => Self::Transport {
                errno: None,
                tls: None,
                message,
            },
            _ => Self::Other { message },
        }
    }
}
