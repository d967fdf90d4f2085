use crate::model::{Component, DeviceIdentity};

/// Prefix Home Assistant watches for discovery messages.
pub const DISCOVERY_PREFIX: &str = "homeassistant";

/// Namespace of the switch's own command and state topics.
pub const NAMESPACE: &str = "khoatn9";

/// The topics one switch uses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topics {
    pub config: String,
    pub state: String,
    pub command: String,
}

impl Topics {
    pub fn new(identity: &DeviceIdentity) -> Self {
        let component = Component::Switch;
        Self {
            config: format!("{DISCOVERY_PREFIX}/{component}/{identity}/config"),
            state: format!("{NAMESPACE}/{component}/state"),
            command: format!("{NAMESPACE}/{component}/command"),
        }
    }
}
