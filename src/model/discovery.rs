use crate::model::{Device, DeviceIdentity, SwitchState, Topics};

// also see: https://www.home-assistant.io/integrations/switch.mqtt/

pub const SWITCH_NAME: &str = "Khoatn9 MQTT Switch";
pub const DEVICE_NAME: &str = "Khoatn9 MQTT Device";
pub const MANUFACTURER: &str = "Khoatn9";
pub const MODEL: &str = "ESP32";

/// Discovery message of an MQTT switch
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct SwitchDiscovery {
    pub unique_id: String,
    pub name: String,

    pub state_topic: String,
    pub command_topic: String,

    /// Command payloads
    pub payload_on: String,
    pub payload_off: String,
    /// State payloads, kept apart from the command ones even though they match
    pub state_on: String,
    pub state_off: String,

    pub qos: u8,
    pub optimistic: bool,
    pub retain: bool,

    pub device: Device,
}

impl SwitchDiscovery {
    pub fn new(identity: &DeviceIdentity, topics: &Topics) -> Self {
        let id = identity.to_string();

        Self {
            unique_id: id.clone(),
            name: SWITCH_NAME.to_string(),
            state_topic: topics.state.clone(),
            command_topic: topics.command.clone(),
            payload_on: SwitchState::On.to_string(),
            payload_off: SwitchState::Off.to_string(),
            state_on: SwitchState::On.to_string(),
            state_off: SwitchState::Off.to_string(),
            qos: 1,
            optimistic: false,
            retain: true,
            device: Device {
                identifiers: id,
                name: DEVICE_NAME.to_string(),
                manufacturer: MANUFACTURER.to_string(),
                model: MODEL.to_string(),
            },
        }
    }

    /// Serialize into the payload published on the config topic.
    pub fn to_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn discovery() -> SwitchDiscovery {
        let identity = DeviceIdentity::from_bytes([0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        SwitchDiscovery::new(&identity, &Topics::new(&identity))
    }

    #[test]
    fn test_serde() {
        assert_eq!(
            serde_json::to_value(discovery()).unwrap(),
            json!({
                "unique_id": "010203040506",
                "name": "Khoatn9 MQTT Switch",
                "state_topic": "khoatn9/switch/state",
                "command_topic": "khoatn9/switch/command",
                "payload_on": "ON",
                "payload_off": "OFF",
                "state_on": "ON",
                "state_off": "OFF",
                "qos": 1,
                "optimistic": false,
                "retain": true,
                "device": {
                    "identifiers": "010203040506",
                    "name": "Khoatn9 MQTT Device",
                    "manufacturer": "Khoatn9",
                    "model": "ESP32",
                },
            })
        )
    }

    #[test]
    fn test_identity_is_shared() {
        let identity = DeviceIdentity::random();
        let topics = Topics::new(&identity);
        let discovery = SwitchDiscovery::new(&identity, &topics);

        let id = identity.to_string();
        assert_eq!(discovery.unique_id, id);
        assert_eq!(discovery.device.identifiers, id);
        assert_eq!(topics.config, format!("homeassistant/switch/{id}/config"));
    }

    #[test]
    fn test_payload_parses_back() {
        let discovery = discovery();
        let payload = discovery.to_payload().unwrap();
        let parsed: SwitchDiscovery = serde_json::from_slice(&payload).unwrap();
        assert_eq!(parsed, discovery);
    }
}
