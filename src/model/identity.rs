use rand::Rng;
use std::fmt::Formatter;
use std::str::FromStr;

/// Length of a hardware (MAC) address in bytes.
pub const ADDRESS_LEN: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("invalid hex encoding: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("expected {ADDRESS_LEN} bytes, got {0}")]
    Length(usize),
}

/// The hardware address of this device.
///
/// It namespaces the discovery topic and is used as both the `unique_id` of the switch and the
/// identifier of its device, so announcements of different units never collide. Rendered as
/// twelve uppercase hex digits without separators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeviceIdentity([u8; ADDRESS_LEN]);

impl DeviceIdentity {
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Generate a random, locally administered unicast address.
    pub fn random() -> Self {
        let mut bytes: [u8; ADDRESS_LEN] = rand::thread_rng().gen();
        bytes[0] = (bytes[0] | 0x02) & !0x01;
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl std::fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

/// Accepts `AABBCCDDEEFF`, `AA:BB:CC:DD:EE:FF` and `AA-BB-CC-DD-EE-FF`, in either case.
impl FromStr for DeviceIdentity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ':' | '-'))
            .collect();

        let bytes = hex::decode(digits)?;
        let bytes: [u8; ADDRESS_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| IdentityError::Length(bytes.len()))?;

        Ok(Self(bytes))
    }
}
