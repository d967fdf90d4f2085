/// The two states a switch reports, and the vocabulary it accepts as commands.
#[derive(
    Copy, Clone, Eq, PartialEq, Debug, strum::AsRefStr, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    pub fn payload(&self) -> &[u8] {
        self.as_ref().as_bytes()
    }
}
