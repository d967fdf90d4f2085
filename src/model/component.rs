/// Home Assistant platform an entity is announced under.
#[derive(Copy, Clone, Eq, PartialEq, Debug, strum::AsRefStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Component {
    Switch,
}
