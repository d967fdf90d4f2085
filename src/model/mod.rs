mod component;
mod discovery;
mod id;
mod identity;
mod state;

pub use component::*;
pub use discovery::*;
pub use id::*;
pub use identity::*;
pub use state::*;

/// The device an entity belongs to
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Device {
    /// A single identifier, rendered as a plain string rather than a list.
    pub identifiers: String,

    pub name: String,
    pub manufacturer: String,
    pub model: String,
}
