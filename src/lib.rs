//! An MQTT switch which announces itself to Home Assistant through MQTT discovery and echoes
//! received commands back as its state.

pub mod connector;
pub mod model;
pub mod reactor;
