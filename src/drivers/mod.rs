//! Hardware initialisation and raw peripheral helpers.

pub mod dht;
pub mod hw_init;
