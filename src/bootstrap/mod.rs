//! Process bootstrap: configuration loading, tracing setup and adapter
//! wiring.

pub mod config;
pub mod logging;
pub mod wiring;
