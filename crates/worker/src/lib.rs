//! Background worker: session TTL enforcement plus startup wiring for the
//! notification dispatcher.

pub mod config;
pub mod sweeper;
pub mod telemetry;
