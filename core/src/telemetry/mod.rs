//! telemetry/mod.rs
//! Deterministic link counters.

pub mod counters;

pub use counters::*;
