//! Transmit path: serializes one wire frame across bus words.

pub mod engine;

pub use engine::{TransmitEngine, TxError, TxState};
