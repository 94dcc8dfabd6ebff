use thiserror::Error;

use crate::{
    bus::BusError,
    config::ConfigError,
    framing::FramingError,
    port::PortError,
    tx::TxError,
};

/// Unified link error covering bus, framing, transmit, port and config failures.
/// - `From<T>` impls enable `?` across the crate.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Lane index or bus width problem.
    #[error("bus error: {0}")]
    Bus(#[from] BusError),

    /// Received frame rejected.
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    #[error("transmit error: {0}")]
    Tx(#[from] TxError),

    /// Clock or signal collaborator failed.
    #[error("port error: {0}")]
    Port(#[from] PortError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
