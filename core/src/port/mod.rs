//! Bus port adapters.
//!
//! The engines never touch a clock or a signal directly. [`BusPort`] is the
//! collaborator they are run against: drive a packed value, sample the
//! current value, and suspend until the next clock edge.
//!
//! - [`XgmiiDriver`] runs a [`TransmitEngine`](crate::tx::TransmitEngine)
//! - [`XgmiiMonitor`] runs a [`ReceiveEngine`](crate::rx::ReceiveEngine)
//! - [`WordTrace`], [`ReplayPort`] and [`channel_pair`] are in-memory ports

pub mod driver;
pub mod monitor;
pub mod trace;

use thiserror::Error;

pub use driver::XgmiiDriver;
pub use monitor::XgmiiMonitor;
pub use trace::{channel_pair, ChannelDrivePort, ChannelSamplePort, ReplayPort, WordTrace};

pub trait BusPort {
    /// Set the value presented on the bus from the next edge on.
    fn drive(&mut self, value: u128);

    /// Value currently on the bus.
    fn sample(&mut self) -> u128;

    /// Block until the next rising clock edge.
    fn wait_edge(&mut self) -> Result<(), PortError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("clock stopped")]
    ClockStopped,

    #[error("bus port error: {0}")]
    Other(String),
}
