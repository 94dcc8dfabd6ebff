//! xgmii-core
//!
//! XGMII bus codec: lane packing, layer 1 framing, and the cycle-by-cycle
//! transmit and receive state machines.
//! No simulator bindings; clocks and signals are injected through `port::BusPort`.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod config;
pub mod types;
pub mod utils;

pub mod bus;
pub mod framing;
pub mod telemetry;

// Engines
pub mod tx;
pub mod rx;

// Collaborator adapters
pub mod port;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::bus::{BusWidth, BusWordBuilder, ControlSymbol, Lane, Layout, PackedWord};
    pub use crate::config::BusConfig;
    pub use crate::framing::{deframe, frame, Deframed, Diagnostic, FramingError};
    pub use crate::port::{BusPort, XgmiiDriver, XgmiiMonitor};
    pub use crate::rx::{FrameDecoder, ReceiveEngine, ReceivedFrame, RxResult};
    pub use crate::telemetry::LinkCounters;
    pub use crate::tx::TransmitEngine;
    pub use crate::types::LinkError;
}
