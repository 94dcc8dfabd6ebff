//! Bus word codec.
//!
//! Responsibilities:
//! - Pack per-lane `(byte, control)` pairs into the bus signal value
//! - Unpack sampled values back into lanes
//!
//! Non-responsibilities:
//! - Framing
//! - Clocking

pub mod types;
pub mod word;

pub use types::{
    BusError,
    BusWidth,
    ControlSymbol,
    Lane,
    Layout,
};
pub use word::{BusWordBuilder, PackedWord};
