//! Layer 1 framing for XGMII.
//!
//! Responsibilities:
//! - Pad raw frames, prepend preamble/SFD, append CRC-32
//! - Validate and strip received wire frames
//!
//! Non-responsibilities:
//! - Lane packing
//! - Clocking

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{
    Deframed,
    Diagnostic,
    FramingError,
};
pub use encode::{frame, pad_payload};
pub use decode::{deframe, deframe_strict};
