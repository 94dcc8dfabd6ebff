//! constants.rs
//! Fixed protocol constants for the XGMII link.
//!
//! None of these are configurable: the bus width and layout live in
//! [`crate::config::BusConfig`], everything else is pinned by the protocol.

/// Preamble (six 0x55) followed by the start-of-frame delimiter.
///
/// Strictly the preamble is seven 0x55 bytes, but the START control
/// character is allowed to replace the first of them on the bus.
pub const PREAMBLE_SFD: [u8; 7] = [0x55, 0x55, 0x55, 0x55, 0x55, 0x55, 0xD5];
pub const PREAMBLE_LEN: usize = PREAMBLE_SFD.len();

/// Payload is zero padded up to this length before the CRC is computed.
pub const MIN_PAYLOAD_LEN: usize = 60;

/// Trailing CRC-32 (IEEE), little-endian.
pub const CRC_LEN: usize = 4;

/// Smallest well-formed wire frame (preamble + minimum payload + CRC).
pub const MIN_WIRE_LEN: usize = PREAMBLE_LEN + MIN_PAYLOAD_LEN + CRC_LEN;

/// Below this there is nothing meaningful to extract from a received frame.
pub const TRUNCATED_LEN: usize = 12;

/// Bits per lane on the bus (8 data + 1 control).
pub const LANE_BITS: usize = 9;

/// Second start-of-frame alignment on the wide bus.
pub const WIDE_START_LANE: usize = 4;

/// Control character identifiers (only meaningful with the control flag set).
pub mod control_ids {
    pub const IDLE: u8      = 0x07;
    pub const START: u8     = 0xFB;
    pub const TERMINATE: u8 = 0xFD;
}
