//! config.rs
//! Bus construction parameters.
//!
//! Only the width and the control bit layout vary between buses; the
//! preamble, minimum payload and CRC polynomial are protocol constants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bus::{BusError, BusWidth, Layout};
use crate::constants::LANE_BITS;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusConfig {
    pub width: BusWidth,
    #[serde(default)]
    pub layout: Layout,
}

impl BusConfig {
    pub const fn new(width: BusWidth, layout: Layout) -> Self {
        Self { width, layout }
    }

    pub fn from_lanes(lanes: usize, layout: Layout) -> Result<Self, BusError> {
        Ok(Self::new(BusWidth::try_from_lanes(lanes)?, layout))
    }

    /// Derive the lane count from the width of the bus signal (9 bits per lane).
    pub fn from_signal_width(bits: usize, layout: Layout) -> Result<Self, BusError> {
        if bits % LANE_BITS != 0 {
            return Err(BusError::MisalignedSignal { bits });
        }
        Self::from_lanes(bits / LANE_BITS, layout)
    }

    /// Parse e.g. `{"width": 8, "layout": "block"}`. `layout` defaults to interleaved.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    #[inline(always)]
    pub const fn lanes(&self) -> usize {
        self.width.lanes()
    }

    #[inline(always)]
    pub const fn signal_bits(&self) -> usize {
        self.width.signal_bits()
    }

    /// Mask covering every bit of the packed bus value.
    #[inline(always)]
    pub const fn value_mask(&self) -> u128 {
        (1u128 << self.signal_bits()) - 1
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self::new(BusWidth::Eight, Layout::Interleaved)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bus config: {0}")]
    Json(#[from] serde_json::Error),
}
