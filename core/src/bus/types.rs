//! bus/types.rs
//! Lane, width, layout and control symbol types.

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{control_ids, LANE_BITS};

/// Reserved control characters.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum ControlSymbol {
    Idle      = control_ids::IDLE,
    Start     = control_ids::START,
    Terminate = control_ids::TERMINATE,
}

impl ControlSymbol {
    #[inline(always)]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Arrangement of the control bits on the bus.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `byte0, ctrl0, byte1, ctrl1, ...` (9 bits per lane).
    #[default]
    Interleaved,
    /// `byte0, byte1, ..., ctrl0, ctrl1, ...` (control bits in the MSBs).
    Block,
}

/// Number of lanes transferred per clock edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum BusWidth {
    /// 32-bit data path (usually DDR).
    Four,
    /// 64-bit data path (usually SDR).
    Eight,
}

impl BusWidth {
    #[inline(always)]
    pub const fn lanes(self) -> usize {
        match self {
            BusWidth::Four => 4,
            BusWidth::Eight => 8,
        }
    }

    /// Width of the packed bus value in bits.
    #[inline(always)]
    pub const fn signal_bits(self) -> usize {
        self.lanes() * LANE_BITS
    }

    pub fn try_from_lanes(lanes: usize) -> Result<Self, BusError> {
        match lanes {
            4 => Ok(BusWidth::Four),
            8 => Ok(BusWidth::Eight),
            _ => Err(BusError::UnsupportedWidth { lanes }),
        }
    }
}

impl TryFrom<usize> for BusWidth {
    type Error = BusError;

    fn try_from(lanes: usize) -> Result<Self, Self::Error> {
        BusWidth::try_from_lanes(lanes)
    }
}

impl From<BusWidth> for usize {
    fn from(w: BusWidth) -> Self {
        w.lanes()
    }
}

/// One lane of a bus word.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Lane {
    pub byte: u8,
    pub control: bool,
}

impl Lane {
    #[inline(always)]
    pub const fn data(byte: u8) -> Self {
        Self { byte, control: false }
    }

    #[inline(always)]
    pub const fn symbol(sym: ControlSymbol) -> Self {
        Self { byte: sym.to_u8(), control: true }
    }

    /// True if this lane carries `sym` with the control flag set.
    #[inline(always)]
    pub fn is(&self, sym: ControlSymbol) -> bool {
        self.control && self.byte == sym.to_u8()
    }

    /// Decoded control character, `None` for data lanes or unknown codes.
    pub fn control_symbol(&self) -> Option<ControlSymbol> {
        if !self.control {
            return None;
        }
        ControlSymbol::try_from_primitive(self.byte).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusError {
    #[error("attempt to access lane {index} of a {lanes} lane bus")]
    OutOfRange { index: usize, lanes: usize },

    #[error("unsupported bus width: {lanes} lanes (expected 4 or 8)")]
    UnsupportedWidth { lanes: usize },

    #[error("signal width {bits} is not a whole number of 9-bit lanes")]
    MisalignedSignal { bits: usize },
}
