//! bus/word.rs
//! Two-phase bus word: a builder collects lane writes, `finalize()` yields
//! an immutable packed value.
//!
//! Layout:
//!
//! ```text
//! interleaved: lane i byte -> bits [9i, 9i+7],  control -> bit 9i+8
//! block:       lane i byte -> bits [8i, 8i+7],  control -> bit 8N+i
//! ```

use crate::bus::types::{BusError, ControlSymbol, Lane};
use crate::bus::Layout;
use crate::config::BusConfig;

#[inline(always)]
fn byte_shift(cfg: &BusConfig, index: usize) -> usize {
    match cfg.layout {
        Layout::Interleaved => index * 9,
        Layout::Block => index * 8,
    }
}

#[inline(always)]
fn ctrl_shift(cfg: &BusConfig, index: usize) -> usize {
    match cfg.layout {
        Layout::Interleaved => index * 9 + 8,
        Layout::Block => cfg.lanes() * 8 + index,
    }
}

/// Accumulates lane writes for one clock edge.
///
/// Lanes that are never written pack as `(0x00, data)`.
#[derive(Debug, Clone)]
pub struct BusWordBuilder {
    cfg: BusConfig,
    value: u128,
}

impl BusWordBuilder {
    pub fn new(cfg: BusConfig) -> Self {
        Self { cfg, value: 0 }
    }

    pub fn config(&self) -> &BusConfig {
        &self.cfg
    }

    /// Write one lane. Rewriting a lane replaces its previous contents.
    pub fn set_lane(&mut self, index: usize, byte: u8, control: bool) -> Result<&mut Self, BusError> {
        let lanes = self.cfg.lanes();
        if index >= lanes {
            return Err(BusError::OutOfRange { index, lanes });
        }
        Ok(self.put(index, byte, control))
    }

    /// Unchecked lane write for callers that derive `index` from the lane count.
    #[inline]
    pub(crate) fn put(&mut self, index: usize, byte: u8, control: bool) -> &mut Self {
        debug_assert!(index < self.cfg.lanes(), "lane {} out of range", index);

        let bs = byte_shift(&self.cfg, index);
        let cs = ctrl_shift(&self.cfg, index);

        self.value &= !((0xFFu128 << bs) | (1u128 << cs));
        self.value |= (byte as u128) << bs;
        self.value |= (control as u128) << cs;
        self
    }

    #[inline]
    pub(crate) fn put_symbol(&mut self, index: usize, sym: ControlSymbol) -> &mut Self {
        self.put(index, sym.to_u8(), true)
    }

    pub fn set(&mut self, index: usize, lane: Lane) -> Result<&mut Self, BusError> {
        self.set_lane(index, lane.byte, lane.control)
    }

    pub fn set_symbol(&mut self, index: usize, sym: ControlSymbol) -> Result<&mut Self, BusError> {
        self.set_lane(index, sym.to_u8(), true)
    }

    /// Write `sym` into every lane from `from` to the end of the word.
    pub fn fill_symbol_from(&mut self, from: usize, sym: ControlSymbol) -> &mut Self {
        for i in from..self.cfg.lanes() {
            self.put_symbol(i, sym);
        }
        self
    }

    /// Packed value, clearing the builder for reuse on the next edge.
    pub fn to_wire_value(&mut self) -> u128 {
        std::mem::take(&mut self.value)
    }

    pub fn finalize(self) -> PackedWord {
        PackedWord { cfg: self.cfg, value: self.value }
    }
}

/// Immutable packed bus word, as driven onto or sampled from the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedWord {
    cfg: BusConfig,
    value: u128,
}

impl PackedWord {
    /// Wrap a sampled bus value. Bits above `9 * lanes` are ignored.
    pub fn from_wire_value(value: u128, cfg: BusConfig) -> Self {
        Self { cfg, value: value & cfg.value_mask() }
    }

    /// Every lane `(IDLE, control)`.
    pub fn idle(cfg: BusConfig) -> Self {
        let mut b = BusWordBuilder::new(cfg);
        b.fill_symbol_from(0, ControlSymbol::Idle);
        b.finalize()
    }

    #[inline(always)]
    pub fn value(&self) -> u128 {
        self.value
    }

    pub fn config(&self) -> &BusConfig {
        &self.cfg
    }

    pub fn lane(&self, index: usize) -> Result<Lane, BusError> {
        let lanes = self.cfg.lanes();
        if index >= lanes {
            return Err(BusError::OutOfRange { index, lanes });
        }
        Ok(self.decode_lane(index))
    }

    pub fn lanes(&self) -> impl Iterator<Item = Lane> + '_ {
        (0..self.cfg.lanes()).map(move |i| self.decode_lane(i))
    }

    /// Lanes as `(byte, control)` pairs.
    pub fn to_pairs(&self) -> Vec<(u8, bool)> {
        self.lanes().map(|l| (l.byte, l.control)).collect()
    }

    pub fn is_idle(&self) -> bool {
        self.lanes().all(|l| l.is(ControlSymbol::Idle))
    }

    #[inline(always)]
    fn decode_lane(&self, index: usize) -> Lane {
        let byte = (self.value >> byte_shift(&self.cfg, index)) as u8;
        let control = (self.value >> ctrl_shift(&self.cfg, index)) & 1 == 1;
        Lane { byte, control }
    }
}
