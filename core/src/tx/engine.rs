//! tx/engine.rs
//! Cycle-by-cycle transmit state machine.
//!
//! Each call to [`TransmitEngine::tick`] produces the word to drive for one
//! clock edge. While idle that is an all-IDLE word; after [`send`] it walks
//! the wire frame:
//!
//! ```text
//! [sync idle]? -> START + N-1 bytes -> N bytes ... -> TERMINATE/IDLE... -> IDLE
//! ```
//!
//! [`send`]: TransmitEngine::send

use log::debug;
use thiserror::Error;

use crate::bus::{BusWordBuilder, ControlSymbol, PackedWord};
use crate::config::BusConfig;
use crate::framing::frame;
use crate::telemetry::LinkCounters;
use crate::utils::hexdump;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    Idle,
    Sending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Sync,
    Start,
    Data,
    Settle,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxError {
    #[error("a send is already in progress")]
    Busy,
}

#[derive(Debug)]
pub struct TransmitEngine {
    cfg: BusConfig,
    phase: Option<Phase>,
    wire: Vec<u8>,
    cursor: usize,
    raw_len: usize,
    counters: LinkCounters,
}

impl TransmitEngine {
    pub fn new(cfg: BusConfig) -> Self {
        Self {
            cfg,
            phase: None,
            wire: Vec::new(),
            cursor: 0,
            raw_len: 0,
            counters: LinkCounters::default(),
        }
    }

    pub fn config(&self) -> &BusConfig {
        &self.cfg
    }

    pub fn state(&self) -> TxState {
        match self.phase {
            None => TxState::Idle,
            Some(_) => TxState::Sending,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.phase.is_some()
    }

    pub fn counters(&self) -> &LinkCounters {
        &self.counters
    }

    /// Queue one raw frame. With `sync` the first word is delayed by one edge.
    pub fn send(&mut self, raw: &[u8], sync: bool) -> Result<(), TxError> {
        if self.is_busy() {
            return Err(TxError::Busy);
        }

        self.wire = frame(raw);
        self.cursor = 0;
        self.raw_len = raw.len();

        debug!("Sending packet of length {} bytes", self.wire.len());
        debug!("Sending Packet:\n{}", hexdump(&self.wire));

        self.phase = Some(if sync { Phase::Sync } else { Phase::Start });
        Ok(())
    }

    /// Word to drive for the next clock edge.
    pub fn tick(&mut self) -> PackedWord {
        self.counters.add_word();

        let Some(phase) = self.phase else {
            return PackedWord::idle(self.cfg);
        };

        match phase {
            Phase::Sync => {
                self.phase = Some(Phase::Start);
                PackedWord::idle(self.cfg)
            }
            Phase::Start => {
                self.phase = Some(Phase::Data);
                self.start_word()
            }
            Phase::Data => {
                let (word, done) = self.data_word();
                if done {
                    self.phase = Some(Phase::Settle);
                }
                word
            }
            Phase::Settle => {
                self.finish();
                PackedWord::idle(self.cfg)
            }
        }
    }

    /// Every word for one frame, from the first edge through the idle settle word.
    pub fn encode(&mut self, raw: &[u8], sync: bool) -> Result<Vec<PackedWord>, TxError> {
        self.send(raw, sync)?;
        let mut words = Vec::new();
        while self.is_busy() {
            words.push(self.tick());
        }
        Ok(words)
    }

    /// Abandon the frame in progress. The next tick drives IDLE.
    pub fn abort(&mut self) {
        self.phase = None;
        self.wire.clear();
        self.cursor = 0;
    }

    fn start_word(&mut self) -> PackedWord {
        let mut b = BusWordBuilder::new(self.cfg);
        b.put_symbol(0, ControlSymbol::Start);

        let take = (self.cfg.lanes() - 1).min(self.wire.len());
        for (i, byte) in self.wire[..take].iter().enumerate() {
            b.put(i + 1, *byte, false);
        }
        self.cursor = take;
        b.finalize()
    }

    /// Returns the word and whether TERMINATE was placed in it.
    fn data_word(&mut self) -> (PackedWord, bool) {
        let lanes = self.cfg.lanes();
        let remaining = &self.wire[self.cursor..];
        let mut b = BusWordBuilder::new(self.cfg);

        // TERMINATE lands on lane `remaining.len()` when it fits in this word,
        // or on lane 0 of an extra word when the data ended on a word boundary.
        if remaining.len() < lanes {
            for (i, byte) in remaining.iter().enumerate() {
                b.put(i, *byte, false);
            }
            let at = remaining.len();
            b.put_symbol(at, ControlSymbol::Terminate);
            b.fill_symbol_from(at + 1, ControlSymbol::Idle);
            self.cursor = self.wire.len();
            return (b.finalize(), true);
        }

        for (i, byte) in remaining[..lanes].iter().enumerate() {
            b.put(i, *byte, false);
        }
        self.cursor += lanes;
        (b.finalize(), false)
    }

    fn finish(&mut self) {
        self.phase = None;
        self.wire.clear();
        self.cursor = 0;
        self.counters.add_sent(self.raw_len);
        debug!("Successfully sent packet");
    }
}
