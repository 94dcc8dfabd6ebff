//! rx/engine.rs
//! Cycle-by-cycle receive state machine.
//!
//! Feed one sampled bus value per clock edge. The engine scans for START
//! (lane 0, or lane 4 on the wide bus), accumulates data lanes until a
//! control character, then deframes and decodes what it collected.

use log::{debug, error, info, warn};

use crate::bus::{ControlSymbol, Lane, PackedWord};
use crate::config::BusConfig;
use crate::constants::WIDE_START_LANE;
use crate::framing::{deframe, Diagnostic, FramingError};
use crate::rx::decoder::{FrameDecoder, RawDecoder};
use crate::telemetry::LinkCounters;
use crate::utils::hexdump;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxState {
    Scanning,
    Accumulating,
}

/// A delivered frame with any non-fatal conditions seen while deframing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedFrame<F> {
    pub frame: F,
    pub diagnostics: Vec<Diagnostic>,
}

pub type RxResult<F> = Result<ReceivedFrame<F>, FramingError>;

#[derive(Debug)]
pub struct ReceiveEngine<D: FrameDecoder = RawDecoder> {
    cfg: BusConfig,
    decoder: D,
    state: RxState,
    pkt: Vec<u8>,
    counters: LinkCounters,
}

impl ReceiveEngine<RawDecoder> {
    pub fn new(cfg: BusConfig) -> Self {
        Self::with_decoder(cfg, RawDecoder)
    }
}

impl<D: FrameDecoder> ReceiveEngine<D> {
    pub fn with_decoder(cfg: BusConfig, decoder: D) -> Self {
        Self {
            cfg,
            decoder,
            state: RxState::Scanning,
            pkt: Vec::new(),
            counters: LinkCounters::default(),
        }
    }

    pub fn config(&self) -> &BusConfig {
        &self.cfg
    }

    pub fn state(&self) -> RxState {
        self.state
    }

    pub fn counters(&self) -> &LinkCounters {
        &self.counters
    }

    /// Drop any partial frame and go back to scanning.
    pub fn reset(&mut self) {
        self.state = RxState::Scanning;
        self.pkt.clear();
    }

    /// Process one sampled bus value.
    pub fn push_value(&mut self, value: u128) -> Option<RxResult<D::Frame>> {
        let word = PackedWord::from_wire_value(value, self.cfg);
        self.push(&word)
    }

    /// Process one bus word. Returns a result on the edge a frame completes.
    pub fn push(&mut self, word: &PackedWord) -> Option<RxResult<D::Frame>> {
        self.counters.add_word();
        let lanes: Vec<Lane> = word.lanes().collect();

        let first = match self.state {
            RxState::Accumulating => 0,
            RxState::Scanning => {
                let first = self.find_start(&lanes)?;
                self.state = RxState::Accumulating;
                self.pkt.clear();
                first
            }
        };

        self.accumulate(&lanes, first)
    }

    /// Lazily pull results out of a stream of sampled bus values.
    ///
    /// Engine state survives between calls, so a frame split across two
    /// batches of values is still reassembled.
    pub fn frames<I>(&mut self, values: I) -> Frames<'_, D, I::IntoIter>
    where
        I: IntoIterator<Item = u128>,
    {
        Frames { engine: self, values: values.into_iter() }
    }

    /// First payload lane after a START in this word, if any.
    fn find_start(&self, lanes: &[Lane]) -> Option<usize> {
        if lanes[0].is(ControlSymbol::Start) {
            return Some(1);
        }
        if self.cfg.lanes() == 8 && lanes[WIDE_START_LANE].is(ControlSymbol::Start) {
            return Some(WIDE_START_LANE + 1);
        }
        None
    }

    fn accumulate(&mut self, lanes: &[Lane], first: usize) -> Option<RxResult<D::Frame>> {
        for (index, lane) in lanes.iter().enumerate().skip(first) {
            if !lane.control {
                self.pkt.push(lane.byte);
                continue;
            }

            self.state = RxState::Scanning;
            let pkt = std::mem::take(&mut self.pkt);

            if !lane.is(ControlSymbol::Terminate) {
                error!("Got control character in XGMII payload");
                info!("data = : {}", lanes.iter().map(|l| format!("{:02X}", l.byte)).collect::<Vec<_>>().join(" "));
                info!("ctrl = : {}", lanes.iter().map(|l| l.control.to_string()).collect::<Vec<_>>().join(" "));
                let err = FramingError::ProtocolViolation { lane: index, byte: lane.byte };
                self.counters.add_error(&err);
                return Some(Err(err));
            }

            return self.complete(pkt);
        }
        None
    }

    fn complete(&mut self, pkt: Vec<u8>) -> Option<RxResult<D::Frame>> {
        // START immediately followed by TERMINATE: nothing to deliver
        if pkt.is_empty() {
            return None;
        }

        debug!("Received:\n{}", hexdump(&pkt));

        let deframed = match deframe(&pkt) {
            Ok(d) => d,
            Err(e) => {
                self.counters.add_error(&e);
                return Some(Err(e));
            }
        };

        for d in &deframed.diagnostics {
            self.counters.add_diagnostic(d);
        }

        let payload_len = deframed.payload.len();
        match self.decoder.decode(deframed.payload) {
            Ok(frame) => {
                self.counters.add_received(payload_len);
                Some(Ok(ReceivedFrame { frame, diagnostics: deframed.diagnostics }))
            }
            Err(mut e) => {
                if let FramingError::Decode { diagnostics, .. } = &mut e {
                    if !deframed.diagnostics.is_empty() {
                        warn!("Decode failed on a frame with diagnostics: {:?}", deframed.diagnostics);
                    }
                    diagnostics.extend(deframed.diagnostics);
                }
                self.counters.add_error(&e);
                Some(Err(e))
            }
        }
    }
}

/// Iterator returned by [`ReceiveEngine::frames`].
pub struct Frames<'a, D: FrameDecoder, I> {
    engine: &'a mut ReceiveEngine<D>,
    values: I,
}

impl<'a, D, I> Iterator for Frames<'a, D, I>
where
    D: FrameDecoder,
    I: Iterator<Item = u128>,
{
    type Item = RxResult<D::Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        for value in self.values.by_ref() {
            if let Some(r) = self.engine.push_value(value) {
                return Some(r);
            }
        }
        None
    }
}
