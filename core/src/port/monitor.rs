//! port/monitor.rs
//! Passive bus monitor: samples a port every clock edge and reassembles
//! frames with a [`ReceiveEngine`].
//!
//! Results are returned to the caller and also published to any
//! subscribers registered with [`XgmiiMonitor::subscribe`].

use crossbeam::channel::{unbounded, Receiver, Sender};

use crate::config::BusConfig;
use crate::port::{BusPort, PortError};
use crate::rx::{FrameDecoder, RawDecoder, ReceiveEngine, RxResult};
use crate::telemetry::LinkCounters;

pub struct XgmiiMonitor<P: BusPort, D: FrameDecoder = RawDecoder> {
    port: P,
    engine: ReceiveEngine<D>,
    subscribers: Vec<Sender<RxResult<D::Frame>>>,
}

impl<P: BusPort> XgmiiMonitor<P, RawDecoder> {
    pub fn new(port: P, cfg: BusConfig) -> Self {
        Self::with_decoder(port, cfg, RawDecoder)
    }
}

impl<P: BusPort, D: FrameDecoder> XgmiiMonitor<P, D>
where
    D::Frame: Clone,
{
    pub fn with_decoder(port: P, cfg: BusConfig, decoder: D) -> Self {
        Self {
            port,
            engine: ReceiveEngine::with_decoder(cfg, decoder),
            subscribers: Vec::new(),
        }
    }

    /// Every result produced after this call is also sent to the returned receiver.
    pub fn subscribe(&mut self) -> Receiver<RxResult<D::Frame>> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Wait edge by edge until the next frame completes (or fails).
    pub fn recv(&mut self) -> Result<RxResult<D::Frame>, PortError> {
        loop {
            self.port.wait_edge()?;
            let value = self.port.sample();
            if let Some(result) = self.engine.push_value(value) {
                self.publish(&result);
                return Ok(result);
            }
        }
    }

    /// Monitor until the clock stops; returns every result seen.
    ///
    /// Port errors other than [`PortError::ClockStopped`] are propagated.
    pub fn run(&mut self) -> Result<Vec<RxResult<D::Frame>>, PortError> {
        let mut out = Vec::new();
        loop {
            match self.recv() {
                Ok(result) => out.push(result),
                Err(PortError::ClockStopped) => return Ok(out),
                Err(e) => return Err(e),
            }
        }
    }

    pub fn engine(&self) -> &ReceiveEngine<D> {
        &self.engine
    }

    pub fn counters(&self) -> &LinkCounters {
        self.engine.counters()
    }

    pub fn into_port(self) -> P {
        self.port
    }

    fn publish(&mut self, result: &RxResult<D::Frame>) {
        // disconnected receivers are dropped
        self.subscribers.retain(|tx| tx.send(result.clone()).is_ok());
    }
}
