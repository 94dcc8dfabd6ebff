use crate::bus::PackedWord;
use crate::config::BusConfig;
use crate::port::BusPort;
use crate::telemetry::LinkCounters;
use crate::tx::TransmitEngine;
use crate::types::LinkError;

/// Drives frames onto a bus port, one word per clock edge.
pub struct XgmiiDriver<P: BusPort> {
    port: P,
    engine: TransmitEngine,
}

impl<P: BusPort> XgmiiDriver<P> {
    /// The bus is set to IDLE immediately.
    pub fn new(port: P, cfg: BusConfig) -> Self {
        let mut driver = Self { port, engine: TransmitEngine::new(cfg) };
        driver.idle();
        driver
    }

    /// Put an all-IDLE word on the bus without waiting for an edge.
    pub fn idle(&mut self) {
        let word = PackedWord::idle(*self.engine.config());
        self.port.drive(word.value());
    }

    /// Send one raw frame and return the number of clock edges consumed.
    ///
    /// If the port fails mid-frame the frame is abandoned and the bus is set
    /// back to IDLE before the error is returned.
    pub fn send(&mut self, raw: &[u8], sync: bool) -> Result<usize, LinkError> {
        self.engine.send(raw, sync)?;

        let mut edges = 0;
        while self.engine.is_busy() {
            let word = self.engine.tick();
            self.port.drive(word.value());
            if let Err(e) = self.port.wait_edge() {
                self.engine.abort();
                self.idle();
                return Err(e.into());
            }
            edges += 1;
        }
        Ok(edges)
    }

    pub fn counters(&self) -> &LinkCounters {
        self.engine.counters()
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn into_port(self) -> P {
        self.port
    }
}
