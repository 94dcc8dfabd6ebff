//! port/trace.rs
//! In-memory bus ports.

use std::collections::VecDeque;

use crossbeam::channel::{unbounded, Receiver, Sender};

use crate::port::{BusPort, PortError};

/// Records the value on the bus at every clock edge.
#[derive(Debug, Default, Clone)]
pub struct WordTrace {
    current: u128,
    edges: Vec<u128>,
}

impl WordTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bus value latched at each edge, oldest first.
    pub fn edges(&self) -> &[u128] {
        &self.edges
    }

    pub fn into_replay(self) -> ReplayPort {
        ReplayPort::new(self.edges)
    }
}

impl BusPort for WordTrace {
    fn drive(&mut self, value: u128) {
        self.current = value;
    }

    fn sample(&mut self) -> u128 {
        self.current
    }

    fn wait_edge(&mut self) -> Result<(), PortError> {
        self.edges.push(self.current);
        Ok(())
    }
}

/// Plays back a recorded sequence of bus values, one per edge.
///
/// `wait_edge` fails with [`PortError::ClockStopped`] once the sequence is
/// exhausted.
#[derive(Debug, Default, Clone)]
pub struct ReplayPort {
    current: u128,
    pending: VecDeque<u128>,
}

impl ReplayPort {
    pub fn new<I: IntoIterator<Item = u128>>(values: I) -> Self {
        Self { current: 0, pending: values.into_iter().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl BusPort for ReplayPort {
    // read-only port: driven values are ignored
    fn drive(&mut self, _value: u128) {}

    fn sample(&mut self) -> u128 {
        self.current
    }

    fn wait_edge(&mut self) -> Result<(), PortError> {
        self.current = self.pending.pop_front().ok_or(PortError::ClockStopped)?;
        Ok(())
    }
}

/// Driving end of a cross-thread loopback.
#[derive(Debug)]
pub struct ChannelDrivePort {
    current: u128,
    tx: Sender<u128>,
}

/// Sampling end of a cross-thread loopback.
#[derive(Debug)]
pub struct ChannelSamplePort {
    current: u128,
    rx: Receiver<u128>,
}

/// Loopback between a driver on one thread and a monitor on another.
///
/// Every edge on the driving side publishes the current value; the sampling
/// side advances one edge per value received and reports
/// [`PortError::ClockStopped`] once the driving end is dropped.
pub fn channel_pair() -> (ChannelDrivePort, ChannelSamplePort) {
    let (tx, rx) = unbounded();
    (
        ChannelDrivePort { current: 0, tx },
        ChannelSamplePort { current: 0, rx },
    )
}

impl BusPort for ChannelDrivePort {
    fn drive(&mut self, value: u128) {
        self.current = value;
    }

    fn sample(&mut self) -> u128 {
        self.current
    }

    fn wait_edge(&mut self) -> Result<(), PortError> {
        self.tx
            .send(self.current)
            .map_err(|_| PortError::Other("sampling end disconnected".into()))
    }
}

impl BusPort for ChannelSamplePort {
    fn drive(&mut self, _value: u128) {}

    fn sample(&mut self) -> u128 {
        self.current
    }

    fn wait_edge(&mut self) -> Result<(), PortError> {
        self.current = self.rx.recv().map_err(|_| PortError::ClockStopped)?;
        Ok(())
    }
}
