//! telemetry/counters.rs
//! Link counters kept by the transmit and receive engines.
//!
//! Non-fatal framing conditions land here as well as in the log, so a
//! caller can decide at a higher layer whether to treat them as fatal.

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

use crate::framing::{Diagnostic, FramingError};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCounters {
    pub words: u64,
    pub frames_sent: u64,
    pub bytes_sent: u64,
    pub frames_received: u64,
    pub bytes_received: u64,
    pub runt_frames: u64,
    pub checksum_mismatches: u64,
    pub bad_preambles: u64,
    pub truncated_frames: u64,
    pub protocol_violations: u64,
    pub decode_failures: u64,
}

impl LinkCounters {
    /// One bus word driven or sampled.
    pub fn add_word(&mut self) {
        self.words += 1;
    }

    /// One frame fully transmitted; `raw_len` excludes framing overhead.
    pub fn add_sent(&mut self, raw_len: usize) {
        self.frames_sent += 1;
        self.bytes_sent += raw_len as u64;
    }

    /// One frame delivered to the caller; `payload_len` excludes framing overhead.
    pub fn add_received(&mut self, payload_len: usize) {
        self.frames_received += 1;
        self.bytes_received += payload_len as u64;
    }

    pub fn add_diagnostic(&mut self, d: &Diagnostic) {
        match d {
            Diagnostic::RuntFrame { .. } => self.runt_frames += 1,
            Diagnostic::ChecksumMismatch { .. } => self.checksum_mismatches += 1,
        }
    }

    pub fn add_error(&mut self, e: &FramingError) {
        match e {
            FramingError::Truncated { .. } => self.truncated_frames += 1,
            FramingError::BadPreamble { .. } => self.bad_preambles += 1,
            FramingError::ProtocolViolation { .. } => self.protocol_violations += 1,
            FramingError::Decode { .. } => self.decode_failures += 1,
            FramingError::Strict(d) => self.add_diagnostic(d),
        }
    }

    /// Frames that were dropped rather than delivered.
    pub fn frames_dropped(&self) -> u64 {
        self.truncated_frames + self.bad_preambles + self.protocol_violations + self.decode_failures
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn merge(&mut self, other: &LinkCounters) {
        self.words += other.words;
        self.frames_sent += other.frames_sent;
        self.bytes_sent += other.bytes_sent;
        self.frames_received += other.frames_received;
        self.bytes_received += other.bytes_received;
        self.runt_frames += other.runt_frames;
        self.checksum_mismatches += other.checksum_mismatches;
        self.bad_preambles += other.bad_preambles;
        self.truncated_frames += other.truncated_frames;
        self.protocol_violations += other.protocol_violations;
        self.decode_failures += other.decode_failures;
    }
}

impl AddAssign for LinkCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
