use std::fmt;
use thiserror::Error;

use crate::constants::PREAMBLE_LEN;

/// Fatal framing outcomes: the frame is not delivered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FramingError {
    #[error("truncated frame: {len} bytes, need at least {min}")]
    Truncated { len: usize, min: usize },

    #[error("unknown preamble/SFD: {}", hex::encode(.found))]
    BadPreamble { found: [u8; PREAMBLE_LEN] },

    #[error("control character 0x{byte:02x} in payload at lane {lane}")]
    ProtocolViolation { lane: usize, byte: u8 },

    /// The structured decoder rejected a deframed payload. `diagnostics`
    /// holds what deframing reported before the decoder ran.
    #[error("frame decode failed: {reason}")]
    Decode { reason: String, diagnostics: Vec<Diagnostic> },

    #[error("rejected by strict deframe: {0}")]
    Strict(Diagnostic),
}

impl FramingError {
    /// Decoder failure with no deframe diagnostics attached yet.
    pub fn decode(reason: impl Into<String>) -> Self {
        FramingError::Decode { reason: reason.into(), diagnostics: Vec::new() }
    }
}

/// Non-fatal conditions: reported, the payload is still delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    RuntFrame { len: usize },
    ChecksumMismatch { expected: u32, received: u32 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Diagnostic::*;
        match self {
            RuntFrame { len } =>
                write!(f, "runt frame: {} bytes", len),
            ChecksumMismatch { expected, received } =>
                write!(f, "incorrect CRC: expected {:08x}, received {:08x}", expected, received),
        }
    }
}

/// Stripped payload plus whatever was reported while deframing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deframed {
    pub payload: Vec<u8>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Deframed {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn checksum_ok(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::ChecksumMismatch { .. }))
    }
}
