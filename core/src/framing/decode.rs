use byteorder::{ByteOrder, LittleEndian};
use log::{error, info};

use crate::constants::{CRC_LEN, MIN_WIRE_LEN, PREAMBLE_LEN, PREAMBLE_SFD, TRUNCATED_LEN};
use crate::framing::types::{Deframed, Diagnostic, FramingError};
use crate::utils::{compute_crc32, hexdump};

/// Validate and strip a received wire frame.
///
/// Too-short frames and a bad preamble are fatal. A runt length or a CRC
/// mismatch is logged and recorded in `Deframed::diagnostics`, and the
/// payload is still returned.
pub fn deframe(wire: &[u8]) -> Result<Deframed, FramingError> {
    let mut diagnostics = Vec::new();

    if wire.len() < TRUNCATED_LEN {
        error!("No data to extract ({} bytes)", wire.len());
        return Err(FramingError::Truncated { len: wire.len(), min: TRUNCATED_LEN });
    }

    if wire.len() < MIN_WIRE_LEN {
        error!("Received a runt frame ({} bytes)", wire.len());
        diagnostics.push(Diagnostic::RuntFrame { len: wire.len() });
    }

    let (preamble, rest) = wire.split_at(PREAMBLE_LEN);
    let (payload, crc) = rest.split_at(rest.len() - CRC_LEN);

    if preamble != PREAMBLE_SFD {
        error!("Got a frame with unknown preamble/SFD\n{}", hexdump(preamble));
        let mut found = [0u8; PREAMBLE_LEN];
        found.copy_from_slice(preamble);
        return Err(FramingError::BadPreamble { found });
    }

    let expected = compute_crc32(payload);
    let received = LittleEndian::read_u32(crc);
    if expected != received {
        error!("Incorrect CRC on received packet");
        info!("Expected: {:08x}, received: {:08x}", expected, received);
        diagnostics.push(Diagnostic::ChecksumMismatch { expected, received });
    }

    Ok(Deframed {
        payload: payload.to_vec(),
        diagnostics,
    })
}

/// Like [`deframe`], but any diagnostic is promoted to an error.
pub fn deframe_strict(wire: &[u8]) -> Result<Vec<u8>, FramingError> {
    let deframed = deframe(wire)?;
    match deframed.diagnostics.first() {
        Some(d) => Err(FramingError::Strict(*d)),
        None => Ok(deframed.payload),
    }
}
