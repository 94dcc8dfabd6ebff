use byteorder::{ByteOrder, LittleEndian};

use crate::constants::{CRC_LEN, MIN_PAYLOAD_LEN, PREAMBLE_LEN, PREAMBLE_SFD};
use crate::utils::compute_crc32;

/// Zero pad `raw` up to the minimum payload length.
pub fn pad_payload(raw: &[u8]) -> Vec<u8> {
    let mut out = raw.to_vec();
    if out.len() < MIN_PAYLOAD_LEN {
        out.resize(MIN_PAYLOAD_LEN, 0x00);
    }
    out
}

/// Format a raw frame for the wire.
///
/// Layout:
///
/// ```text
/// [ preamble/SFD (7) ]
/// [ payload, zero padded to >= 60 (M) ]
/// [ CRC-32 of padded payload, LE (4) ]
/// ```
pub fn frame(raw: &[u8]) -> Vec<u8> {
    let payload = pad_payload(raw);
    let mut out = Vec::with_capacity(PREAMBLE_LEN + payload.len() + CRC_LEN);

    out.extend_from_slice(&PREAMBLE_SFD);
    out.extend_from_slice(&payload);

    let mut crc = [0u8; CRC_LEN];
    LittleEndian::write_u32(&mut crc, compute_crc32(&payload));
    out.extend_from_slice(&crc);

    out
}
