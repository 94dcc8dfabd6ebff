//! rx/decoder.rs
//! Optional structured decoding of validated payloads.
//!
//! The receive engine hands every successfully deframed payload to a
//! [`FrameDecoder`]. [`RawDecoder`] passes the bytes through unchanged;
//! [`EthernetDecoder`] splits off the MAC header.

use byteorder::{BigEndian, ByteOrder};

use crate::framing::FramingError;

pub trait FrameDecoder {
    type Frame;

    fn decode(&self, payload: Vec<u8>) -> Result<Self::Frame, FramingError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RawDecoder;

impl FrameDecoder for RawDecoder {
    type Frame = Vec<u8>;

    #[inline]
    fn decode(&self, payload: Vec<u8>) -> Result<Self::Frame, FramingError> {
        Ok(payload)
    }
}

pub const MAC_LEN: usize = 6;
pub const ETHERNET_HEADER_LEN: usize = 2 * MAC_LEN + 2;

/// Untagged Ethernet II frame (the CRC is already stripped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthernetFrame {
    pub dst: [u8; MAC_LEN],
    pub src: [u8; MAC_LEN],
    pub ethertype: u16,
    /// Everything after the header, including any zero padding.
    pub payload: Vec<u8>,
}

impl EthernetFrame {
    pub fn new(dst: [u8; MAC_LEN], src: [u8; MAC_LEN], ethertype: u16, payload: Vec<u8>) -> Self {
        Self { dst, src, ethertype, payload }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(ETHERNET_HEADER_LEN + self.payload.len());
        out.extend_from_slice(&self.dst);
        out.extend_from_slice(&self.src);
        let mut et = [0u8; 2];
        BigEndian::write_u16(&mut et, self.ethertype);
        out.extend_from_slice(&et);
        out.extend_from_slice(&self.payload);
        out
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, FramingError> {
        if bytes.len() < ETHERNET_HEADER_LEN {
            return Err(FramingError::decode(format!(
                "ethernet header needs {} bytes, got {}",
                ETHERNET_HEADER_LEN,
                bytes.len()
            )));
        }

        let mut dst = [0u8; MAC_LEN];
        let mut src = [0u8; MAC_LEN];
        dst.copy_from_slice(&bytes[0..MAC_LEN]);
        src.copy_from_slice(&bytes[MAC_LEN..2 * MAC_LEN]);
        let ethertype = BigEndian::read_u16(&bytes[2 * MAC_LEN..ETHERNET_HEADER_LEN]);

        Ok(Self {
            dst,
            src,
            ethertype,
            payload: bytes[ETHERNET_HEADER_LEN..].to_vec(),
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EthernetDecoder;

impl FrameDecoder for EthernetDecoder {
    type Frame = EthernetFrame;

    fn decode(&self, payload: Vec<u8>) -> Result<Self::Frame, FramingError> {
        EthernetFrame::parse(&payload)
    }
}
