//! Receive path: reassembles wire frames from sampled bus words.

pub mod decoder;
pub mod engine;

pub use decoder::{EthernetDecoder, EthernetFrame, FrameDecoder, RawDecoder};
pub use engine::{Frames, ReceiveEngine, ReceivedFrame, RxResult, RxState};
