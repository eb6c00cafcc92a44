use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    ReservedBits,

    IllegalOpCode(u8),

    // 64-bit length with the most significant bit set
    IllegalLength(u64),

    // eof after a complete head
    TruncatedFrame,

    PayloadTooLarge(u64),

    ControlTooLong(usize),

    Fragmented,

    InvalidUtf8,

    NotEnoughData,
}

impl Display for FrameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use FrameError::*;
        match self {
            ReservedBits => write!(f, "Reserved bits are set"),
            IllegalOpCode(b) => write!(f, "Illegal opcode value: {:#x}", b),
            IllegalLength(n) => write!(f, "Illegal payload length: {:#x}", n),
            TruncatedFrame => write!(f, "Peer closed the stream in the middle of a frame"),
            PayloadTooLarge(n) => write!(f, "Payload length {} exceeds the limit", n),
            ControlTooLong(n) => write!(f, "Control frame payload of {} bytes exceeds 125", n),
            Fragmented => write!(f, "Fragmented frames are not supported"),
            InvalidUtf8 => write!(f, "Text frame is not valid utf-8"),
            NotEnoughData => write!(f, "Not enough data to parse"),
        }
    }
}

// use default impl
impl std::error::Error for FrameError {}
