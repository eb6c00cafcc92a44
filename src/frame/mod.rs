//! Websocket data frame.
//!
//! [RFC-6455 Section5](https://datatracker.ietf.org/doc/html/rfc6455#section-5)
//!
//! ```text
//! 0                   1                   2                   3
//! 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-------+-+-------------+-------------------------------+
//! |F|R|R|R| opcode|M| Payload len |    Extended payload length    |
//! |I|S|S|S|  (4)  |A|     (7)     |             (16/64)           |
//! |N|V|V|V|       |S|             |   (if payload len==126/127)   |
//! | |1|2|3|       |K|             |                               |
//! +-+-+-+-+-------+-+-------------+ - - - - - - - - - - - - - - - +
//! |     Extended payload length continued, if payload len == 127  |
//! + - - - - - - - - - - - - - - - +-------------------------------+
//! |                               |Masking-key, if MASK set to 1  |
//! +-------------------------------+-------------------------------+
//! | Masking-key (continued)       |          Payload Data         |
//! +-------------------------------- - - - - - - - - - - - - - - - +
//! :                     Payload Data continued ...                :
//! + - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - +
//! |                     Payload Data continued ...                |
//! +---------------------------------------------------------------+
//! ```
//!

pub mod flag;
pub mod length;
pub mod mask;
mod codec;

pub use flag::{Fin, OpCode};
pub use length::{PayloadLen, MAX_DECLARED_LEN};
pub use mask::Mask;
pub use codec::Frame;

use crate::error::FrameError;

/// 2 + 8 + 4
pub const MAX_FRAME_HEAD_LEN: usize = 14;

/// Payload limit of a control frame.
pub const MAX_CONTROL_PAYLOAD_LEN: usize = 125;

/// Websocket frame head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHead {
    pub fin: Fin,
    pub opcode: OpCode,
    pub mask: Mask,
    pub length: PayloadLen,
}

impl FrameHead {
    /// Constructor.
    #[inline]
    pub const fn new(fin: Fin, opcode: OpCode, mask: Mask, length: PayloadLen) -> Self {
        Self {
            fin,
            opcode,
            mask,
            length,
        }
    }

    /// Total head length implied by the second head byte,
    /// covering extended length and mask key.
    #[inline]
    pub const fn required_len(b2: u8) -> usize {
        let length = match b2 & 0x7f {
            126 => 2,
            127 => 8,
            _ => 0,
        };
        let key = if b2 & 0x80 != 0 { 4 } else { 0 };
        2 + length + key
    }

    /// Encoded length of this head.
    #[inline]
    pub const fn encoded_len(&self) -> usize {
        Self::required_len(self.mask.to_flag() | self.length.to_flag())
    }

    /// Append the encoded head to the provided buffer,
    /// returns the count of written bytes.
    pub fn encode(&self, buf: &mut Vec<u8>) -> usize {
        let beg = buf.len();

        // fin, opcode
        let b1 = self.fin as u8 | self.opcode as u8;

        // mask, payload length
        let b2 = self.mask.to_flag() | self.length.to_flag();

        buf.extend_from_slice(&[b1, b2]);

        // extended payload length
        self.length.write_extended(buf);

        // mask key
        if let Mask::Key(k) = &self.mask {
            buf.extend_from_slice(k);
        }

        buf.len() - beg
    }

    /// Parse from provided buffer, returns [`FrameHead`] and the count of read bytes
    /// if the parse succeeds.
    /// If there is not enough data to parse, a [`FrameError::NotEnoughData`] error
    /// will be returned. A 64-bit length with the most significant bit set
    /// is a [`FrameError::IllegalLength`] error.
    pub fn decode(buf: &[u8]) -> Result<(Self, usize), FrameError> {
        if buf.len() < 2 {
            return Err(FrameError::NotEnoughData);
        }

        // fin, opcode
        let b1 = buf[0];

        // mask, payload length
        let b2 = buf[1];

        let n = Self::required_len(b2);
        if buf.len() < n {
            return Err(FrameError::NotEnoughData);
        }

        let fin = Fin::from_flag(b1)?;
        let opcode = OpCode::from_flag(b1)?;

        let length = PayloadLen::from_flag(b2).read_extended(&buf[2..n])?;

        // mask key ends the head
        let mask = match Mask::from_flag(b2) {
            Mask::Key(_) => {
                let mut key = [0u8; 4];
                key.copy_from_slice(&buf[n - 4..n]);
                Mask::Key(key)
            }
            Mask::None => Mask::None,
        };

        Ok((
            FrameHead {
                fin,
                opcode,
                mask,
                length,
            },
            n,
        ))
    }
}
