//! Whole frame encode and decode.

use std::io::{Read, ErrorKind};

use log::trace;

use super::{Fin, OpCode, Mask, PayloadLen, FrameHead};
use super::{MAX_FRAME_HEAD_LEN, MAX_CONTROL_PAYLOAD_LEN};
use super::mask::apply_mask;

use crate::role::Role;
use crate::error::{Error, FrameError};

const PAYLOAD_INIT_CAPACITY: u64 = 8 << 10;

/// A complete, unfragmented frame.
///
/// `mask` records the key seen on the wire after a decode,
/// `payload` is always stored unmasked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub fin: bool,
    pub opcode: OpCode,
    pub mask: Option<[u8; 4]>,
    pub payload: Vec<u8>,
}

impl Frame {
    /// Create a final, unmasked frame.
    #[inline]
    pub fn new(opcode: OpCode, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            fin: true,
            opcode,
            mask: None,
            payload: payload.into(),
        }
    }

    #[inline]
    pub const fn is_masked(&self) -> bool { self.mask.is_some() }

    /// Encode as `role`. A client picks a new random key for every call,
    /// a server never masks.
    #[inline]
    pub fn encode(&self, role: Role) -> Vec<u8> { self.encode_with_mask(role.write_mask()) }

    /// Encode with the given mask. The fin bit is always set.
    pub fn encode_with_mask(&self, mask: Mask) -> Vec<u8> {
        let head = FrameHead::new(
            Fin::Y,
            self.opcode,
            mask,
            PayloadLen::from_num(self.payload.len() as u64),
        );

        let mut buf = Vec::with_capacity(head.encoded_len() + self.payload.len());
        let head_len = head.encode(&mut buf);
        buf.extend_from_slice(&self.payload);

        if let Mask::Key(key) = mask {
            apply_mask(key, &mut buf[head_len..]);
        }

        trace!(
            "encode frame: opcode={:?}, masked={}, len={}",
            self.opcode,
            mask.key().is_some(),
            self.payload.len()
        );

        buf
    }

    /// Read one frame from `r`, blocking until it is complete.
    ///
    /// Returns `Ok(None)` if the stream ends before a frame head is
    /// complete. If it ends after the head but before the last payload
    /// byte, a [`FrameError::TruncatedFrame`] error is returned.
    /// Frames longer than `max_payload_len` are refused before their
    /// payload is read.
    pub fn decode<R: Read + ?Sized>(r: &mut R, max_payload_len: u64) -> Result<Option<Self>, Error> {
        let mut head_buf = [0u8; MAX_FRAME_HEAD_LEN];

        if read_full(r, &mut head_buf[..2])? < 2 {
            return Ok(None);
        }

        let head_len = FrameHead::required_len(head_buf[1]);
        if read_full(r, &mut head_buf[2..head_len])? < head_len - 2 {
            return Ok(None);
        }

        let (head, _) = FrameHead::decode(&head_buf[..head_len])?;
        let length = head.length.to_num();

        if head.opcode.is_control() && length > MAX_CONTROL_PAYLOAD_LEN as u64 {
            return Err(FrameError::ControlTooLong(length as usize).into());
        }

        if length > max_payload_len {
            return Err(FrameError::PayloadTooLarge(length).into());
        }

        // grow with the data received, not with the length claimed
        let mut payload = Vec::with_capacity(length.min(PAYLOAD_INIT_CAPACITY) as usize);
        Read::take(&mut *r, length).read_to_end(&mut payload)?;
        if (payload.len() as u64) < length {
            return Err(FrameError::TruncatedFrame.into());
        }

        if let Mask::Key(key) = head.mask {
            apply_mask(key, &mut payload);
        }

        trace!(
            "decode frame: opcode={:?}, fin={}, masked={}, len={}",
            head.opcode,
            head.fin.is_set(),
            head.mask.key().is_some(),
            length
        );

        Ok(Some(Frame {
            fin: head.fin.is_set(),
            opcode: head.opcode,
            mask: head.mask.key(),
            payload,
        }))
    }
}

/// Fill `buf` unless EOF is reached first, returns the number of bytes read.
fn read_full<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut offset = 0;
    while offset < buf.len() {
        match r.read(&mut buf[offset..]) {
            Ok(0) => break,
            Ok(n) => offset += n,
            Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(offset)
}
