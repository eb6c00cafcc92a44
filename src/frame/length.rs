//! Payload length.

use crate::error::FrameError;

/// Largest length a frame could carry.
///
/// The most significant bit of a 64-bit length must be 0.
pub const MAX_DECLARED_LEN: u64 = i64::MAX as u64;

/// Payload length.
///
/// Could be 7 bits, 7+16 bits, or 7+64 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadLen {
    /// 0 - 125
    Standard(u8),
    /// 126 - 65535
    Extended1(u16),
    /// over 65536
    Extended2(u64),
}

impl PayloadLen {
    /// Pick the shortest form for `n`.
    #[inline]
    pub const fn from_num(n: u64) -> Self {
        if n < 126 {
            PayloadLen::Standard(n as u8)
        } else if n < 65536 {
            PayloadLen::Extended1(n as u16)
        } else {
            PayloadLen::Extended2(n)
        }
    }

    #[inline]
    pub const fn to_num(self) -> u64 {
        match self {
            PayloadLen::Standard(v) => v as u64,
            PayloadLen::Extended1(v) => v as u64,
            PayloadLen::Extended2(v) => v,
        }
    }

    /// Read the 7-bit field of the second head byte.
    ///
    /// An extended form is returned with a zero value, use
    /// [`read_extended`](Self::read_extended) to fill it.
    #[inline]
    pub const fn from_flag(b: u8) -> Self {
        match b & 0x7f {
            126 => PayloadLen::Extended1(0),
            127 => PayloadLen::Extended2(0),
            b => PayloadLen::Standard(b),
        }
    }

    /// The 7-bit field, which is the real length only for `Standard`.
    #[inline]
    pub const fn to_flag(&self) -> u8 {
        match self {
            PayloadLen::Standard(b) => *b,
            PayloadLen::Extended1(_) => 126,
            PayloadLen::Extended2(_) => 127,
        }
    }

    /// Fill the value of an extended form from `buf`, which starts right
    /// after the second head byte and holds at least 2 or 8 bytes.
    ///
    /// A 64-bit length above [`MAX_DECLARED_LEN`] is a
    /// [`FrameError::IllegalLength`] error.
    pub fn read_extended(self, buf: &[u8]) -> Result<Self, FrameError> {
        match self {
            PayloadLen::Standard(_) => Ok(self),
            PayloadLen::Extended1(_) => Ok(PayloadLen::Extended1(u16::from_be_bytes([buf[0], buf[1]]))),
            PayloadLen::Extended2(_) => {
                let mut b8 = [0u8; 8];
                b8.copy_from_slice(&buf[..8]);
                match u64::from_be_bytes(b8) {
                    n if n > MAX_DECLARED_LEN => Err(FrameError::IllegalLength(n)),
                    n => Ok(PayloadLen::Extended2(n)),
                }
            }
        }
    }

    /// Append the extended length bytes, nothing for `Standard`.
    pub fn write_extended(&self, buf: &mut Vec<u8>) {
        match self {
            PayloadLen::Standard(_) => {}
            PayloadLen::Extended1(v) => buf.extend_from_slice(&v.to_be_bytes()),
            PayloadLen::Extended2(v) => buf.extend_from_slice(&v.to_be_bytes()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn write_read(n: u64) -> (PayloadLen, Vec<u8>) {
        let len = PayloadLen::from_num(n);
        let mut buf = Vec::new();
        len.write_extended(&mut buf);

        let len2 = PayloadLen::from_flag(len.to_flag()).read_extended(&buf).unwrap();
        assert_eq!(len2.to_num(), n);
        (len2, buf)
    }

    #[test]
    fn shortest_form() {
        for n in [0, 1, 125] {
            let (len, ext) = write_read(n);
            assert_eq!(len, PayloadLen::Standard(n as u8));
            assert!(ext.is_empty());
        }

        for n in [126, 127, 65535] {
            let (len, ext) = write_read(n);
            assert_eq!(len.to_flag(), 126);
            assert_eq!(ext, (n as u16).to_be_bytes());
        }

        for n in [65536, 70000, MAX_DECLARED_LEN] {
            let (len, ext) = write_read(n);
            assert_eq!(len.to_flag(), 127);
            assert_eq!(ext, n.to_be_bytes());
        }
    }

    #[test]
    fn flag_ignores_mask_bit() {
        assert_eq!(PayloadLen::from_flag(0x80 | 5), PayloadLen::Standard(5));
        assert_eq!(PayloadLen::from_flag(0x80 | 126), PayloadLen::Extended1(0));
        assert_eq!(PayloadLen::from_flag(0x80 | 127), PayloadLen::Extended2(0));
    }

    #[test]
    fn most_significant_bit() {
        let n = MAX_DECLARED_LEN + 1;
        assert_eq!(
            PayloadLen::Extended2(0).read_extended(&n.to_be_bytes()),
            Err(FrameError::IllegalLength(n))
        );

        let n = u64::MAX;
        assert_eq!(
            PayloadLen::Extended2(0).read_extended(&n.to_be_bytes()),
            Err(FrameError::IllegalLength(n))
        );
    }
}
