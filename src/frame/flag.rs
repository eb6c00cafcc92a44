//! Fin flag and opcode.

use crate::error::FrameError;

/// Fin flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fin {
    /// a byte with its leading bit set
    Y = 0x80,

    /// a byte with its leading bit clear
    N = 0x00,
}

/// Frame opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    /// denotes a continuation frame, 0x00
    Continue = 0x00,
    /// denotes a text frame, 0x01
    Text = 0x01,
    /// denotes a binary frame, 0x02
    Binary = 0x02,

    /// denotes a connection close, 0x08
    Close = 0x08,
    /// denotes a ping, 0x09
    Ping = 0x09,
    /// denotes a pong, 0x0a
    Pong = 0x0a,
}

impl Fin {
    /// Parse from byte.
    ///
    /// Reserved bits(RSV1-3) must be clear since no extension
    /// is negotiated.
    #[inline]
    pub const fn from_flag(b: u8) -> Result<Self, FrameError> {
        if b & 0x70 != 0 {
            return Err(FrameError::ReservedBits);
        }
        let fin = match b & 0x80 {
            0x80 => Fin::Y,
            _ => Fin::N,
        };
        Ok(fin)
    }

    /// Convert to bool.
    #[inline]
    pub const fn is_set(self) -> bool { matches!(self, Fin::Y) }
}

impl OpCode {
    /// Parse from byte.
    #[inline]
    pub const fn from_flag(b: u8) -> Result<Self, FrameError> {
        use OpCode::*;
        let opcode = match b & 0x0f {
            0x00 => Continue,
            0x01 => Text,
            0x02 => Binary,
            0x08 => Close,
            0x09 => Ping,
            0x0a => Pong,
            x => return Err(FrameError::IllegalOpCode(x)),
        };
        Ok(opcode)
    }

    /// Close, Ping and Pong are control frames.
    #[inline]
    pub const fn is_control(self) -> bool { self as u8 & 0x08 != 0 }
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules!  enc_dec {
        ($class: ident $(, $v: expr )+ ) => {
            $(
                let v = $class::from_flag($v).unwrap();
                assert_eq!(v as u8, $v);
            )+
        };
    }

    #[test]
    fn fin() {
        enc_dec!(Fin, 0x00, 0x80);
    }

    #[test]
    fn opcode() {
        enc_dec!(OpCode, 0x00, 0x01, 0x02, 0x08, 0x09, 0x0a);
    }

    #[test]
    fn reserved_bits() {
        for b in [0x40, 0x20, 0x10, 0xc1, 0x91] {
            assert_eq!(Fin::from_flag(b), Err(FrameError::ReservedBits));
        }
    }

    #[test]
    fn illegal_opcode() {
        for b in [0x03, 0x07, 0x0b, 0x0f] {
            assert_eq!(OpCode::from_flag(b), Err(FrameError::IllegalOpCode(b)));
        }
    }

    #[test]
    fn control() {
        assert!(OpCode::Close.is_control());
        assert!(OpCode::Ping.is_control());
        assert!(OpCode::Pong.is_control());
        assert!(!OpCode::Text.is_control());
        assert!(!OpCode::Binary.is_control());
        assert!(!OpCode::Continue.is_control());
    }
}
