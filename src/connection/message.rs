use crate::frame::OpCode;

/// A complete message returned by [`Connection::recv`](super::Connection::recv).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Text(String),
    Binary(Vec<u8>),
    Ping(Vec<u8>),
    Pong(Vec<u8>),
    /// Close frame received, payload may be empty.
    Close(Vec<u8>),
}

impl Message {
    #[inline]
    pub const fn opcode(&self) -> OpCode {
        match self {
            Message::Text(_) => OpCode::Text,
            Message::Binary(_) => OpCode::Binary,
            Message::Ping(_) => OpCode::Ping,
            Message::Pong(_) => OpCode::Pong,
            Message::Close(_) => OpCode::Close,
        }
    }

    #[inline]
    pub const fn is_close(&self) -> bool { matches!(self, Message::Close(_)) }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Message::Text(s) => s.as_bytes(),
            Message::Binary(b) | Message::Ping(b) | Message::Pong(b) | Message::Close(b) => b,
        }
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Message::Text(s) => s.into_bytes(),
            Message::Binary(b) | Message::Ping(b) | Message::Pong(b) | Message::Close(b) => b,
        }
    }
}
