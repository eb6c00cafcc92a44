use super::{Connection, Message};

use crate::frame::{Frame, OpCode};
use crate::transport::Transport;
use crate::error::{FrameError, Result};

impl<IO: Transport> Connection<IO> {
    /// Read the next frame, blocking until it is complete.
    ///
    /// Returns `Ok(None)` once the peer closes the stream between frames.
    /// Any error closes the connection.
    pub fn recv_frame(&mut self) -> Result<Option<Frame>> {
        self.ensure_ready()?;

        let decoded = Frame::decode(&mut self.io, self.config.max_payload_len);
        decoded.map_err(|e| self.abort(e))
    }

    /// Read the next message.
    ///
    /// Returns `Ok(None)` once the peer closes the stream between frames.
    /// A close frame is returned as [`Message::Close`], the stream stays
    /// open until [`close`](Self::close) is called.
    ///
    /// Fragmented messages are not supported, a continuation frame or a
    /// frame without fin fails with [`FrameError::Fragmented`]. Any error
    /// closes the connection.
    pub fn recv(&mut self) -> Result<Option<Message>> {
        let frame = match self.recv_frame()? {
            Some(frame) => frame,
            None => return Ok(None),
        };

        if !frame.fin {
            return Err(self.abort(FrameError::Fragmented.into()));
        }

        let msg = match frame.opcode {
            OpCode::Text => match String::from_utf8(frame.payload) {
                Ok(s) => Message::Text(s),
                Err(_) => return Err(self.abort(FrameError::InvalidUtf8.into())),
            },
            OpCode::Binary => Message::Binary(frame.payload),
            OpCode::Ping => Message::Ping(frame.payload),
            OpCode::Pong => Message::Pong(frame.payload),
            OpCode::Close => Message::Close(frame.payload),
            OpCode::Continue => return Err(self.abort(FrameError::Fragmented.into())),
        };

        Ok(Some(msg))
    }
}
