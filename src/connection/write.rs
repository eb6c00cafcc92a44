use std::io::Write;

use log::trace;

use super::Connection;

use crate::frame::{Frame, OpCode, MAX_CONTROL_PAYLOAD_LEN};
use crate::transport::Transport;
use crate::error::{FrameError, Result};

impl<IO: Transport> Connection<IO> {
    /// Send `data` as one frame of type `opcode`.
    ///
    /// The frame is masked with a new random key as a client,
    /// and never masked as a server. The whole frame is written
    /// with a single `write_all`. An io error closes the connection.
    pub fn send(&mut self, data: &[u8], opcode: OpCode) -> Result<()> {
        self.ensure_ready()?;

        if opcode == OpCode::Continue {
            return Err(FrameError::IllegalOpCode(opcode as u8).into());
        }

        if opcode.is_control() && data.len() > MAX_CONTROL_PAYLOAD_LEN {
            return Err(FrameError::ControlTooLong(data.len()).into());
        }

        let buf = Frame::new(opcode, data).encode(self.role);
        trace!("{}: send {} bytes", self.role, buf.len());

        let written = {
            let io = self.io.get_mut();
            io.write_all(&buf).and_then(|_| io.flush())
        };
        if let Err(e) = written {
            return Err(self.abort(e.into()));
        }

        Ok(())
    }

    /// Send a text frame.
    #[inline]
    pub fn send_text(&mut self, text: &str) -> Result<()> { self.send(text.as_bytes(), OpCode::Text) }

    /// Send a binary frame.
    #[inline]
    pub fn send_binary(&mut self, data: &[u8]) -> Result<()> { self.send(data, OpCode::Binary) }

    #[inline]
    pub fn ping(&mut self, data: &[u8]) -> Result<()> { self.send(data, OpCode::Ping) }

    #[inline]
    pub fn pong(&mut self, data: &[u8]) -> Result<()> { self.send(data, OpCode::Pong) }

    /// Send a close frame, with an empty body or a status code
    /// followed by a reason.
    ///
    /// The stream is left open.
    pub fn send_close(&mut self, status: Option<(u16, &str)>) -> Result<()> {
        let mut payload = Vec::new();
        if let Some((code, reason)) = status {
            payload.reserve(2 + reason.len());
            payload.extend_from_slice(&code.to_be_bytes());
            payload.extend_from_slice(reason.as_bytes());
        }
        self.send(&payload, OpCode::Close)
    }
}
