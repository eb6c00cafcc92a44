//! In-memory io for unit tests.

use std::io::{Read, Write, Result, ErrorKind};

use crate::transport::Transport;

pub const SEC_KEY: &[u8] = b"dGhlIHNhbXBsZSBub25jZQ==";

pub const REQUEST: &[u8] = b"\
    GET /ws HTTP/1.1\r\n\
    host: www.example.com\r\n\
    upgrade: websocket\r\n\
    connection: upgrade\r\n\
    sec-websocket-key: dGhlIHNhbXBsZSBub25jZQ==\r\n\
    sec-websocket-version: 13\r\n\r\n";

pub const RESPONSE: &[u8] = b"\
    HTTP/1.1 101 Switching Protocols\r\n\
    upgrade: websocket\r\n\
    connection: upgrade\r\n\
    sec-websocket-accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=\r\n\r\n";

/// Read from `rbuf` and write to `wbuf`, at most `rlimit`/`wlimit`
/// bytes per call.
pub struct LimitReadWriter {
    pub rbuf: Vec<u8>,
    pub wbuf: Vec<u8>,
    pub rlimit: usize,
    pub wlimit: usize,
    pub cursor: usize,
    pub closed: bool,
}

impl LimitReadWriter {
    pub fn new(rbuf: &[u8], rlimit: usize, wlimit: usize) -> Self {
        Self {
            rbuf: rbuf.to_vec(),
            wbuf: Vec::new(),
            rlimit,
            wlimit,
            cursor: 0,
            closed: false,
        }
    }
}

impl Read for LimitReadWriter {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.closed {
            return Err(ErrorKind::NotConnected.into());
        }
        let to_read = std::cmp::min(buf.len(), self.rlimit);
        let left_data = self.rbuf.len() - self.cursor;
        let n = std::cmp::min(to_read, left_data);

        buf[..n].copy_from_slice(&self.rbuf[self.cursor..self.cursor + n]);
        self.cursor += n;
        Ok(n)
    }
}

impl Write for LimitReadWriter {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        if self.closed {
            return Err(ErrorKind::NotConnected.into());
        }
        let len = std::cmp::min(buf.len(), self.wlimit);
        self.wbuf.write(&buf[..len])
    }

    fn flush(&mut self) -> Result<()> { Ok(()) }
}

impl Transport for LimitReadWriter {
    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
