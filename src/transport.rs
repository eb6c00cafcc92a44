//! Transport capabilities.
//!
//! The protocol engine only needs a blocking byte stream that could be
//! closed, and a listener producing such streams. Tls, proxies, timeouts
//! and socket options are set up by the caller before handing the stream
//! over, so any tls stream type works once it implements [`Transport`].

use std::io::{Read, Write, Result, ErrorKind};
use std::net::{Shutdown, TcpListener, TcpStream};

/// Blocking stream.
pub trait Transport: Read + Write {
    /// Shut down both directions. Closing an already closed stream is not an error.
    fn close(&mut self) -> Result<()>;
}

/// Blocking listener.
pub trait Listener {
    type Stream: Transport;

    /// Block until a new stream is accepted.
    fn accept(&mut self) -> Result<Self::Stream>;
}

impl Transport for TcpStream {
    fn close(&mut self) -> Result<()> {
        match self.shutdown(Shutdown::Both) {
            Err(ref e) if e.kind() == ErrorKind::NotConnected => Ok(()),
            x => x,
        }
    }
}

impl Listener for TcpListener {
    type Stream = TcpStream;

    #[inline]
    fn accept(&mut self) -> Result<TcpStream> { TcpListener::accept(self).map(|(tcp, _)| tcp) }
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::os::unix::net::{UnixListener, UnixStream};

    impl Transport for UnixStream {
        fn close(&mut self) -> Result<()> {
            match self.shutdown(Shutdown::Both) {
                Err(ref e) if e.kind() == ErrorKind::NotConnected => Ok(()),
                x => x,
            }
        }
    }

    impl Listener for UnixListener {
        type Stream = UnixStream;

        #[inline]
        fn accept(&mut self) -> Result<UnixStream> {
            UnixListener::accept(self).map(|(unix, _)| unix)
        }
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    #[inline]
    fn close(&mut self) -> Result<()> { (**self).close() }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    #[inline]
    fn close(&mut self) -> Result<()> { (**self).close() }
}

impl<L: Listener + ?Sized> Listener for &mut L {
    type Stream = L::Stream;

    #[inline]
    fn accept(&mut self) -> Result<Self::Stream> { (**self).accept() }
}
