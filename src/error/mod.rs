#![allow(missing_docs)]
//! Errors

mod endpoint;
mod frame;
mod handshake;

pub use endpoint::EndpointError;
pub use frame::FrameError;
pub use handshake::HandshakeError;

use std::fmt::{Display, Formatter};

/// Crate-wide result.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum Error {
    Endpoint(EndpointError),

    Frame(FrameError),

    Handshake(HandshakeError),

    Io(std::io::Error),
}

impl Error {
    /// Check if the error comes from the underlying transport.
    #[inline]
    pub const fn is_transport(&self) -> bool { matches!(self, Error::Io(_)) }
}

impl From<EndpointError> for Error {
    fn from(e: EndpointError) -> Self { Error::Endpoint(e) }
}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self { Error::Frame(e) }
}

impl From<HandshakeError> for Error {
    fn from(e: HandshakeError) -> Self { Error::Handshake(e) }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error { Error::Io(e) }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use Error::*;
        match self {
            Endpoint(e) => write!(f, "Endpoint error: {}", e),
            Frame(e) => write!(f, "Frame error: {}", e),
            Handshake(e) => write!(f, "Handshake error: {}", e),
            Io(e) => write!(f, "Io error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;
        match self {
            Endpoint(e) => Some(e),
            Frame(e) => Some(e),
            Handshake(e) => Some(e),
            Io(e) => Some(e),
        }
    }
}
