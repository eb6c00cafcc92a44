//! Websocket connection.
//!
//! A [`Connection`] owns one transport stream. It is created by running
//! the opening handshake as a client or a server, then messages are
//! exchanged with [`send`](Connection::send) and [`recv`](Connection::recv).
//!
//! All operations block the caller. There is no internal locking: use one
//! writer and one reader at a time, or wrap the connection in a mutex.
//!
//! ```no_run
//! use plainws::connection::{connect, Message};
//!
//! let mut ws = connect("ws://127.0.0.1:8080/ws")?;
//! ws.send_text("hello world")?;
//! if let Some(Message::Text(s)) = ws.recv()? {
//!     println!("{}", s);
//! }
//! ws.close()?;
//! # Ok::<(), plainws::error::Error>(())
//! ```

mod message;
mod read;
mod write;

pub use message::Message;

use std::io::{self, BufReader, ErrorKind};
use std::net::TcpStream;

use log::debug;

use crate::role::Role;
use crate::config::Config;
use crate::transport::Transport;
use crate::endpoint::{Endpoint, IntoEndpoint};
use crate::handshake::{client_handshake, server_handshake, HandshakeState};
use crate::error::{Error, EndpointError, Result};

/// Websocket connection over a transport stream.
pub struct Connection<IO> {
    io: BufReader<IO>,
    role: Role,
    state: HandshakeState,
    config: Config,
    path: String,
    closed: bool,
}

impl<IO> std::fmt::Debug for Connection<IO> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("role", &self.role)
            .field("state", &self.state)
            .field("path", &self.path)
            .field("closed", &self.closed)
            .finish()
    }
}

/// Resolve `url`, open a tcp stream and perform a client handshake.
///
/// Only `ws` is supported here, for `wss` set up a tls stream and
/// use [`Connection::client`].
pub fn connect<T: IntoEndpoint>(url: T) -> Result<Connection<TcpStream>> {
    let endpoint = url.into_endpoint()?;
    if endpoint.is_tls() {
        return Err(EndpointError::TlsRequired.into());
    }
    let tcp = TcpStream::connect(endpoint.socket_addr())?;
    debug!("client: tcp connected to {}", endpoint);
    Connection::client(tcp, &endpoint)
}

impl<IO: Transport> Connection<IO> {
    /// Perform a client handshake over `io`, with default limits.
    #[inline]
    pub fn client(io: IO, endpoint: &Endpoint) -> Result<Self> {
        Self::client_with_config(io, endpoint, Config::default())
    }

    /// Perform a client handshake over `io`.
    ///
    /// A response that fails the check still returns a connection, in
    /// [`HandshakeState::FinishedInvalid`] state. EOF during the
    /// handshake or an io error is returned as an error.
    pub fn client_with_config(io: IO, endpoint: &Endpoint, config: Config) -> Result<Self> {
        let mut io = BufReader::new(io);
        let state = client_handshake(&mut io, endpoint, &config)?;

        Ok(Self {
            io,
            role: Role::Client,
            state,
            config,
            path: endpoint.path().to_string(),
            closed: false,
        })
    }

    /// Perform a server handshake over `io`, with default limits.
    #[inline]
    pub fn server(io: IO) -> Result<Self> { Self::server_with_config(io, Config::default()) }

    /// Perform a server handshake over `io`.
    ///
    /// A request that fails the check is answered with `400 Bad Request`,
    /// and the stream is closed. The returned connection is in
    /// [`HandshakeState::FinishedInvalid`] state. EOF during the handshake
    /// or an io error is returned as an error.
    pub fn server_with_config(io: IO, config: Config) -> Result<Self> {
        let mut io = BufReader::new(io);
        let outcome = server_handshake(&mut io, &config)?;

        let mut conn = Self {
            io,
            role: Role::Server,
            state: outcome.state,
            config,
            path: outcome.path,
            closed: false,
        };

        // the connection is returned either way
        if !conn.state.is_valid() {
            if let Err(e) = conn.close() {
                debug!("server: close rejected stream: {}", e);
            }
        }

        Ok(conn)
    }

    /// Close the underlying stream. Calling it again does nothing.
    ///
    /// No close frame is sent, use [`send_close`](Self::send_close) before
    /// for a clean shutdown.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        debug!("{}: close", self.role);
        self.io.get_mut().close()?;
        Ok(())
    }

    // close after a fatal error, the original error is kept
    fn abort(&mut self, e: Error) -> Error {
        debug!("{}: abort: {}", self.role, e);
        if !self.closed {
            self.closed = true;
            let _ = self.io.get_mut().close();
        }
        e
    }
}

impl<IO> Connection<IO> {
    #[inline]
    pub const fn role(&self) -> Role { self.role }

    #[inline]
    pub const fn handshake_state(&self) -> &HandshakeState { &self.state }

    #[inline]
    pub const fn config(&self) -> &Config { &self.config }

    /// Path of the upgrade request.
    #[inline]
    pub fn path(&self) -> &str { &self.path }

    /// Check if the transport is closed.
    ///
    /// Receiving a close frame does not close the transport.
    #[inline]
    pub const fn is_closed(&self) -> bool { self.closed }

    #[inline]
    pub fn get_ref(&self) -> &IO { self.io.get_ref() }

    /// Direct access to the stream. Reading from it bypasses data
    /// already buffered by the connection.
    #[inline]
    pub fn get_mut(&mut self) -> &mut IO { self.io.get_mut() }

    // frames may flow only on an open connection with a finished handshake
    fn ensure_ready(&self) -> Result<()> {
        if self.closed {
            return Err(io::Error::new(ErrorKind::NotConnected, "connection closed").into());
        }
        self.state.ready()?;
        Ok(())
    }
}
