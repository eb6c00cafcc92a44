//! Websocket server.
//!
//! [`Server::accept`] blocks on the listener, then performs the server
//! handshake on the new stream before returning, so a client that stalls
//! in the middle of its handshake also stalls the next accept.
//!
//! Everything runs on the calling thread. To serve clients concurrently,
//! move each accepted connection to its own thread:
//!
//! ```no_run
//! use std::thread;
//! use plainws::server::Server;
//! use plainws::connection::Message;
//!
//! let mut server = Server::bind("ws://127.0.0.1:8080")?;
//! for conn in server.incoming() {
//!     let mut conn = conn?;
//!     thread::spawn(move || {
//!         while let Ok(Some(Message::Text(s))) = conn.recv() {
//!             let _ = conn.send_text(&s);
//!         }
//!     });
//! }
//! # Ok::<(), plainws::error::Error>(())
//! ```

use std::net::{SocketAddr, TcpListener};
use std::ops::ControlFlow;

use log::{debug, warn};

use crate::config::Config;
use crate::connection::Connection;
use crate::endpoint::IntoEndpoint;
use crate::transport::Listener;
use crate::error::{EndpointError, Result};

/// Websocket server, owning a listener.
#[derive(Debug)]
pub struct Server<L> {
    listener: L,
    config: Config,
}

impl Server<TcpListener> {
    /// Resolve `url` and bind a tcp listener to its host and port.
    ///
    /// Only `ws` is supported here, for `wss` wrap a listener producing
    /// tls streams and use [`Server::new`].
    pub fn bind<T: IntoEndpoint>(url: T) -> Result<Self> {
        let endpoint = url.into_endpoint()?;
        if endpoint.is_tls() {
            return Err(EndpointError::TlsRequired.into());
        }
        let listener = TcpListener::bind(endpoint.socket_addr())?;
        debug!("server: listening on {}", endpoint);
        Ok(Self::new(listener))
    }

    /// Local address of the listener.
    #[inline]
    pub fn local_addr(&self) -> Result<SocketAddr> { Ok(self.listener.local_addr()?) }
}

impl<L: Listener> Server<L> {
    /// Create with default limits.
    #[inline]
    pub fn new(listener: L) -> Self { Self::with_config(listener, Config::default()) }

    #[inline]
    pub const fn with_config(listener: L, config: Config) -> Self { Self { listener, config } }

    #[inline]
    pub const fn config(&self) -> &Config { &self.config }

    #[inline]
    pub const fn get_ref(&self) -> &L { &self.listener }

    /// Accept a stream and perform the server handshake on it.
    ///
    /// A rejected request returns a closed connection in
    /// `FinishedInvalid` state, see [`Connection::server`].
    pub fn accept(&mut self) -> Result<Connection<L::Stream>> {
        let stream = self.accept_stream()?;
        self.upgrade(stream)
    }

    // listener errors are kept apart from handshake errors
    fn accept_stream(&mut self) -> Result<L::Stream> {
        let stream = self.listener.accept()?;
        debug!("server: stream accepted");
        Ok(stream)
    }

    fn upgrade(&self, stream: L::Stream) -> Result<Connection<L::Stream>> {
        Connection::server_with_config(stream, self.config)
    }

    /// Iterate over accepted connections, blocking on each `next`.
    ///
    /// The iterator never ends by itself. It yields connections in
    /// accept order and does not handle them concurrently.
    #[inline]
    pub fn incoming(&mut self) -> Incoming<'_, L> { Incoming { server: self } }

    /// Accept connections one after another, passing each successfully
    /// negotiated connection to `handler` and closing it once the handler
    /// returns.
    ///
    /// Connections failing the handshake are skipped. The loop stops when
    /// `handler` returns [`ControlFlow::Break`], or with an error when the
    /// listener fails.
    pub fn server_loop<F>(&mut self, mut handler: F) -> Result<()>
    where
        F: FnMut(&mut Connection<L::Stream>) -> ControlFlow<()>,
    {
        loop {
            let stream = self.accept_stream()?;

            let mut conn = match self.upgrade(stream) {
                Ok(conn) => conn,
                Err(e) => {
                    warn!("server: handshake aborted: {}", e);
                    continue;
                }
            };

            if !conn.handshake_state().is_valid() {
                continue;
            }

            let flow = handler(&mut conn);

            if let Err(e) = conn.close() {
                debug!("server: close: {}", e);
            }

            if flow.is_break() {
                return Ok(());
            }
        }
    }

    /// Close the listener.
    #[inline]
    pub fn close(self) { drop(self) }
}

/// Blocking iterator over accepted connections.
pub struct Incoming<'a, L> {
    server: &'a mut Server<L>,
}

impl<L: Listener> Iterator for Incoming<'_, L> {
    type Item = Result<Connection<L::Stream>>;

    fn next(&mut self) -> Option<Self::Item> { Some(self.server.accept()) }
}
