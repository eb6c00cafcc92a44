// #![warn(missing_docs)]

//! Blocking websocket implement over any read/write stream.
//!
//! ## Features
//! - Plain `ws://` endpoints, tls is left to the transport.
//! - Works with anything that implements [`Read`](std::io::Read) + [`Write`](std::io::Write).
//! - One thread per connection, no async runtime.
//!
//! ## High-level API
//!
//! - [`connection`]
//! - [`server`]
//! - [`endpoint`]
//!
//! ```no_run
//! use plainws::{connect, Message};
//!
//! let mut conn = connect("ws://127.0.0.1:8080/echo")?;
//! conn.send_text("hello world")?;
//! if let Some(Message::Text(s)) = conn.recv()? {
//!     println!("{}", s);
//! }
//! conn.close()?;
//! # Ok::<(), plainws::Error>(())
//! ```
//!
//! ## Low-level API
//!
//! - [`frame`]
//! - [`handshake`]
//!
//! Frame:
//!
//! ```
//! use plainws::frame::{Frame, OpCode};
//! use plainws::role::Role;
//!
//! // encode a frame
//! let buf = Frame::new(OpCode::Binary, &b"abc"[..]).encode(Role::Server);
//!
//! // decode a frame
//! let frame = Frame::decode(&mut &buf[..], 1024).unwrap().unwrap();
//! assert_eq!(frame.payload, b"abc");
//! ```
//!
//! Handshake:
//!
//! ```
//! use plainws::handshake::{Request, new_sec_key};
//!
//! // make a client handshake request
//! let sec_key = new_sec_key();
//! let request = Request::new(b"/ws", b"www.example.com", &sec_key);
//! let mut buf = Vec::new();
//! let offset = request.encode(&mut buf);
//!
//! // parse it on the server side
//! let (request, n) = Request::decode(&buf, 32).unwrap();
//! assert_eq!(n, offset);
//! assert_eq!(request.path, b"/ws");
//! ```

pub mod role;
pub mod error;
pub mod frame;
pub mod config;
pub mod endpoint;
pub mod handshake;
pub mod transport;
pub mod connection;
pub mod server;

#[cfg(test)]
mod testing;

pub use role::Role;
pub use config::Config;
pub use endpoint::Endpoint;
pub use frame::{Frame, OpCode};
pub use error::{Error, Result};
pub use server::Server;
pub use connection::{connect, Connection, Message};
