//! Client upgrade request.
//!
//! From [RFC-6455 Section 4.1](https://datatracker.ietf.org/doc/html/rfc6455#section-4.1):
//!
//! Once a connection to the server has been established (including a
//! connection via a proxy or over a TLS-encrypted tunnel), the client
//! MUST send an opening handshake to the server.  The handshake consists
//! of an HTTP Upgrade request, along with a list of required and
//! optional header fields.
//!
//! Example:
//!
//! ```text
//! GET /path HTTP/1.1
//! host: www.example.com
//! upgrade: websocket
//! connection: upgrade
//! sec-websocket-key: dGhlIHNhbXBsZSBub25jZQ==
//! sec-websocket-version: 13
//! ```
//!

use super::HttpHeader;
use super::{write_header, filter_header, trim};
use super::handshake_check;
use super::{HTTP_METHOD, HTTP_VERSION, HTTP_LINE_BREAK};
use super::static_headers::*;

use crate::error::HandshakeError;

/// Http request presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request<'b> {
    pub path: &'b [u8],
    pub host: &'b [u8],
    pub sec_key: &'b [u8],
    pub other_headers: Vec<HttpHeader<'b>>,
}

impl<'b> Request<'b> {
    /// Create with provided path, host and key, without other headers.
    #[inline]
    pub const fn new(path: &'b [u8], host: &'b [u8], sec_key: &'b [u8]) -> Self {
        Self {
            path,
            host,
            sec_key,
            other_headers: Vec::new(),
        }
    }

    /// Append to the provided buffer, return the number of written bytes.
    ///
    /// Necessary headers, including `host`, `upgrade`, `connection`,
    /// `sec-websocket-key` and `sec-websocket-version` are written to
    /// the buffer, then other headers(if any) are written in order.
    pub fn encode(&self, buf: &mut Vec<u8>) -> usize {
        let beg = buf.len();

        // GET {path} HTTP/1.1
        buf.extend_from_slice(HTTP_METHOD);
        buf.push(0x20);
        buf.extend_from_slice(self.path);
        buf.push(0x20);
        buf.extend_from_slice(HTTP_VERSION);
        buf.extend_from_slice(HTTP_LINE_BREAK);

        // host: {host}
        write_header!(buf, HEADER_HOST_NAME, self.host);

        // upgrade: websocket
        write_header!(buf, HEADER_UPGRADE_NAME, HEADER_UPGRADE_VALUE);

        // connection: upgrade
        write_header!(buf, HEADER_CONNECTION_NAME, HEADER_CONNECTION_VALUE);

        // sec-websocket-key: {sec_key}
        write_header!(buf, HEADER_SEC_WEBSOCKET_KEY_NAME, self.sec_key);

        // sec-websocket-version: 13
        write_header!(
            buf,
            HEADER_SEC_WEBSOCKET_VERSION_NAME,
            HEADER_SEC_WEBSOCKET_VERSION_VALUE
        );

        // other headers
        for hdr in self.other_headers.iter() {
            write_header!(buf, hdr)
        }

        // finish with CRLF
        buf.extend_from_slice(HTTP_LINE_BREAK);

        buf.len() - beg
    }

    /// Parse from a provided buffer, return the request and
    /// the number of bytes parsed.
    ///
    /// Necessary headers, including `host`, `upgrade`, `connection`,
    /// `sec-websocket-key` and `sec-websocket-version` are parsed and checked.
    /// Optional headers (like `sec-websocket-protocol`) are stored
    /// in `other_headers`. At most `max_headers` headers are accepted.
    ///
    /// If the buffer does not contain a complete http request,
    /// a [`HandshakeError::IncompleteRequest`] error will be returned.
    /// If the required headers(mentioned above) do not pass the check
    /// (case insensitive), other corresponding errors will be returned.
    pub fn decode(buf: &'b [u8], max_headers: usize) -> Result<(Self, usize), HandshakeError> {
        let mut headers = vec![httparse::EMPTY_HEADER; max_headers];
        let mut request = httparse::Request::new(&mut headers);

        // return value
        let decode_n = match request.parse(buf)? {
            httparse::Status::Complete(n) => n,
            httparse::Status::Partial => return Err(HandshakeError::IncompleteRequest),
        };

        // method, path and version are always present once complete
        // ref: https://docs.rs/httparse/latest/httparse/struct.Request.html
        let method = request.method.unwrap_or_default();
        let path = request.path.unwrap_or_default();
        let version = request.version.unwrap_or_default();

        // check method
        if method.as_bytes() != HTTP_METHOD {
            return Err(HandshakeError::HttpMethod);
        }

        // check version, should be HTTP/1.1
        if version != 1_u8 {
            return Err(HandshakeError::HttpVersion);
        }

        let mut required_headers = [
            HEADER_HOST,
            HEADER_UPGRADE,
            HEADER_CONNECTION,
            HEADER_SEC_WEBSOCKET_KEY,
            HEADER_SEC_WEBSOCKET_VERSION,
        ];

        // filter required headers, save other headers
        let mut other_headers = Vec::new();
        filter_header(request.headers, &mut required_headers, &mut other_headers);

        let [host_hdr, upgrade_hdr, connection_hdr, sec_key_hdr, sec_version_hdr] =
            required_headers;

        // check missing header
        handshake_check!(host_hdr, HandshakeError::HttpHost);
        handshake_check!(sec_key_hdr, HandshakeError::SecWebSocketKey);

        // check header value (case insensitive)
        // ref: https://datatracker.ietf.org/doc/html/rfc6455#section-4.1
        handshake_check!(upgrade_hdr, HEADER_UPGRADE_VALUE, HandshakeError::Upgrade);

        handshake_check!(
            connection_hdr,
            HEADER_CONNECTION_VALUE,
            HandshakeError::Connection
        );

        // a single version, not a list
        if !trim(sec_version_hdr.value).eq_ignore_ascii_case(HEADER_SEC_WEBSOCKET_VERSION_VALUE) {
            return Err(HandshakeError::VersionMismatch);
        }

        Ok((
            Self {
                path: path.as_bytes(),
                host: host_hdr.value,
                sec_key: sec_key_hdr.value,
                other_headers,
            },
            decode_n,
        ))
    }
}
