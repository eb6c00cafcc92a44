//! Server upgrade response.
//!
//! From [RFC-6455 Section 4.2](https://datatracker.ietf.org/doc/html/rfc6455#section-4.2):
//!
//! If the server chooses to accept the incoming connection, it MUST
//! reply with a valid HTTP response.
//!
//! Example:
//!
//! ```text
//! HTTP/1.1 101 Switching Protocols
//! upgrade: websocket
//! connection: upgrade
//! sec-websocket-accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=
//! ```
//!

use super::HttpHeader;
use super::{write_header, filter_header};
use super::handshake_check;
use super::{HTTP_STATUS_LINE, HTTP_LINE_BREAK};
use super::static_headers::*;

use crate::error::HandshakeError;

/// Http response presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response<'b> {
    pub sec_accept: &'b [u8],
    pub other_headers: Vec<HttpHeader<'b>>,
}

impl<'b> Response<'b> {
    /// Create with provided accept key, without other headers.
    #[inline]
    pub const fn new(sec_accept: &'b [u8]) -> Self {
        Self {
            sec_accept,
            other_headers: Vec::new(),
        }
    }

    /// Append to the provided buffer, return the number of written bytes.
    ///
    /// Necessary headers, including `upgrade`, `connection`, and
    /// `sec-websocket-accept` are written to the buffer,
    /// then other headers(if any) are written in order.
    pub fn encode(&self, buf: &mut Vec<u8>) -> usize {
        let beg = buf.len();

        // HTTP/1.1 101 Switching Protocols
        buf.extend_from_slice(HTTP_STATUS_LINE);
        buf.extend_from_slice(HTTP_LINE_BREAK);

        // upgrade: websocket
        write_header!(buf, HEADER_UPGRADE_NAME, HEADER_UPGRADE_VALUE);

        // connection: upgrade
        write_header!(buf, HEADER_CONNECTION_NAME, HEADER_CONNECTION_VALUE);

        // sec-websocket-accept: {sec_accept}
        write_header!(buf, HEADER_SEC_WEBSOCKET_ACCEPT_NAME, self.sec_accept);

        // other headers
        for hdr in self.other_headers.iter() {
            write_header!(buf, hdr)
        }

        // finish with CRLF
        buf.extend_from_slice(HTTP_LINE_BREAK);

        buf.len() - beg
    }

    /// Parse from a provided buffer, return the response and
    /// the number of bytes parsed.
    ///
    /// The status code must be 101. Necessary headers, including `upgrade`,
    /// `connection`, and `sec-websocket-accept` are parsed and checked.
    /// Optional headers are stored in `other_headers`.
    /// The accept key itself is compared by the caller.
    ///
    /// If the buffer does not contain a complete http response,
    /// a [`HandshakeError::IncompleteResponse`] error will be returned.
    pub fn decode(buf: &'b [u8], max_headers: usize) -> Result<(Self, usize), HandshakeError> {
        let mut headers = vec![httparse::EMPTY_HEADER; max_headers];
        let mut response = httparse::Response::new(&mut headers);

        // return value
        let decode_n = match response.parse(buf)? {
            httparse::Status::Complete(n) => n,
            httparse::Status::Partial => return Err(HandshakeError::IncompleteResponse),
        };

        // check version, should be HTTP/1.1
        if response.version.unwrap_or_default() != 1_u8 {
            return Err(HandshakeError::HttpVersion);
        }

        // check status code, should be 101
        let code = response.code.unwrap_or_default();
        if code != 101 {
            return Err(HandshakeError::HttpStatusCode(code));
        }

        let mut required_headers = [
            HEADER_UPGRADE,
            HEADER_CONNECTION,
            HEADER_SEC_WEBSOCKET_ACCEPT,
        ];

        // filter required headers, save other headers
        let mut other_headers = Vec::new();
        filter_header(response.headers, &mut required_headers, &mut other_headers);

        let [upgrade_hdr, connection_hdr, sec_accept_hdr] = required_headers;

        // check header value (case insensitive)
        handshake_check!(upgrade_hdr, HEADER_UPGRADE_VALUE, HandshakeError::Upgrade);

        handshake_check!(
            connection_hdr,
            HEADER_CONNECTION_VALUE,
            HandshakeError::Connection
        );

        // check missing header
        handshake_check!(sec_accept_hdr, HandshakeError::AcceptMismatch);

        Ok((
            Self {
                sec_accept: sec_accept_hdr.value,
                other_headers,
            },
            decode_n,
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::MAX_ALLOW_HEADERS;
    use super::super::test::{make_headers, TEMPLATE_HEADERS};
    use rand::prelude::*;

    #[test]
    fn server_handshake() {
        for i in 0..64 {
            let hdr_len: usize = thread_rng().gen_range(1..128);
            let headers = format!(
                "HTTP/1.1 101 Switching Protocols\r\n{}\r\n",
                make_headers(i, hdr_len, TEMPLATE_HEADERS)
            );

            let (response, decode_n) = Response::decode(headers.as_bytes(), 1024).unwrap();

            assert_eq!(decode_n, headers.len());
            assert_eq!(response.sec_accept, b"s3pPLMBiTxaQ9kYGzzhZRbK+xOo=");

            // host, sec-websocket-key, sec-websocket-version
            assert_eq!(response.other_headers.len(), i + 3);

            let mut buf = Vec::new();
            let encode_n = response.encode(&mut buf);
            assert_eq!(encode_n, decode_n);
        }
    }

    #[test]
    fn server_handshake2() {
        let mut buf = Vec::new();
        let n = Response::new(b"s3pPLMBiTxaQ9kYGzzhZRbK+xOo=").encode(&mut buf);

        assert_eq!(
            &buf[..n],
            b"HTTP/1.1 101 Switching Protocols\r\n\
            upgrade: websocket\r\n\
            connection: upgrade\r\n\
            sec-websocket-accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=\r\n\r\n"
        );

        let (response, decode_n) = Response::decode(&buf, MAX_ALLOW_HEADERS).unwrap();
        assert_eq!(decode_n, n);
        assert_eq!(response.sec_accept, b"s3pPLMBiTxaQ9kYGzzhZRbK+xOo=");
    }

    #[test]
    fn partial_response() {
        let mut buf = Vec::new();
        Response::new(b"s3pPLMBiTxaQ9kYGzzhZRbK+xOo=").encode(&mut buf);

        for i in 0..buf.len() {
            assert_eq!(
                Response::decode(&buf[..i], MAX_ALLOW_HEADERS),
                Err(HandshakeError::IncompleteResponse)
            );
        }
    }

    #[test]
    fn catch_errors() {
        macro_rules! fail {
            ($resp: expr, $e: expr) => {
                assert_eq!(Response::decode($resp.as_bytes(), MAX_ALLOW_HEADERS), Err($e));
            };
        }

        fail!(
            "HTTP/1.1 400 Bad Request\r\nconnection: close\r\ncontent-length: 0\r\n\r\n",
            HandshakeError::HttpStatusCode(400)
        );
        fail!(
            "HTTP/1.0 101 Switching Protocols\r\nupgrade: websocket\r\nconnection: upgrade\r\n\
            sec-websocket-accept: x\r\n\r\n",
            HandshakeError::HttpVersion
        );
        fail!(
            "HTTP/1.1 101 Switching Protocols\r\nconnection: upgrade\r\n\
            sec-websocket-accept: x\r\n\r\n",
            HandshakeError::Upgrade
        );
        fail!(
            "HTTP/1.1 101 Switching Protocols\r\nupgrade: websocket\r\n\
            sec-websocket-accept: x\r\n\r\n",
            HandshakeError::Connection
        );
        fail!(
            "HTTP/1.1 101 Switching Protocols\r\nupgrade: websocket\r\nconnection: upgrade\r\n\r\n",
            HandshakeError::AcceptMismatch
        );
    }
}
