//! Client handshake.

use std::io::{BufReader, Read, Write};

use log::{debug, warn};

use super::detail::read_head;
use super::{Request, Response, HandshakeState};
use super::{new_sec_key, derive_accept_key};

use crate::config::Config;
use crate::endpoint::Endpoint;
use crate::error::{Error, HandshakeError};

/// Perform a client handshake with a random key.
///
/// Send the upgrade request, then block on reading until a complete
/// response head is received. A rejected or malformed response yields
/// [`HandshakeState::FinishedInvalid`]. EOF before the end of the
/// response head and io errors are returned as errors.
pub fn client_handshake<IO: Read + Write>(
    io: &mut BufReader<IO>,
    endpoint: &Endpoint,
    config: &Config,
) -> Result<HandshakeState, Error> {
    client_handshake_with_key(io, endpoint, &new_sec_key(), config)
}

/// Same as [`client_handshake`], using the provided `sec-websocket-key`.
pub fn client_handshake_with_key<IO: Read + Write>(
    io: &mut BufReader<IO>,
    endpoint: &Endpoint,
    sec_key: &[u8],
    config: &Config,
) -> Result<HandshakeState, Error> {
    let mut state = HandshakeState::new();
    let host = endpoint.host_header();

    debug!("client: handshake with {}", endpoint);

    // send
    let mut buf = Vec::with_capacity(256);
    let request = Request::new(endpoint.path().as_bytes(), host.as_bytes(), sec_key);
    let _ = request.encode(&mut buf);
    io.get_mut().write_all(&buf)?;
    io.get_mut().flush()?;

    // recv
    let head = match read_head(io, config.max_handshake_len, HandshakeError::IncompleteResponse) {
        Ok(head) => head,
        Err(Error::Handshake(e)) if !e.is_incomplete() => {
            warn!("client: handshake failed: {}", e);
            state.finish(Err(e));
            return Ok(state);
        }
        Err(e) => return Err(e),
    };

    // check
    let outcome = Response::decode(&head, config.max_headers).and_then(|(response, _)| {
        let sec_accept = derive_accept_key(sec_key);
        if response.sec_accept == sec_accept {
            Ok(())
        } else {
            Err(HandshakeError::AcceptMismatch)
        }
    });

    match &outcome {
        Ok(()) => debug!("client: handshake finished"),
        Err(e) => warn!("client: handshake failed: {}", e),
    }

    state.finish(outcome);
    Ok(state)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;

    fn endpoint() -> Endpoint { Endpoint::resolve("ws://www.example.com/ws").unwrap() }

    #[test]
    fn send_upgrade_request() {
        for limit in 1..=256 {
            let rw = LimitReadWriter::new(RESPONSE, limit, limit);
            let mut io = BufReader::new(rw);

            let state =
                client_handshake_with_key(&mut io, &endpoint(), SEC_KEY, &Config::new()).unwrap();

            assert_eq!(state, HandshakeState::FinishedValid);
            assert_eq!(io.get_ref().wbuf, REQUEST);
        }
    }

    #[test]
    fn random_key_mismatch() {
        // canned response is derived from a fixed key
        let rw = LimitReadWriter::new(RESPONSE, 1, 1);
        let mut io = BufReader::new(rw);

        let state = client_handshake(&mut io, &endpoint(), &Config::new()).unwrap();
        assert_eq!(
            state,
            HandshakeState::FinishedInvalid(HandshakeError::AcceptMismatch)
        );
    }

    #[test]
    fn tampered_accept() {
        let response = String::from_utf8_lossy(RESPONSE).replace("xOo=", "xOp=");
        let rw = LimitReadWriter::new(response.as_bytes(), 7, 7);
        let mut io = BufReader::new(rw);

        let state =
            client_handshake_with_key(&mut io, &endpoint(), SEC_KEY, &Config::new()).unwrap();
        assert_eq!(
            state,
            HandshakeState::FinishedInvalid(HandshakeError::AcceptMismatch)
        );
    }

    #[test]
    fn rejected() {
        let rw = LimitReadWriter::new(super::super::HTTP_REJECT, 64, 64);
        let mut io = BufReader::new(rw);

        let state =
            client_handshake_with_key(&mut io, &endpoint(), SEC_KEY, &Config::new()).unwrap();
        assert_eq!(
            state,
            HandshakeState::FinishedInvalid(HandshakeError::HttpStatusCode(400))
        );
    }

    #[test]
    fn incomplete_response() {
        let rw = LimitReadWriter::new(&RESPONSE[..RESPONSE.len() - 2], 16, 16);
        let mut io = BufReader::new(rw);

        let e =
            client_handshake_with_key(&mut io, &endpoint(), SEC_KEY, &Config::new()).unwrap_err();
        assert!(matches!(
            e,
            Error::Handshake(HandshakeError::IncompleteResponse)
        ));
    }

    #[test]
    fn response_too_large() {
        let rw = LimitReadWriter::new(RESPONSE, 16, 16);
        let mut io = BufReader::new(rw);

        let config = Config::new().with_max_handshake_len(32);
        let state = client_handshake_with_key(&mut io, &endpoint(), SEC_KEY, &config).unwrap();
        assert_eq!(
            state,
            HandshakeState::FinishedInvalid(HandshakeError::TooLarge)
        );
    }

    #[test]
    fn host_with_port() {
        let rw = LimitReadWriter::new(RESPONSE, 64, 64);
        let mut io = BufReader::new(rw);

        let endpoint = Endpoint::resolve("ws://127.0.0.1:9000/").unwrap();
        let _ = client_handshake_with_key(&mut io, &endpoint, SEC_KEY, &Config::new()).unwrap();

        let sent = String::from_utf8(io.get_ref().wbuf.clone()).unwrap();
        assert!(sent.starts_with("GET / HTTP/1.1\r\n"));
        assert!(sent.contains("host: 127.0.0.1:9000\r\n"));
    }
}
