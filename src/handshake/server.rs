//! Server handshake.

use std::io::{BufReader, Read, Write};

use log::{debug, warn};

use super::detail::read_head;
use super::{Request, Response, HandshakeState};
use super::{derive_accept_key, HTTP_REJECT};

use crate::config::Config;
use crate::error::{Error, HandshakeError};

/// Result of a server handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOutcome {
    pub state: HandshakeState,
    /// Requested path, empty if the request is rejected.
    pub path: String,
    /// Requested host, empty if the request is rejected.
    pub host: String,
}

/// Perform a server handshake.
///
/// Block on reading until a complete request head is received, then
/// verify it and reply with `101 Switching Protocols`.
///
/// If the request does not pass the check, `400 Bad Request` is written
/// back and [`HandshakeState::FinishedInvalid`] is returned. The caller
/// is expected to close the stream then. EOF before the end of the
/// request head and io errors are returned as errors.
pub fn server_handshake<IO: Read + Write>(
    io: &mut BufReader<IO>,
    config: &Config,
) -> Result<ServerOutcome, Error> {
    let mut outcome = ServerOutcome {
        state: HandshakeState::new(),
        path: String::new(),
        host: String::new(),
    };

    // recv
    let head = match read_head(io, config.max_handshake_len, HandshakeError::IncompleteRequest) {
        Ok(head) => head,
        Err(Error::Handshake(e)) if !e.is_incomplete() => {
            reject(io, e, &mut outcome.state);
            return Ok(outcome);
        }
        Err(e) => return Err(e),
    };

    // check
    let request = match Request::decode(&head, config.max_headers) {
        Ok((request, _)) => request,
        Err(e) => {
            reject(io, e, &mut outcome.state);
            return Ok(outcome);
        }
    };

    debug!(
        "server: upgrade request, host={}, path={}",
        String::from_utf8_lossy(request.host),
        String::from_utf8_lossy(request.path)
    );

    // send
    let sec_accept = derive_accept_key(request.sec_key);
    let mut buf = Vec::with_capacity(256);
    let _ = Response::new(&sec_accept).encode(&mut buf);
    io.get_mut().write_all(&buf)?;
    io.get_mut().flush()?;

    outcome.path = String::from_utf8_lossy(request.path).into_owned();
    outcome.host = String::from_utf8_lossy(request.host).into_owned();
    outcome.state.finish(Ok(()));

    debug!("server: handshake finished");
    Ok(outcome)
}

fn reject<IO: Write>(io: &mut BufReader<IO>, e: HandshakeError, state: &mut HandshakeState) {
    warn!("server: reject upgrade request: {}", e);

    // best effort, the stream is about to be closed
    let io = io.get_mut();
    if let Err(e) = io.write_all(HTTP_REJECT).and_then(|_| io.flush()) {
        debug!("server: failed to send rejection: {}", e);
    }

    state.finish(Err(e));
}
