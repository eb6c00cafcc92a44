use std::io::{BufRead, ErrorKind};

use super::HTTP_HEAD_END;
use crate::error::{Error, HandshakeError};

/// Read the http head from `rd` until an empty line, return it
/// with the terminator.
///
/// Only bytes of the head are consumed, data following it stays
/// in the reader. EOF before the terminator is reported as
/// `incomplete`, a head longer than `limit` as [`HandshakeError::TooLarge`].
pub(super) fn read_head<R: BufRead + ?Sized>(
    rd: &mut R,
    limit: usize,
    incomplete: HandshakeError,
) -> Result<Vec<u8>, Error> {
    let mut head = Vec::with_capacity(std::cmp::min(limit, 1024));

    loop {
        if head.len() >= limit {
            return Err(HandshakeError::TooLarge.into());
        }

        let avail = match rd.fill_buf() {
            Ok(buf) => buf,
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        // EOF, no more data
        if avail.is_empty() {
            return Err(incomplete.into());
        }

        let old_len = head.len();
        let take = std::cmp::min(avail.len(), limit - old_len);
        head.extend_from_slice(&avail[..take]);

        // the terminator may span two reads
        let scan_beg = old_len.saturating_sub(HTTP_HEAD_END.len() - 1);
        let found = head[scan_beg..]
            .windows(HTTP_HEAD_END.len())
            .position(|w| w == HTTP_HEAD_END);

        match found {
            Some(pos) => {
                let end = scan_beg + pos + HTTP_HEAD_END.len();
                rd.consume(end - old_len);
                head.truncate(end);
                return Ok(head);
            }
            None => rd.consume(take),
        }
    }
}
