//! Key exchange.
//!
//! `sec-websocket-accept` = base64(sha1(`sec-websocket-key` + [`GUID`])).

use super::GUID;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha1::{Digest, Sha1};

/// Generate a new `sec-websocket-key`, base64 of 16 random bytes.
#[inline]
pub fn new_sec_key() -> [u8; 24] {
    let input: [u8; 16] = rand::random();
    let mut output = [0_u8; 24];
    let n = STANDARD
        .encode_slice(input, &mut output)
        .expect("base64 of 16 bytes takes 24 bytes");
    debug_assert_eq!(n, 24);
    output
}

/// Derive `sec-websocket-accept` from `sec-websocket-key`.
#[inline]
pub fn derive_accept_key(sec_key: &[u8]) -> [u8; 28] {
    let mut sha1 = Sha1::default();
    sha1.update(sec_key);
    sha1.update(GUID);
    let input = sha1.finalize();
    let mut output = [0_u8; 28];
    let n = STANDARD
        .encode_slice(input, &mut output)
        .expect("base64 of 20 bytes takes 28 bytes");
    debug_assert_eq!(n, 28);
    output
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn generate_sec_key() {
        let mut keys: Vec<_> = (0..=1024).map(|_| new_sec_key()).collect();
        for key in keys.iter() {
            assert_eq!(STANDARD.decode(key).unwrap().len(), 16);
        }
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 1025);
    }

    #[test]
    fn derive_sec_key() {
        assert_eq!(
            &derive_accept_key(b"dGhlIHNhbXBsZSBub25jZQ=="),
            b"s3pPLMBiTxaQ9kYGzzhZRbK+xOo="
        );
    }

    #[test]
    fn derive_is_deterministic() {
        let key = new_sec_key();
        let accept = derive_accept_key(&key);
        for _ in 0..16 {
            assert_eq!(derive_accept_key(&key), accept);
        }
        assert_ne!(derive_accept_key(&new_sec_key()), accept);
    }
}
