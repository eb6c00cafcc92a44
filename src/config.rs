//! Connection limits.

/// 64 MiB
pub const DEFAULT_MAX_PAYLOAD_LEN: u64 = 64 << 20;

/// 8 KiB
pub const DEFAULT_MAX_HANDSHAKE_LEN: usize = 8 << 10;

/// Limits applied while negotiating and reading frames.
///
/// Transport parameters (tls, timeouts, backlog) are not part of it,
/// they belong to the stream passed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Largest accepted payload of an incoming frame. A longer frame
    /// fails before its payload is buffered.
    pub max_payload_len: u64,

    /// Largest accepted http header block during the handshake,
    /// including the terminating empty line.
    pub max_handshake_len: usize,

    /// Max number of http headers parsed during the handshake.
    pub max_headers: usize,
}

impl Config {
    /// Default limits.
    #[inline]
    pub const fn new() -> Self {
        Self {
            max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
            max_handshake_len: DEFAULT_MAX_HANDSHAKE_LEN,
            max_headers: crate::handshake::MAX_ALLOW_HEADERS,
        }
    }

    #[inline]
    pub const fn with_max_payload_len(mut self, n: u64) -> Self {
        self.max_payload_len = n;
        self
    }

    #[inline]
    pub const fn with_max_handshake_len(mut self, n: usize) -> Self {
        self.max_handshake_len = n;
        self
    }

    #[inline]
    pub const fn with_max_headers(mut self, n: usize) -> Self {
        self.max_headers = n;
        self
    }
}

impl Default for Config {
    fn default() -> Self { Self::new() }
}
