//!  Mask flag and key.

/// Payload mask with a 32-bit key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mask {
    Key([u8; 4]),
    None,
}

impl Mask {
    /// Read the flag which indicates whether mask is used.
    ///
    /// The key itself follows the length field, so a masked
    /// flag is returned with an empty key.
    #[inline]
    pub const fn from_flag(b: u8) -> Self {
        match b & 0x80 {
            0x80 => Mask::Key([0; 4]),
            _ => Mask::None,
        }
    }

    /// Get the flag byte.
    #[inline]
    pub const fn to_flag(&self) -> u8 {
        match self {
            Mask::Key(_) => 0x80,
            Mask::None => 0x00,
        }
    }

    #[inline]
    pub const fn key(&self) -> Option<[u8; 4]> {
        match self {
            Mask::Key(k) => Some(*k),
            Mask::None => None,
        }
    }
}

/// Generate a new random key.
#[inline]
pub fn new_rand_key() -> [u8; 4] { rand::random::<[u8; 4]>() }

/// Mask the buffer with `key[i mod 4]`, 4 bytes at a time.
#[inline]
pub fn apply_mask(key: [u8; 4], buf: &mut [u8]) {
    let mut chunks = buf.chunks_exact_mut(4);
    for b4 in &mut chunks {
        b4[0] ^= key[0];
        b4[1] ^= key[1];
        b4[2] ^= key[2];
        b4[3] ^= key[3];
    }
    for (i, b) in chunks.into_remainder().iter_mut().enumerate() {
        *b ^= key[i];
    }
}
