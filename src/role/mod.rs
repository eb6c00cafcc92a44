//! Client or server role.
//!
//! A role is fixed for the lifetime of a [`Connection`](crate::connection::Connection).
//! It decides which side of the handshake is performed, and how outgoing
//! payload is masked: a client masks every frame with a fresh random key,
//! a server never masks.

use std::fmt::{Display, Formatter};

use crate::frame::Mask;
use crate::frame::mask::new_rand_key;

/// Client or server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Client,
    Server,
}

impl Role {
    #[inline]
    pub const fn is_client(self) -> bool { matches!(self, Role::Client) }

    #[inline]
    pub const fn is_server(self) -> bool { matches!(self, Role::Server) }

    /// Mask for the next outgoing frame.
    #[inline]
    pub fn write_mask(self) -> Mask {
        match self {
            Role::Client => Mask::Key(new_rand_key()),
            // server should not mask the payload
            Role::Server => Mask::None,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Client => write!(f, "client"),
            Role::Server => write!(f, "server"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn write_mask() {
        assert!(matches!(Role::Client.write_mask(), Mask::Key(_)));
        assert_eq!(Role::Server.write_mask(), Mask::None);
    }
}
