use crate::error::HandshakeError;

/// Outcome of the opening handshake.
///
/// Starts as `Pending` and is finished exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeState {
    Pending,
    FinishedValid,
    FinishedInvalid(HandshakeError),
}

impl HandshakeState {
    #[inline]
    pub const fn new() -> Self { HandshakeState::Pending }

    #[inline]
    pub const fn is_pending(&self) -> bool { matches!(self, HandshakeState::Pending) }

    #[inline]
    pub const fn is_finished(&self) -> bool { !self.is_pending() }

    #[inline]
    pub const fn is_valid(&self) -> bool { matches!(self, HandshakeState::FinishedValid) }

    /// Reason of an invalid handshake.
    #[inline]
    pub const fn error(&self) -> Option<&HandshakeError> {
        match self {
            HandshakeState::FinishedInvalid(e) => Some(e),
            _ => None,
        }
    }

    /// Finish with the negotiation result. A finished state never changes.
    #[inline]
    pub fn finish(&mut self, outcome: Result<(), HandshakeError>) {
        debug_assert!(self.is_pending());
        if self.is_pending() {
            *self = match outcome {
                Ok(()) => HandshakeState::FinishedValid,
                Err(e) => HandshakeState::FinishedInvalid(e),
            };
        }
    }

    /// `Ok` if frames are allowed to flow.
    #[inline]
    pub fn ready(&self) -> Result<(), HandshakeError> {
        match self {
            HandshakeState::FinishedValid => Ok(()),
            HandshakeState::FinishedInvalid(e) => Err(e.clone()),
            HandshakeState::Pending => Err(HandshakeError::InvalidState),
        }
    }
}

impl Default for HandshakeState {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn finish_once() {
        let mut state = HandshakeState::new();
        assert!(state.is_pending());
        assert_eq!(state.ready(), Err(HandshakeError::InvalidState));

        state.finish(Ok(()));
        assert!(state.is_valid());
        assert!(state.ready().is_ok());
    }

    #[test]
    fn finish_invalid() {
        let mut state = HandshakeState::new();
        state.finish(Err(HandshakeError::AcceptMismatch));

        assert!(state.is_finished());
        assert!(!state.is_valid());
        assert_eq!(state.error(), Some(&HandshakeError::AcceptMismatch));
        assert_eq!(state.ready(), Err(HandshakeError::AcceptMismatch));
    }
}
