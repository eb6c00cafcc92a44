use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeError {
    // eof before the header terminator
    IncompleteRequest,

    IncompleteResponse,

    MalformedHeaders(httparse::Error),

    TooLarge,

    // http error
    HttpMethod,

    HttpVersion,

    HttpStatusCode(u16),

    HttpHost,

    // websocket error
    Upgrade,

    Connection,

    SecWebSocketKey,

    AcceptMismatch,

    VersionMismatch,

    // frames before a finished handshake
    InvalidState,
}

impl HandshakeError {
    /// Eof during negotiation, which is fatal for the connection.
    #[inline]
    pub const fn is_incomplete(&self) -> bool {
        matches!(
            self,
            HandshakeError::IncompleteRequest | HandshakeError::IncompleteResponse
        )
    }
}

impl Display for HandshakeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use HandshakeError::*;
        match self {
            IncompleteRequest => write!(f, "Stream closed before a complete request"),

            IncompleteResponse => write!(f, "Stream closed before a complete response"),

            MalformedHeaders(e) => write!(f, "Http parse error: {}", e),

            TooLarge => write!(f, "Http header block exceeds the limit"),

            // http error
            HttpMethod => write!(f, "Illegal http method"),

            HttpVersion => write!(f, "Illegal http version"),

            HttpStatusCode(c) => write!(f, "Illegal http status code: {}", c),

            HttpHost => write!(f, "Missing http host header"),

            // websocket error
            Upgrade => write!(f, "Missing or illegal upgrade header"),

            Connection => write!(f, "Missing or illegal connection header"),

            SecWebSocketKey => write!(f, "Missing sec-websocket-key header"),

            AcceptMismatch => {
                write!(f, "Missing or illegal sec-websocket-accept header")
            }

            VersionMismatch => {
                write!(f, "Missing or illegal sec-websocket-version header")
            }

            InvalidState => write!(f, "Handshake has not finished successfully"),
        }
    }
}

impl From<httparse::Error> for HandshakeError {
    fn from(e: httparse::Error) -> Self { HandshakeError::MalformedHeaders(e) }
}

impl std::error::Error for HandshakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let HandshakeError::MalformedHeaders(e) = self {
            Some(e)
        } else {
            None
        }
    }
}
