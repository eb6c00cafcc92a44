use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    UnsupportedScheme(String),

    MissingHost,

    Url(url::ParseError),

    TlsRequired,
}

impl Display for EndpointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use EndpointError::*;
        match self {
            UnsupportedScheme(s) => write!(f, "Unsupported url scheme: {}", s),
            MissingHost => write!(f, "Missing host in url"),
            Url(e) => write!(f, "Url parse error: {}", e),
            TlsRequired => write!(f, "Wss endpoint requires a tls transport"),
        }
    }
}

impl From<url::ParseError> for EndpointError {
    fn from(e: url::ParseError) -> Self { EndpointError::Url(e) }
}

impl std::error::Error for EndpointError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let EndpointError::Url(e) = self {
            Some(e)
        } else {
            None
        }
    }
}
