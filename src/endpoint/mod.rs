//! Websocket endpoint.
//!
//! Resolve a `ws://` or `wss://` url into the parts needed to open
//! a connection or bind a server.
//!
//! ```
//! use plainws::endpoint::{Endpoint, Scheme};
//!
//! let ep = Endpoint::resolve("wss://www.example.com/chat?room=1").unwrap();
//! assert_eq!(ep.scheme(), Scheme::Wss);
//! assert_eq!(ep.port(), 443);
//! assert_eq!(ep.path(), "/chat?room=1");
//! assert!(ep.is_tls());
//! ```

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use url::Url;

use crate::error::EndpointError;

/// Url scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// plain stream
    Ws,
    /// tls stream
    Wss,
}

impl Scheme {
    /// Parse from a url scheme, case insensitive.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("ws") {
            Some(Scheme::Ws)
        } else if s.eq_ignore_ascii_case("wss") {
            Some(Scheme::Wss)
        } else {
            None
        }
    }

    /// 80 for ws, 443 for wss.
    #[inline]
    pub const fn default_port(self) -> u16 {
        match self {
            Scheme::Ws => 80,
            Scheme::Wss => 443,
        }
    }

    #[inline]
    pub const fn is_tls(self) -> bool { matches!(self, Scheme::Wss) }

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Scheme::Ws => "ws",
            Scheme::Wss => "wss",
        }
    }
}

/// Resolved endpoint, immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    scheme: Scheme,
    host: String,
    port: u16,
    path: String,
}

impl Endpoint {
    /// Resolve from a url string or a parsed [`Url`].
    #[inline]
    pub fn resolve<T: IntoEndpoint>(url: T) -> Result<Self, EndpointError> { url.into_endpoint() }

    /// Resolve from a parsed [`Url`].
    pub fn from_url(url: &Url) -> Result<Self, EndpointError> {
        let scheme = Scheme::from_str_opt(url.scheme())
            .ok_or_else(|| EndpointError::UnsupportedScheme(url.scheme().to_string()))?;

        // ipv6 literals are bracketed by url
        let host = match url.host_str() {
            Some(h) if !h.is_empty() => h.trim_start_matches('[').trim_end_matches(']'),
            _ => return Err(EndpointError::MissingHost),
        };

        let port = url.port().unwrap_or_else(|| scheme.default_port());

        let mut path = url.path().to_string();
        if path.is_empty() {
            path.push('/');
        }
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }

        Ok(Self {
            scheme,
            host: host.to_string(),
            port,
            path,
        })
    }

    #[inline]
    pub const fn scheme(&self) -> Scheme { self.scheme }

    /// Host name or address, without brackets.
    #[inline]
    pub fn host(&self) -> &str { &self.host }

    #[inline]
    pub const fn port(&self) -> u16 { self.port }

    /// Request target, including the query if any.
    #[inline]
    pub fn path(&self) -> &str { &self.path }

    /// `wss` requires a tls transport.
    #[inline]
    pub const fn is_tls(&self) -> bool { self.scheme.is_tls() }

    /// Value of the `host` header, port omitted if it is the default one.
    pub fn host_header(&self) -> String {
        let host = if self.host.contains(':') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };

        if self.port == self.scheme.default_port() {
            host
        } else {
            format!("{}:{}", host, self.port)
        }
    }

    /// `(host, port)`, which could be passed to `TcpStream::connect`
    /// or `TcpListener::bind`.
    #[inline]
    pub fn socket_addr(&self) -> (&str, u16) { (&self.host, self.port) }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let host = if self.host.contains(':') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        write!(f, "{}://{}:{}{}", self.scheme.as_str(), host, self.port, self.path)
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::from_url(&Url::parse(s)?) }
}

/// Anything that resolves to an [`Endpoint`].
pub trait IntoEndpoint {
    fn into_endpoint(self) -> Result<Endpoint, EndpointError>;
}

impl IntoEndpoint for &str {
    fn into_endpoint(self) -> Result<Endpoint, EndpointError> { self.parse() }
}

impl IntoEndpoint for String {
    fn into_endpoint(self) -> Result<Endpoint, EndpointError> { self.parse() }
}

impl IntoEndpoint for &String {
    fn into_endpoint(self) -> Result<Endpoint, EndpointError> { self.parse() }
}

impl IntoEndpoint for &Url {
    fn into_endpoint(self) -> Result<Endpoint, EndpointError> { Endpoint::from_url(self) }
}

impl IntoEndpoint for Url {
    fn into_endpoint(self) -> Result<Endpoint, EndpointError> { Endpoint::from_url(&self) }
}

impl IntoEndpoint for Endpoint {
    fn into_endpoint(self) -> Result<Endpoint, EndpointError> { Ok(self) }
}

impl IntoEndpoint for &Endpoint {
    fn into_endpoint(self) -> Result<Endpoint, EndpointError> { Ok(self.clone()) }
}
