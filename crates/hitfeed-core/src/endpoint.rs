//! Service origin and the endpoints derived from it.
//!
//! The origin is `scheme://host[:port]` of the hit-counter service. Both the
//! event stream URL and the badge URLs are derived from it:
//!
//! ```text
//! https://hits.example.com:8443
//!   ├── stream:  wss://hits.example.com:8443/ws
//!   └── badge:   https://hits.example.com:8443/svg/<username>/<repository>
//! ```
//!
//! Default ports (80 for `http`, 443 for `https`) are dropped while parsing,
//! so an origin always renders the way a browser would report it.

use std::{fmt, str::FromStr};

use crate::error::EndpointError;

/// Origin used when none is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

/// Path of the event stream endpoint.
pub const STREAM_PATH: &str = "/ws";

/// Path prefix of the badge image endpoint.
pub const BADGE_PATH: &str = "/svg";

/// Transport security of the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Plaintext HTTP
    Http,
    /// HTTP over TLS
    Https,
}

impl Scheme {
    /// Whether the origin was reached over an encrypted transport.
    pub fn is_secure(self) -> bool {
        matches!(self, Self::Https)
    }

    /// Scheme as written in the origin.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    /// Socket scheme matching this transport security (`ws` or `wss`).
    pub fn socket_scheme(self) -> &'static str {
        if self.is_secure() { "wss" } else { "ws" }
    }

    fn default_port(self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }
}

/// Origin of the hit-counter service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    scheme: Scheme,
    host: String,
    /// Explicit non-default port. `None` means the scheme's default.
    port: Option<u16>,
}

impl Origin {
    /// Create an origin from its parts. A default port is normalized away.
    pub fn new(scheme: Scheme, host: impl Into<String>, port: Option<u16>) -> Self {
        let port = port.filter(|p| *p != scheme.default_port());
        Self { scheme, host: host.into(), port }
    }

    /// Parse `http[s]://host[:port]`, with an optional trailing `/`.
    ///
    /// # Errors
    ///
    /// - `EndpointError::UnsupportedScheme` if the scheme is missing or not
    ///   `http`/`https`
    /// - `EndpointError::UnexpectedPath` if anything follows the authority
    /// - `EndpointError::MissingHost` if the host is empty
    /// - `EndpointError::InvalidHost` if the host carries userinfo or a stray
    ///   `:`
    /// - `EndpointError::InvalidPort` if the port is not a valid `u16`
    pub fn parse(input: &str) -> Result<Self, EndpointError> {
        let input = input.trim();
        let Some((scheme, rest)) = input.split_once("://") else {
            return Err(EndpointError::UnsupportedScheme(input.to_string()));
        };

        let scheme = if scheme.eq_ignore_ascii_case("http") {
            Scheme::Http
        } else if scheme.eq_ignore_ascii_case("https") {
            Scheme::Https
        } else {
            return Err(EndpointError::UnsupportedScheme(scheme.to_string()));
        };

        let authority = rest.strip_suffix('/').unwrap_or(rest);
        if let Some(pos) = authority.find(['/', '?', '#']) {
            return Err(EndpointError::UnexpectedPath(authority[pos..].to_string()));
        }

        let (host, port) = split_authority(authority)?;
        if host.is_empty() || host == "[]" {
            return Err(EndpointError::MissingHost);
        }
        // Only bracketed IPv6 literals may contain ':'. No userinfo.
        if !host.starts_with('[') && host.contains([':', '@']) {
            return Err(EndpointError::InvalidHost(host.to_string()));
        }

        Ok(Self::new(scheme, host, port))
    }

    /// Transport security of the origin.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Host name or address (IPv6 literals keep their brackets).
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Explicit port. `None` if the scheme's default port is used.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// `host[:port]`
    pub fn authority(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{port}", self.host),
            None => self.host.clone(),
        }
    }

    /// Event stream URL: `ws[s]://host[:port]/ws`.
    pub fn stream_url(&self) -> String {
        format!("{}://{}{STREAM_PATH}", self.scheme.socket_scheme(), self.authority())
    }

    /// Badge image URL for a username/repository pair.
    pub fn badge_url(&self, username: &str, repository: &str) -> String {
        format!("{self}{BADGE_PATH}/{username}/{repository}")
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme.as_str(), self.authority())
    }
}

impl FromStr for Origin {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Default for Origin {
    fn default() -> Self {
        Self::new(Scheme::Http, "localhost", Some(8080))
    }
}

/// Split `host[:port]`, keeping bracketed IPv6 literals intact.
fn split_authority(authority: &str) -> Result<(&str, Option<u16>), EndpointError> {
    let (host, port) = if authority.starts_with('[') {
        match authority.find(']') {
            Some(end) => {
                let (host, tail) = authority.split_at(end + 1);
                match tail.strip_prefix(':') {
                    Some(port) => (host, Some(port)),
                    None if tail.is_empty() => (host, None),
                    None => return Err(EndpointError::InvalidPort(tail.to_string())),
                }
            },
            None => return Err(EndpointError::MissingHost),
        }
    } else {
        match authority.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (authority, None),
        }
    };

    let port = match port {
        Some(raw) => {
            Some(raw.parse::<u16>().map_err(|_| EndpointError::InvalidPort(raw.to_string()))?)
        },
        None => None,
    };

    Ok((host, port))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn plaintext_origin_uses_ws() {
        let origin = Origin::parse("http://localhost:8080").unwrap();
        assert_eq!(origin.scheme(), Scheme::Http);
        assert_eq!(origin.host(), "localhost");
        assert_eq!(origin.port(), Some(8080));
        assert_eq!(origin.stream_url(), "ws://localhost:8080/ws");
    }

    #[test]
    fn secure_origin_uses_wss() {
        let origin = Origin::parse("https://hits.webklex.com").unwrap();
        assert!(origin.scheme().is_secure());
        assert_eq!(origin.port(), None);
        assert_eq!(origin.stream_url(), "wss://hits.webklex.com/ws");
        assert_eq!(origin.to_string(), "https://hits.webklex.com");
    }

    #[test]
    fn default_port_is_dropped() {
        let origin = Origin::parse("https://x.com:443/").unwrap();
        assert_eq!(origin.port(), None);
        assert_eq!(origin.to_string(), "https://x.com");

        let origin = Origin::parse("http://x.com:443").unwrap();
        assert_eq!(origin.port(), Some(443));
    }

    #[test]
    fn ipv6_literal() {
        let origin = Origin::parse("http://[::1]:9000").unwrap();
        assert_eq!(origin.host(), "[::1]");
        assert_eq!(origin.stream_url(), "ws://[::1]:9000/ws");
    }

    #[test]
    fn badge_url_is_origin_relative() {
        let origin = Origin::parse("https://x.com").unwrap();
        assert_eq!(origin.badge_url("foo", "bar"), "https://x.com/svg/foo/bar");
    }

    #[test]
    fn rejects_bad_origins() {
        assert!(matches!(
            Origin::parse("ftp://x.com"),
            Err(EndpointError::UnsupportedScheme(_))
        ));
        assert!(matches!(Origin::parse("x.com"), Err(EndpointError::UnsupportedScheme(_))));
        assert!(matches!(Origin::parse("http://"), Err(EndpointError::MissingHost)));
        assert!(matches!(Origin::parse("http://:80"), Err(EndpointError::MissingHost)));
        assert!(matches!(Origin::parse("http://x.com:"), Err(EndpointError::InvalidPort(_))));
        assert!(matches!(
            Origin::parse("http://x.com:99999"),
            Err(EndpointError::InvalidPort(_))
        ));
        assert!(matches!(
            Origin::parse("http://x.com/app"),
            Err(EndpointError::UnexpectedPath(_))
        ));
    }

    #[test]
    fn rejects_userinfo_and_stray_colons() {
        assert_eq!(Origin::parse("http://a:1:2"), Err(EndpointError::InvalidHost("a:1".to_string())));
        assert_eq!(
            Origin::parse("http://user@host"),
            Err(EndpointError::InvalidHost("user@host".to_string()))
        );
        assert!(matches!(
            Origin::parse("https://user:pw@host:8443"),
            Err(EndpointError::InvalidHost(_))
        ));
        assert!(Origin::parse("http://[::1]").is_ok());
    }

    #[test]
    fn default_origin_matches_constant() {
        assert_eq!(Origin::default().to_string(), DEFAULT_ORIGIN);
        assert_eq!(DEFAULT_ORIGIN.parse::<Origin>().unwrap(), Origin::default());
    }

    proptest! {
        #[test]
        fn prop_parse_never_panics(input in ".{0,64}") {
            let _ = Origin::parse(&input);
        }

        #[test]
        fn prop_display_round_trips(
            secure in any::<bool>(),
            host in "[a-z][a-z0-9.-]{0,20}",
            port in proptest::option::of(1u16..=u16::MAX),
        ) {
            let scheme = if secure { Scheme::Https } else { Scheme::Http };
            let origin = Origin::new(scheme, host, port);
            prop_assert_eq!(Origin::parse(&origin.to_string()), Ok(origin));
        }
    }
}
