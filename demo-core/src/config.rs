//! # Client configuration
//!
//! Plain values describing where and how to connect, plus the timing of the resilience probe.
//! The harness fills these from its command line; tests build them directly.
use http::Uri;
use http::uri::InvalidUri;
use std::time::Duration;

/// The endpoint dialed when nothing else is configured.
pub const DEFAULT_ADDRESS: &str = "localhost:50051";

/// How long the resilience probe waits before each attempt.
pub const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_secs(2);

/// Transport security used when dialing the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Security {
    /// Plain-text HTTP/2.
    #[default]
    Insecure,
    /// TLS, verified against the web PKI roots.
    Tls,
}

impl Security {
    fn scheme(self) -> &'static str {
        match self {
            Security::Insecure => "http",
            Security::Tls => "https",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// `host:port`, or a full URI such as `http://localhost:50051`.
    pub address: String,
    pub security: Security,
    /// Upper bound for establishing the connection. `None` leaves the transport default.
    pub connect_timeout: Option<Duration>,
    /// Deadline applied to every call made over the connection. `None` means no deadline.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS)
    }
}

impl ClientConfig {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            security: Security::Insecure,
            connect_timeout: None,
            request_timeout: None,
        }
    }

    pub fn with_security(mut self, security: Security) -> Self {
        self.security = security;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Resolves the configured address into the URI handed to the transport.
    ///
    /// A bare `host:port` gets the scheme matching [`Security`]; an address that already
    /// carries a scheme is used as is.
    pub fn endpoint_uri(&self) -> Result<Uri, InvalidUri> {
        let address = self.address.trim();

        if address.contains("://") {
            address.parse()
        } else {
            format!("{}://{}", self.security.scheme(), address).parse()
        }
    }
}

/// Timing of the resilience probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Fixed wait before every attempt. There is no backoff.
    pub interval: Duration,
    /// Stop after this many attempts. `None` runs until the shutdown signal fires.
    pub max_attempts: Option<u64>,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_PROBE_INTERVAL,
            max_attempts: None,
        }
    }
}
