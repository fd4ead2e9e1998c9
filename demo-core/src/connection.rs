//! # Connection Manager
//!
//! A [`Connection`] owns the transport channel to one endpoint. Every scenario opens its own
//! connection and drops it when it ends, which releases the underlying socket on every exit
//! path, including early returns through `?`.
use crate::config::{ClientConfig, Security};
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};

/// Errors that can occur when opening a connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("Invalid address '{0}': {1}")]
    InvalidAddress(String, #[source] http::uri::InvalidUri),
    #[error("Failed to configure TLS for '{0}': {1}")]
    Tls(String, #[source] tonic::transport::Error),
    #[error("Failed to connect to '{0}': {1}")]
    ConnectionFailed(String, #[source] tonic::transport::Error),
}

/// An open transport session to a single endpoint.
#[derive(Debug)]
pub struct Connection {
    address: String,
    security: Security,
    channel: Channel,
}

impl Connection {
    /// Dials the configured endpoint and waits until the transport is established.
    ///
    /// # Returns
    ///
    /// * `Ok(Connection)` - The connected session.
    /// * `Err(ConnectError)` - If the address is invalid or the server is unreachable.
    pub async fn open(config: &ClientConfig) -> Result<Self, ConnectError> {
        let endpoint = endpoint(config)?;

        let channel = endpoint
            .connect()
            .await
            .map_err(|e| ConnectError::ConnectionFailed(config.address.clone(), e))?;

        tracing::debug!(address = %config.address, security = ?config.security, "connection opened");

        Ok(Self::new(config, channel))
    }

    /// Builds a connection without dialing.
    ///
    /// The transport connects on the first call and reconnects on its own after a failure,
    /// so a call made while the server is down fails without poisoning later calls.
    pub fn open_lazy(config: &ClientConfig) -> Result<Self, ConnectError> {
        let channel = endpoint(config)?.connect_lazy();

        tracing::debug!(address = %config.address, security = ?config.security, "lazy connection created");

        Ok(Self::new(config, channel))
    }

    fn new(config: &ClientConfig, channel: Channel) -> Self {
        Self {
            address: config.address.clone(),
            security: config.security,
            channel,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn security(&self) -> Security {
        self.security
    }

    /// The transport handle used to build service stubs.
    ///
    /// Channels are cheap to clone and share the same underlying connection.
    pub fn channel(&self) -> Channel {
        self.channel.clone()
    }

    /// Releases the connection.
    ///
    /// Equivalent to dropping it; exists so call sites can make the release explicit. Stubs
    /// hold clones of the channel, so the socket only closes once they are dropped as well.
    pub fn close(self) {}
}

impl Drop for Connection {
    fn drop(&mut self) {
        tracing::debug!(address = %self.address, "connection released");
    }
}

fn endpoint(config: &ClientConfig) -> Result<Endpoint, ConnectError> {
    let uri = config
        .endpoint_uri()
        .map_err(|e| ConnectError::InvalidAddress(config.address.clone(), e))?;

    let mut endpoint = Endpoint::from(uri);

    if let Some(timeout) = config.connect_timeout {
        endpoint = endpoint.connect_timeout(timeout);
    }

    if let Some(timeout) = config.request_timeout {
        endpoint = endpoint.timeout(timeout);
    }

    if config.security == Security::Tls {
        endpoint = endpoint
            .tls_config(ClientTlsConfig::new().with_webpki_roots())
            .map_err(|e| ConnectError::Tls(config.address.clone(), e))?;
    }

    Ok(endpoint)
}
