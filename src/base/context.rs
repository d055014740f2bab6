//! Peer context for socket failures.
//!
//! Sockets surface bare `io::Error`s. Which `NetError` one becomes depends on
//! the phase the request was in: resolving the name, opening the connection,
//! or exchanging bytes over an open one.

use crate::base::neterror::NetError;
use std::io;

/// Phase-specific conversions for raw socket results.
pub trait IoResultExt<T> {
    /// The lookup of `domain` failed.
    fn dns_context(self, domain: &str) -> Result<T, NetError>;

    /// No address of `host` accepted a connection on `port`.
    fn connection_context(self, host: &str, port: u16) -> Result<T, NetError>;

    /// An established connection to `host:port` failed while the request was
    /// being written or the response read.
    ///
    /// ```ignore
    /// use barenet::base::context::IoResultExt;
    ///
    /// socket.write_all(&head).await.exchange_context("example.com", 443)?;
    /// // Error: "Connection to example.com:443 broke mid-exchange: broken pipe"
    /// ```
    fn exchange_context(self, host: &str, port: u16) -> Result<T, NetError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn dns_context(self, domain: &str) -> Result<T, NetError> {
        self.map_err(|e| NetError::dns_failed(domain, e))
    }

    fn connection_context(self, host: &str, port: u16) -> Result<T, NetError> {
        self.map_err(|e| NetError::connection_failed_to(host, port, e))
    }

    fn exchange_context(self, host: &str, port: u16) -> Result<T, NetError> {
        self.map_err(|e| NetError::exchange_failed(host, port, e))
    }
}

/// [`IoResultExt::exchange_context`] for results whose I/O errors were already
/// lifted into [`NetError::TransportFailure`] by `?`. Protocol errors pass
/// through untouched.
pub trait NetResultExt<T> {
    fn exchange_context(self, host: &str, port: u16) -> Result<T, NetError>;
}

impl<T> NetResultExt<T> for Result<T, NetError> {
    fn exchange_context(self, host: &str, port: u16) -> Result<T, NetError> {
        self.map_err(|e| match e {
            NetError::TransportFailure(source) => NetError::exchange_failed(host, port, source),
            other => other,
        })
    }
}
