use std::io;
use thiserror::Error;

/// Every way a request can fail.
///
/// Codes returned by [`NetError::as_i32`] follow Chromium's
/// `net_error_list.h` where a matching error exists. Kinds with no Chromium
/// counterpart use the custom range starting at -10000.
#[derive(Debug, Error)]
pub enum NetError {
    // Connection Errors
    #[error("Connection closed (TCP FIN)")]
    ConnectionClosed,
    #[error("Connection reset: peer closed before sending a status line")]
    ConnectionReset,
    #[error("Connection to {host}:{port} failed: {source}")]
    ConnectionFailedTo {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
    #[error("Name not resolved: {domain}: {source}")]
    NameNotResolvedFor {
        domain: String,
        #[source]
        source: io::Error,
    },
    #[error("Transport failure: {0}")]
    TransportFailure(#[from] io::Error),
    #[error("Connection to {host}:{port} broke mid-exchange: {source}")]
    ExchangeFailedWith {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
    #[error("SSL protocol error")]
    SslProtocolError,

    // URL Errors
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
    #[error("Invalid redirect: {0}")]
    InvalidRedirect(String),
    #[error("Too many redirects")]
    TooManyRedirects,

    // HTTP Errors
    #[error("Malformed status line: {0:?}")]
    MalformedStatusLine(String),
    #[error("Invalid header: {0:?}")]
    InvalidHeader(String),
    #[error("Invalid response")]
    InvalidResponse,
    #[error("Method not supported: {0:?}")]
    MethodNotSupported(String),
    #[error("Invalid chunked encoding")]
    InvalidChunkedEncoding,
    #[error("Incomplete chunked encoding")]
    IncompleteChunkedEncoding,
    #[error("Content-Length mismatch")]
    ContentLengthMismatch,

    // Content Errors
    #[error("Unsupported Content-Encoding: {0}")]
    UnsupportedContentEncoding(String),
    #[error("Content decoding failed")]
    ContentDecodingFailed,
    #[error("Content-Type mismatch: expected application/json, got {0:?}")]
    ContentTypeMismatch(String),
    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),
    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),
    #[error("Body is not valid text in the requested encoding")]
    InvalidText,
}

impl NetError {
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::TransportFailure(_) => -2,
            NetError::ExchangeFailedWith { .. } => -103,
            NetError::ConnectionClosed => -100,
            NetError::ConnectionReset => -101,
            NetError::ConnectionFailedTo { .. } => -104,
            NetError::NameNotResolvedFor { .. } => -105,
            NetError::SslProtocolError => -107,

            NetError::InvalidUrl => -300,
            NetError::UnsupportedScheme(_) => -302,
            NetError::InvalidRedirect(_) => -303,
            NetError::TooManyRedirects => -310,
            NetError::InvalidResponse => -320,
            NetError::InvalidChunkedEncoding => -321,
            NetError::MethodNotSupported(_) => -322,
            NetError::ContentDecodingFailed => -330,
            NetError::UnknownEncoding(_) => -340,
            NetError::ContentLengthMismatch => -354,
            NetError::IncompleteChunkedEncoding => -355,
            NetError::MalformedStatusLine(_) => -370,
            NetError::UnsupportedContentEncoding(_) => -371,

            // Custom codes
            NetError::InvalidHeader(_) => -10001,
            NetError::ContentTypeMismatch(_) => -10002,
            NetError::JsonParseError(_) => -10003,
            NetError::InvalidText => -10004,
        }
    }

    /// True for connection and I/O faults, as opposed to protocol or
    /// content errors.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            NetError::TransportFailure(_)
                | NetError::ExchangeFailedWith { .. }
                | NetError::ConnectionFailedTo { .. }
                | NetError::NameNotResolvedFor { .. }
                | NetError::SslProtocolError
        )
    }

    pub(crate) fn connection_failed_to(host: &str, port: u16, source: io::Error) -> Self {
        NetError::ConnectionFailedTo {
            host: host.to_string(),
            port,
            source,
        }
    }

    pub(crate) fn exchange_failed(host: &str, port: u16, source: io::Error) -> Self {
        NetError::ExchangeFailedWith {
            host: host.to_string(),
            port,
            source,
        }
    }

    pub(crate) fn dns_failed(domain: &str, source: io::Error) -> Self {
        NetError::NameNotResolvedFor {
            domain: domain.to_string(),
            source,
        }
    }
}
