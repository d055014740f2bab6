use crate::base::context::IoResultExt;
use crate::base::loadstate::LoadState;
use crate::base::neterror::NetError;
use crate::socket::client::SocketType;
use crate::urlrequest::target::RequestTarget;
use boring::ssl::{SslConnector, SslMethod, SslVerifyMode};
use std::io;
use tokio::net::TcpStream;

/// Manages the connection process: DNS -> TCP -> SSL.
/// Roughly equivalent to net::ConnectJob.
///
/// Every job produces a fresh socket; nothing is pooled or reused.
pub struct ConnectJob<'a> {
    target: &'a RequestTarget,
    state: LoadState,
}

impl<'a> ConnectJob<'a> {
    pub fn new(target: &'a RequestTarget) -> Self {
        Self {
            target,
            state: LoadState::Idle,
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.state
    }

    fn set_state(&mut self, state: LoadState) {
        tracing::trace!(host = %self.target.host(), ?state, "connect job state");
        self.state = state;
    }

    pub async fn connect(mut self) -> Result<SocketType, NetError> {
        let host = self.target.connect_host();
        let port = self.target.port();

        // 1. DNS Resolution
        self.set_state(LoadState::ResolvingHost);
        let addrs = tokio::net::lookup_host((host, port))
            .await
            .dns_context(host)?;

        // 2. TCP Connect, first address that accepts wins
        self.set_state(LoadState::Connecting);
        let mut last_err = None;
        let mut stream = None;
        for addr in addrs {
            match TcpStream::connect(addr).await {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => {
                    tracing::debug!(%addr, error = %e, "connect attempt failed");
                    last_err = Some(e);
                }
            }
        }
        let stream = stream
            .ok_or_else(|| {
                last_err.unwrap_or_else(|| {
                    io::Error::new(io::ErrorKind::NotFound, "host resolved to no addresses")
                })
            })
            .connection_context(host, port)?;
        tracing::debug!(host, port, secure = self.target.is_secure(), "connected");

        // 3. SSL Handshake (if https)
        if !self.target.is_secure() {
            self.set_state(LoadState::Idle);
            return Ok(SocketType::Tcp(stream));
        }

        self.set_state(LoadState::SslHandshake);
        let mut builder =
            SslConnector::builder(SslMethod::tls()).map_err(|_| NetError::SslProtocolError)?;
        builder.set_verify(SslVerifyMode::PEER);
        let connector = builder.build();
        let mut config = connector.configure().map_err(|_| NetError::SslProtocolError)?;
        config.set_use_server_name_indication(should_set_sni(host));

        let tls_stream = tokio_boring::connect(config, host, stream)
            .await
            .map_err(|e| {
                tracing::debug!(host, error = ?e, "SSL handshake failed");
                NetError::SslProtocolError
            })?;

        self.set_state(LoadState::Idle);
        Ok(SocketType::Ssl(tls_stream))
    }
}

/// Check if SNI (Server Name Indication) should be set for this host.
/// Per RFC 6066, SNI MUST NOT be set for raw IP addresses.
pub fn should_set_sni(host: &str) -> bool {
    host.parse::<std::net::IpAddr>().is_err()
}
