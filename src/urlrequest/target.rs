//! Resolution of an absolute URL into the pieces needed to open a connection
//! and write a request line.

use crate::base::neterror::NetError;
use url::Url;

/// Where a request goes and what goes in its request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    url: Url,
    host: String,
    port: u16,
    secure: bool,
    path: String,
}

impl RequestTarget {
    /// Parse an absolute `http` or `https` URL.
    pub fn resolve(url: &str) -> Result<Self, NetError> {
        let parsed = Url::parse(url).map_err(|_| NetError::InvalidUrl)?;
        Ok(Self::from_url(parsed)?.with_query_from(url))
    }

    /// Resolve a `Location` value against this target. Relative references
    /// are joined to the current URL.
    pub fn join(&self, location: &str) -> Result<Self, NetError> {
        let next = self
            .url
            .join(location)
            .map_err(|_| NetError::InvalidRedirect(location.to_string()))?;
        Ok(Self::from_url(next)?.with_query_from(location))
    }

    pub fn from_url(url: Url) -> Result<Self, NetError> {
        let secure = match url.scheme() {
            "http" => false,
            "https" => true,
            other => return Err(NetError::UnsupportedScheme(other.to_string())),
        };
        let host = url.host_str().ok_or(NetError::InvalidUrl)?.to_string();
        let port = url.port_or_known_default().ok_or(NetError::InvalidUrl)?;

        let path = request_path(&url, url.query());

        Ok(Self {
            url,
            host,
            port,
            secure,
            path,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Hostname as written in the URL (IPv6 literals keep their brackets).
    /// This is what goes into the `Host` header.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Hostname suitable for DNS lookup and TLS server name.
    pub fn connect_host(&self) -> &str {
        self.host.trim_start_matches('[').trim_end_matches(']')
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Percent-encoded path plus `?query`, as sent in the request line.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Prefer the query exactly as `reference` spells it over the
    /// re-encoded one from `Url`, when it is safe on the request line.
    fn with_query_from(mut self, reference: &str) -> Self {
        if self.url.query().is_some() {
            if let Some(query) = written_query(reference) {
                self.path = request_path(&self.url, Some(query));
            }
        }
        self
    }
}

// `Url` keeps the path percent-encoded and never empty for http(s).
fn request_path(url: &Url, query: Option<&str>) -> String {
    let mut path = url.path().to_string();
    if path.is_empty() {
        path.push('/');
    }
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        path.push('?');
        path.push_str(query);
    }
    path
}

/// The query of a URL reference as written, if it is all visible ASCII.
fn written_query(reference: &str) -> Option<&str> {
    let before_fragment = reference
        .split_once('#')
        .map_or(reference, |(head, _)| head);
    let (_, query) = before_fragment.split_once('?')?;
    query.bytes().all(|b| b.is_ascii_graphic()).then_some(query)
}
