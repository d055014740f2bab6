//! URL Request Context - Central configuration for network requests.
//!
//! Based on Chromium's net::URLRequestContext, provides a centralized
//! configuration point shared by every request a client issues.

use crate::http::headermap::HeaderMap;

/// Fixed client identifier sent as `User-Agent` unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("barenet/", env!("CARGO_PKG_VERSION"));

/// Chromium's redirect limit.
pub const DEFAULT_MAX_REDIRECTS: usize = 20;

/// Configuration options for URLRequestContext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct URLRequestContextConfig {
    /// User-Agent string to use for requests.
    pub user_agent: String,

    /// Headers added to every request after the built-in defaults and
    /// before per-request headers.
    pub default_headers: HeaderMap,

    /// Maximum redirect hops followed before failing with `TooManyRedirects`.
    pub max_redirects: usize,

    /// Whether requests follow redirects unless told otherwise.
    pub follow_redirects: bool,
}

impl Default for URLRequestContextConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_headers: HeaderMap::new(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            follow_redirects: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = URLRequestContextConfig::default();
        assert!(config.user_agent.starts_with("barenet/"));
        assert_eq!(config.max_redirects, 20);
        assert!(config.follow_redirects);
        assert!(config.default_headers.is_empty());
    }
}
