//! # barenet
//!
//! A minimal HTTP/1.1 client over raw TCP and TLS sockets.
//!
//! Every request opens one connection, writes the request head and body,
//! reads a single response and closes the socket. Redirects are followed
//! with a fresh connection per hop.
//!
//! ## Features
//!
//! - **Framing**: `Content-Length`, `Transfer-Encoding: chunked`, and
//!   read-until-close bodies
//! - **Cookies**: `Set-Cookie` collected into a name → value map; request
//!   cookies sent as a single `Cookie` header
//! - **Redirects**: bounded, relative `Location` resolved against the
//!   current URL; method, body, headers and cookies reused
//! - **Decoding**: gzip/deflate content, any WHATWG text encoding, JSON
//!   (behind the default `json` feature)
//! - **TLS**: BoringSSL with peer verification and SNI
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! #[tokio::main]
//! async fn main() -> Result<(), barenet::NetError> {
//!     let resp = barenet::request("GET", "https://example.com/", None, None, None, true).await?;
//!     println!("{} {}", resp.status(), resp.text()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error type and load states
//! - [`http`] - Header and cookie maps, wire codec, body framing, decoding
//! - [`socket`] - TCP/TLS connection establishment
//! - [`urlrequest`] - URL resolution, request values, redirect handling
//! - [`client`] - Builder-style client API

pub mod base;
pub mod client;
pub mod http;
pub mod socket;
pub mod urlrequest;

pub use crate::base::neterror::NetError;
pub use crate::client::{Client, ClientBuilder, RequestBuilder};
pub use crate::http::{CookieMap, DecodeErrors, HeaderMap, HttpResponse, RequestBody};

use crate::urlrequest::context::URLRequestContextConfig;
use crate::urlrequest::job::URLRequestHttpJob;
use crate::urlrequest::request::Request;

/// Perform one HTTP request with the default configuration.
///
/// `method` is case-insensitive. `headers` override the defaults (`Host`,
/// `Connection: close`, `User-Agent`, `Content-Length`) by case-insensitive
/// name. With `follow_redirect`, 3xx responses carrying `Location` are
/// followed up to the default hop limit.
pub async fn request(
    method: &str,
    url: &str,
    headers: Option<HeaderMap>,
    body: Option<RequestBody>,
    cookies: Option<CookieMap>,
    follow_redirect: bool,
) -> Result<HttpResponse, NetError> {
    let mut request = Request::new(method, url)?;
    if let Some(headers) = headers {
        *request.headers_mut() = headers;
    }
    if let Some(body) = body {
        request.set_body(body);
    }
    if let Some(cookies) = cookies {
        *request.cookies_mut() = cookies;
    }
    request.set_follow_redirects(follow_redirect);

    let config = URLRequestContextConfig::default();
    URLRequestHttpJob::new(&config, request).start().await
}
