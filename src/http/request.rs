//! HTTP/1.1 request framing.
//!
//! Builds the outgoing header set and serializes the request head exactly as
//! it goes on the wire:
//!
//! ```text
//! METHOD SP path SP HTTP/1.1 CRLF
//! Key: Value CRLF
//! ...
//! CRLF
//! ```

use crate::base::neterror::NetError;
use crate::http::cookiemap::CookieMap;
use crate::http::headermap::{merge_headers, HeaderMap};
use http::header::{HeaderName, HeaderValue};
use http::Method;

/// Parse a method token case-insensitively. The result is always upper-case.
pub fn normalize_method(method: &str) -> Result<Method, NetError> {
    Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map_err(|_| NetError::MethodNotSupported(method.to_string()))
}

/// The headers every request starts from, in wire order.
///
/// `Host` carries the hostname only, never the port.
pub fn default_headers(host: &str, user_agent: &str, content_length: usize) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Host", host);
    headers.insert("Connection", "close");
    headers.insert("User-Agent", user_agent);
    headers.insert("Content-Length", content_length.to_string());
    headers
}

/// Assemble the final header block: defaults, then caller overrides, then a
/// synthesized `Cookie` header when cookies are present.
pub fn build_request_headers(
    defaults: &HeaderMap,
    overrides: &HeaderMap,
    cookies: &CookieMap,
) -> HeaderMap {
    let mut headers = merge_headers(defaults, overrides);
    if !cookies.is_empty() {
        headers.insert("Cookie", cookies.to_header_value());
    }
    headers
}

/// Check a pair against the HTTP token and field-value grammars.
///
/// Values may carry obs-text (bytes >= 0x80) but no control bytes other
/// than HTAB.
fn validate_header(name: &str, value: &str) -> Result<(), NetError> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| NetError::InvalidHeader(format!("invalid name {:?}", name)))?;
    HeaderValue::from_bytes(value.as_bytes())
        .map_err(|_| NetError::InvalidHeader(format!("invalid value for {}: {:?}", name, value)))?;
    Ok(())
}

/// Serialize the request line and header block.
pub fn encode_request_head(
    method: &Method,
    path: &str,
    headers: &HeaderMap,
) -> Result<Vec<u8>, NetError> {
    if path.is_empty() || path.bytes().any(|b| b.is_ascii_whitespace()) {
        return Err(NetError::InvalidUrl);
    }

    let mut head = Vec::with_capacity(64 + headers.len() * 32);
    head.extend_from_slice(method.as_str().as_bytes());
    head.push(b' ');
    head.extend_from_slice(path.as_bytes());
    head.extend_from_slice(b" HTTP/1.1\r\n");
    for (name, value) in headers.iter() {
        validate_header(name, value)?;
        head.extend_from_slice(name.as_bytes());
        head.extend_from_slice(b": ");
        head.extend_from_slice(value.as_bytes());
        head.extend_from_slice(b"\r\n");
    }
    head.extend_from_slice(b"\r\n");
    Ok(head)
}
