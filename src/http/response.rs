//! HTTP Response with lazily decoded body access.

use crate::base::neterror::NetError;
use crate::http::cookiemap::CookieMap;
use crate::http::decoder::{self, ContentEncoding, DecodeErrors};
use crate::http::headermap::HeaderMap;
use crate::http::parser::ResponseHead;
use bytes::Bytes;
use http::StatusCode;
use std::borrow::Cow;
use url::Url;

/// A fully read HTTP response.
///
/// Immutable once built. The body is kept exactly as it came off the wire;
/// decompression and text/JSON decoding are recomputed on every call.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    url: Url,
    version: String,
    status: StatusCode,
    reason: String,
    headers: HeaderMap,
    cookies: CookieMap,
    body: Bytes,
}

impl HttpResponse {
    pub fn new(url: Url, head: ResponseHead, body: Bytes) -> Self {
        Self {
            url,
            version: head.version,
            status: head.status,
            reason: head.reason,
            headers: head.headers,
            cookies: head.cookies,
            body,
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The reason phrase after the status code, e.g. `Not Found`.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Protocol token of the status line, e.g. `HTTP/1.1`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// URL this response was fetched from (the last hop of a redirect chain).
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get a reference to the headers. Never contains `Set-Cookie`.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Cookies set by this response.
    pub fn cookies(&self) -> &CookieMap {
        &self.cookies
    }

    /// Raw body bytes, before any content decoding.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Body with its `Content-Encoding` removed.
    pub fn decompressed_body(&self) -> Result<Cow<'_, [u8]>, NetError> {
        let encoding = ContentEncoding::from_header(self.headers.get("Content-Encoding"))?;
        decoder::decompress(encoding, &self.body)
    }

    #[cfg(feature = "json")]
    fn check_json_content_type(&self) -> Result<(), NetError> {
        let content_type = self.headers.get("Content-Type").unwrap_or_default();
        if !content_type.contains("application/json") {
            return Err(NetError::ContentTypeMismatch(content_type.to_string()));
        }
        Ok(())
    }

    /// Parse the decompressed body as JSON.
    ///
    /// With `verify_type`, a `Content-Type` that does not mention
    /// `application/json` is rejected before parsing.
    #[cfg(feature = "json")]
    pub fn json(&self, verify_type: bool) -> Result<serde_json::Value, NetError> {
        self.json_as(verify_type)
    }

    /// Like [`json`](Self::json), deserializing into `T`.
    #[cfg(feature = "json")]
    pub fn json_as<T: serde::de::DeserializeOwned>(&self, verify_type: bool) -> Result<T, NetError> {
        if verify_type {
            self.check_json_content_type()?;
        }
        let body = self.decompressed_body()?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Decompressed body as strict UTF-8.
    pub fn text(&self) -> Result<String, NetError> {
        self.text_with("utf-8", DecodeErrors::Strict)
    }

    /// Decompressed body decoded with `encoding` (a WHATWG label).
    pub fn text_with(&self, encoding: &str, errors: DecodeErrors) -> Result<String, NetError> {
        let body = self.decompressed_body()?;
        decoder::decode_text(&body, encoding, errors)
    }
}
