//! HTTP Client with builder pattern.
//!
//! Provides a high-level, ergonomic API over [`URLRequestHttpJob`].
//!
//! # Example
//!
//! ```rust,ignore
//! use barenet::Client;
//!
//! let client = Client::builder()
//!     .user_agent("my-tool/1.0")
//!     .max_redirects(5)
//!     .build();
//!
//! let resp = client.post("https://example.com/api/login")
//!     .header("Content-Type", "application/json")
//!     .body(r#"{"username":"u"}"#)
//!     .send()
//!     .await?;
//! let session = resp.cookies().clone();
//! ```

use crate::base::neterror::NetError;
use crate::http::cookiemap::CookieMap;
use crate::http::headermap::HeaderMap;
use crate::http::request::normalize_method;
use crate::http::requestbody::RequestBody;
use crate::http::response::HttpResponse;
use crate::urlrequest::context::URLRequestContextConfig;
use crate::urlrequest::job::URLRequestHttpJob;
use crate::urlrequest::request::Request;
use crate::urlrequest::target::RequestTarget;
use http::Method;
use std::sync::Arc;

/// HTTP Client for making requests.
///
/// Holds only immutable configuration; cloning is cheap and clones may be
/// used from different tasks at once. Every request opens its own connection.
#[derive(Debug, Clone, Default)]
pub struct Client {
    config: Arc<URLRequestContextConfig>,
}

impl Client {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn config(&self) -> &URLRequestContextConfig {
        &self.config
    }

    /// Start building a GET request.
    pub fn get<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    /// Start building a POST request.
    pub fn post<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::POST, url)
    }

    /// Start building a PUT request.
    pub fn put<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::PUT, url)
    }

    /// Start building a DELETE request.
    pub fn delete<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::DELETE, url)
    }

    /// Start building a HEAD request.
    pub fn head<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::HEAD, url)
    }

    /// Start building a PATCH request.
    pub fn patch<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::PATCH, url)
    }

    /// Start building a request with custom method.
    pub fn request<U: AsRef<str>>(&self, method: Method, url: U) -> RequestBuilder {
        RequestBuilder {
            client: self.clone(),
            method: Ok(method),
            url: url.as_ref().to_string(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            cookies: CookieMap::new(),
            follow_redirects: None,
            deferred_error: None,
        }
    }

    /// Start building a request from a method token such as `"post"`.
    pub fn request_str<U: AsRef<str>>(&self, method: &str, url: U) -> RequestBuilder {
        let mut builder = self.request(Method::GET, url);
        builder.method = normalize_method(method);
        builder
    }

    /// Send a prebuilt request.
    pub async fn execute(&self, request: Request) -> Result<HttpResponse, NetError> {
        let mut job = URLRequestHttpJob::new(&self.config, request);
        job.start().await
    }
}

/// Builder for creating a [`Client`].
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: URLRequestContextConfig,
}

impl ClientBuilder {
    /// Replace the `User-Agent` sent with every request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Add a header sent with every request. Per-request headers still win.
    pub fn default_header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key, value);
        self
    }

    /// Maximum redirect hops before failing with `TooManyRedirects`.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.config.max_redirects = max;
        self
    }

    /// Whether requests follow redirects unless the request says otherwise.
    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.config.follow_redirects = follow;
        self
    }

    /// Build the client.
    pub fn build(self) -> Client {
        Client {
            config: Arc::new(self.config),
        }
    }
}

/// Builder for a single request.
#[derive(Debug)]
pub struct RequestBuilder {
    client: Client,
    method: Result<Method, NetError>,
    url: String,
    headers: HeaderMap,
    body: RequestBody,
    cookies: CookieMap,
    follow_redirects: Option<bool>,
    deferred_error: Option<NetError>,
}

impl RequestBuilder {
    /// Add a header. Case-insensitive; a later value for the same name wins.
    pub fn header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Overlay a whole header map.
    pub fn headers(mut self, headers: &HeaderMap) -> Self {
        self.headers.extend_from(headers);
        self
    }

    /// Set request body.
    pub fn body<B: Into<RequestBody>>(mut self, body: B) -> Self {
        self.body = body.into();
        self
    }

    /// Set JSON body.
    #[cfg(feature = "json")]
    pub fn json<T: serde::Serialize>(mut self, json: &T) -> Self {
        match serde_json::to_vec(json) {
            Ok(bytes) => {
                self.body = bytes.into();
                self.headers.insert("Content-Type", "application/json");
            }
            Err(e) => self.deferred_error = Some(NetError::JsonParseError(e)),
        }
        self
    }

    /// Add one cookie to the `Cookie` header.
    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name, value);
        self
    }

    /// Add every cookie in `cookies`, e.g. those from an earlier response.
    pub fn cookies(mut self, cookies: &CookieMap) -> Self {
        for (name, value) in cookies.iter() {
            self.cookies.insert(name, value);
        }
        self
    }

    /// Override the client's redirect policy for this request.
    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = Some(follow);
        self
    }

    /// Assemble the [`Request`] without sending it.
    pub fn build(self) -> Result<(Client, Request), NetError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }
        let method = self.method?;
        let target = RequestTarget::resolve(&self.url)?;

        let mut request = Request::from_parts(method, target);
        *request.headers_mut() = self.headers;
        *request.cookies_mut() = self.cookies;
        request.set_body(self.body);
        if let Some(follow) = self.follow_redirects {
            request.set_follow_redirects(follow);
        }
        Ok((self.client, request))
    }

    /// Send the request.
    pub async fn send(self) -> Result<HttpResponse, NetError> {
        let (client, request) = self.build()?;
        client.execute(request).await
    }
}
