use crate::base::neterror::NetError;
use crate::http::cookiemap::CookieMap;
use crate::http::headermap::HeaderMap;
use crate::http::request::normalize_method;
use crate::http::requestbody::RequestBody;
use crate::urlrequest::target::RequestTarget;
use http::Method;
use url::Url;

/// Everything a caller specifies about one request.
///
/// Redirect hops reuse the method, headers, body and cookies unchanged; only
/// the URL moves.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    target: RequestTarget,
    headers: HeaderMap,
    body: RequestBody,
    cookies: CookieMap,
    follow_redirects: Option<bool>,
}

impl Request {
    /// `method` is case-insensitive; `url` must be absolute `http` or `https`.
    pub fn new(method: &str, url: &str) -> Result<Self, NetError> {
        let method = normalize_method(method)?;
        Ok(Self::from_parts(method, RequestTarget::resolve(url)?))
    }

    pub fn from_parts(method: Method, target: RequestTarget) -> Self {
        Self {
            method,
            target,
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            cookies: CookieMap::new(),
            follow_redirects: None,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    pub fn url(&self) -> &Url {
        self.target.url()
    }

    /// Where the first hop goes, including the request-line path.
    pub fn target(&self) -> &RequestTarget {
        &self.target
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Add a header; a later value for the same name replaces the earlier one.
    pub fn add_header(&mut self, key: &str, value: &str) {
        self.headers.insert(key, value);
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<RequestBody>) {
        self.body = body.into();
    }

    pub fn cookies(&self) -> &CookieMap {
        &self.cookies
    }

    pub fn cookies_mut(&mut self) -> &mut CookieMap {
        &mut self.cookies
    }

    /// `None` defers to the client's configured default.
    pub fn follow_redirects(&self) -> Option<bool> {
        self.follow_redirects
    }

    pub fn set_follow_redirects(&mut self, follow: bool) {
        self.follow_redirects = Some(follow);
    }
}
