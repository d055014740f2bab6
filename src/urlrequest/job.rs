use crate::base::neterror::NetError;
use crate::http::headermap::merge_headers;
use crate::http::request::{build_request_headers, default_headers};
use crate::http::response::HttpResponse;
use crate::http::transaction::HttpNetworkTransaction;
use crate::urlrequest::context::URLRequestContextConfig;
use crate::urlrequest::request::Request;
use crate::urlrequest::target::RequestTarget;

/// Drives a [`Request`] through as many transactions as its redirect chain
/// needs, one fresh connection per hop.
pub struct URLRequestHttpJob<'a> {
    config: &'a URLRequestContextConfig,
    request: Request,
    redirect_limit: usize,
    redirects_followed: usize,
}

impl<'a> URLRequestHttpJob<'a> {
    pub fn new(config: &'a URLRequestContextConfig, request: Request) -> Self {
        Self {
            config,
            request,
            redirect_limit: config.max_redirects,
            redirects_followed: 0,
        }
    }

    /// Number of redirect hops taken so far.
    pub fn redirects_followed(&self) -> usize {
        self.redirects_followed
    }

    pub async fn start(&mut self) -> Result<HttpResponse, NetError> {
        let follow = self
            .request
            .follow_redirects()
            .unwrap_or(self.config.follow_redirects);
        let mut target = self.request.target().clone();

        loop {
            let response = self.send_once(&target).await?;
            if !follow || !response.status().is_redirection() {
                return Ok(response);
            }

            // A 3xx without Location (e.g. 304) is a final answer.
            let Some(location) = response.headers().get("Location") else {
                return Ok(response);
            };
            let next = target.join(location)?;

            if self.redirects_followed >= self.redirect_limit {
                tracing::debug!(limit = self.redirect_limit, "redirect limit reached");
                return Err(NetError::TooManyRedirects);
            }
            self.redirects_followed += 1;
            tracing::debug!(
                from = %target.url(),
                to = %next.url(),
                status = response.status().as_u16(),
                hop = self.redirects_followed,
                "following redirect"
            );
            target = next;
        }
    }

    async fn send_once(&self, target: &RequestTarget) -> Result<HttpResponse, NetError> {
        let body = self.request.body().clone();

        let defaults = default_headers(target.host(), &self.config.user_agent, body.len());
        let base = merge_headers(&defaults, &self.config.default_headers);
        let headers = build_request_headers(&base, self.request.headers(), self.request.cookies());

        let mut transaction =
            HttpNetworkTransaction::new(target.clone(), self.request.method().clone(), headers, body);
        transaction.start().await
    }
}
