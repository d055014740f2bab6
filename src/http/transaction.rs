use crate::base::context::{IoResultExt, NetResultExt};
use crate::base::loadstate::LoadState;
use crate::base::neterror::NetError;
use crate::http::body::{read_body, BodyStrategy};
use crate::http::headermap::HeaderMap;
use crate::http::parser::{read_response_head, ResponseHead};
use crate::http::request::encode_request_head;
use crate::http::requestbody::RequestBody;
use crate::http::response::HttpResponse;
use crate::socket::client::SocketType;
use crate::socket::connectjob::ConnectJob;
use crate::urlrequest::target::RequestTarget;
use http::{Method, StatusCode};
use tokio::io::{AsyncWriteExt, BufReader};

/// Internal state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    CreateStream,
    SendRequest,
    ReadHeaders,
    ReadBody,
    Done,
}

impl State {
    /// Map internal state to public LoadState.
    fn to_load_state(self) -> LoadState {
        match self {
            State::Idle => LoadState::Idle,
            State::CreateStream => LoadState::Connecting,
            State::SendRequest => LoadState::SendingRequest,
            State::ReadHeaders => LoadState::WaitingForResponse,
            State::ReadBody => LoadState::ReadingResponse,
            State::Done => LoadState::Idle,
        }
    }
}

/// One request/response exchange over one freshly opened connection.
///
/// The socket lives only inside [`start`](Self::start): it is closed after
/// the body has been read, and dropped on every error path.
pub struct HttpNetworkTransaction {
    target: RequestTarget,
    method: Method,
    headers: HeaderMap,
    body: RequestBody,
    state: State,
}

impl HttpNetworkTransaction {
    /// `headers` is the complete header block, defaults already merged.
    pub fn new(
        target: RequestTarget,
        method: Method,
        headers: HeaderMap,
        body: RequestBody,
    ) -> Self {
        Self {
            target,
            method,
            headers,
            body,
            state: State::Idle,
        }
    }

    /// Get the current load state (for progress reporting).
    pub fn get_load_state(&self) -> LoadState {
        self.state.to_load_state()
    }

    fn set_state(&mut self, state: State) {
        tracing::trace!(url = %self.target.url(), load_state = ?state.to_load_state(), "transaction state");
        self.state = state;
    }

    /// Run the exchange to completion.
    pub async fn start(&mut self) -> Result<HttpResponse, NetError> {
        // Framing errors surface before any connection is opened.
        let request_head = encode_request_head(&self.method, self.target.path(), &self.headers)?;

        self.set_state(State::CreateStream);
        let result = self.do_loop(&request_head).await;
        self.set_state(State::Idle);
        result
    }

    async fn do_loop(&mut self, request_head: &[u8]) -> Result<HttpResponse, NetError> {
        let mut stream: Option<BufReader<SocketType>> = None;
        let mut head: Option<ResponseHead> = None;

        loop {
            match self.state {
                State::Idle | State::Done => {
                    return Err(NetError::ConnectionClosed);
                }
                State::CreateStream => {
                    let socket = ConnectJob::new(&self.target).connect().await?;
                    stream = Some(BufReader::new(socket));
                    self.set_state(State::SendRequest);
                }
                State::SendRequest => {
                    let socket = stream.as_mut().ok_or(NetError::ConnectionClosed)?.get_mut();
                    tracing::debug!(
                        method = %self.method,
                        url = %self.target.url(),
                        body_len = self.body.len(),
                        "sending request"
                    );
                    let (host, port) = (self.target.host(), self.target.port());
                    socket
                        .write_all(request_head)
                        .await
                        .exchange_context(host, port)?;
                    if !self.body.is_empty() {
                        socket
                            .write_all(self.body.as_bytes())
                            .await
                            .exchange_context(host, port)?;
                    }
                    socket.flush().await.exchange_context(host, port)?;
                    self.set_state(State::ReadHeaders);
                }
                State::ReadHeaders => {
                    let reader = stream.as_mut().ok_or(NetError::ConnectionClosed)?;
                    let parsed = read_response_head(reader)
                        .await
                        .exchange_context(self.target.host(), self.target.port())?;
                    tracing::debug!(
                        url = %self.target.url(),
                        status = parsed.status.as_u16(),
                        reason = %parsed.reason,
                        "received response head"
                    );
                    head = Some(parsed);
                    self.set_state(State::ReadBody);
                }
                State::ReadBody => {
                    let reader = stream.as_mut().ok_or(NetError::ConnectionClosed)?;
                    let head = head.take().ok_or(NetError::InvalidResponse)?;
                    let strategy = if response_has_no_body(&self.method, head.status) {
                        BodyStrategy::Fixed(0)
                    } else {
                        BodyStrategy::select(&head.headers)?
                    };
                    let body = read_body(reader, strategy)
                        .await
                        .exchange_context(self.target.host(), self.target.port())?;
                    tracing::debug!(?strategy, body_len = body.len(), "read response body");
                    self.set_state(State::Done);

                    // Release the connection; the peer may already be gone.
                    if let Some(mut reader) = stream.take() {
                        if let Err(e) = reader.get_mut().shutdown().await {
                            tracing::trace!(error = %e, "shutdown after response failed");
                        }
                    }
                    return Ok(HttpResponse::new(self.target.url().clone(), head, body));
                }
            }
        }
    }
}

/// HEAD responses and 1xx/204/304 never carry a body, whatever their
/// framing headers claim.
fn response_has_no_body(method: &Method, status: StatusCode) -> bool {
    method == Method::HEAD
        || status.is_informational()
        || status == StatusCode::NO_CONTENT
        || status == StatusCode::NOT_MODIFIED
}
