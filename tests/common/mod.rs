//! Loopback HTTP/1.1 servers for integration tests.

#![allow(dead_code)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// A request as the server saw it.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Seen {
    fn parse(raw: &[u8]) -> Seen {
        let mut headers = [httparse::EMPTY_HEADER; 32];
        let mut req = httparse::Request::new(&mut headers);
        let head_len = match req.parse(raw).expect("malformed request") {
            httparse::Status::Complete(n) => n,
            httparse::Status::Partial => panic!("incomplete request head"),
        };
        Seen {
            method: req.method.unwrap_or_default().to_string(),
            path: req.path.unwrap_or_default().to_string(),
            headers: req
                .headers
                .iter()
                .map(|h| {
                    (
                        h.name.to_string(),
                        String::from_utf8_lossy(h.value).into_owned(),
                    )
                })
                .collect(),
            body: raw[head_len..].to_vec(),
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn header_names(&self) -> Vec<&str> {
        self.headers.iter().map(|(k, _)| k.as_str()).collect()
    }
}

/// Length of the request in `buf` once head and `Content-Length` body are in.
fn complete_len(buf: &[u8]) -> Option<usize> {
    let mut headers = [httparse::EMPTY_HEADER; 32];
    let mut req = httparse::Request::new(&mut headers);
    match req.parse(buf) {
        Ok(httparse::Status::Complete(head_len)) => {
            let content_length = req
                .headers
                .iter()
                .find(|h| h.name.eq_ignore_ascii_case("content-length"))
                .and_then(|h| std::str::from_utf8(h.value).ok())
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let total = head_len + content_length;
            (buf.len() >= total).then_some(total)
        }
        _ => None,
    }
}

/// Read one full request off `socket`.
pub async fn read_request(socket: &mut TcpStream) -> Seen {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        if let Some(total) = complete_len(&buf) {
            buf.truncate(total);
            return Seen::parse(&buf);
        }
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            return Seen::parse(&buf);
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

/// Serve connections sequentially. `handler` gets the zero-based connection
/// index, the parsed request and the server's base URL, and returns the raw
/// response bytes. Each connection is closed after its response.
pub async fn serve<F>(handler: F) -> (String, mpsc::UnboundedReceiver<Seen>)
where
    F: Fn(usize, &Seen, &str) -> Vec<u8> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let server_base = base.clone();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut hit = 0;
        while let Ok((mut socket, _)) = listener.accept().await {
            let seen = read_request(&mut socket).await;
            let response = handler(hit, &seen, &server_base);
            let _ = tx.send(seen);
            let _ = socket.write_all(&response).await;
            let _ = socket.shutdown().await;
            hit += 1;
        }
    });

    (base, rx)
}

/// Serve the same response to every connection.
pub async fn serve_static(response: &'static [u8]) -> (String, mpsc::UnboundedReceiver<Seen>) {
    serve(move |_, _, _| response.to_vec()).await
}
