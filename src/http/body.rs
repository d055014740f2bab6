//! Response body framing.
//!
//! The framing is picked from the response headers in priority order:
//! chunked transfer coding, then `Content-Length`, then read-until-close.

use crate::base::neterror::NetError;
use crate::http::headermap::HeaderMap;
use crate::http::parser::read_line;
use bytes::Bytes;
use tokio::io::{AsyncBufRead, AsyncRead, AsyncReadExt};

/// How the body of a response is delimited on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStrategy {
    /// `Transfer-Encoding: chunked`.
    Chunked,
    /// Exactly this many bytes, from `Content-Length`.
    Fixed(u64),
    /// Everything until the peer closes the connection.
    UntilClose,
}

impl BodyStrategy {
    pub fn select(headers: &HeaderMap) -> Result<Self, NetError> {
        if headers
            .get("Transfer-Encoding")
            .is_some_and(|te| te.trim().eq_ignore_ascii_case("chunked"))
        {
            return Ok(BodyStrategy::Chunked);
        }
        if let Some(len) = headers.get("Content-Length") {
            let len = len.trim().parse().map_err(|_| NetError::InvalidResponse)?;
            return Ok(BodyStrategy::Fixed(len));
        }
        Ok(BodyStrategy::UntilClose)
    }
}

/// Read the response body using `strategy`.
pub async fn read_body<R>(reader: &mut R, strategy: BodyStrategy) -> Result<Bytes, NetError>
where
    R: AsyncBufRead + Unpin,
{
    let mut body = Vec::new();
    match strategy {
        BodyStrategy::Chunked => read_chunked(reader, &mut body).await?,
        BodyStrategy::Fixed(len) => {
            read_exact_into(reader, len, &mut body, NetError::ContentLengthMismatch).await?
        }
        BodyStrategy::UntilClose => {
            reader.read_to_end(&mut body).await?;
        }
    }
    Ok(Bytes::from(body))
}

/// Append exactly `len` bytes to `buf`, growing it as data arrives rather
/// than trusting the declared size up front.
async fn read_exact_into<R>(
    reader: &mut R,
    len: u64,
    buf: &mut Vec<u8>,
    on_short: NetError,
) -> Result<(), NetError>
where
    R: AsyncRead + Unpin,
{
    let n = reader.take(len).read_to_end(buf).await?;
    if (n as u64) < len {
        return Err(on_short);
    }
    Ok(())
}

/// Parse a chunk-size line; chunk extensions after `;` are ignored.
pub fn parse_chunk_size(line: &[u8]) -> Result<u64, NetError> {
    let line = std::str::from_utf8(line).map_err(|_| NetError::InvalidChunkedEncoding)?;
    let size = match line.split_once(';') {
        Some((size, _ext)) => size,
        None => line,
    }
    .trim();
    if size.is_empty() {
        return Err(NetError::InvalidChunkedEncoding);
    }
    u64::from_str_radix(size, 16).map_err(|_| NetError::InvalidChunkedEncoding)
}

async fn read_chunked<R>(reader: &mut R, body: &mut Vec<u8>) -> Result<(), NetError>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let line = read_line(reader, NetError::InvalidChunkedEncoding)
            .await?
            .ok_or(NetError::IncompleteChunkedEncoding)?;
        let size = parse_chunk_size(&line)?;
        if size == 0 {
            break;
        }
        read_exact_into(reader, size, body, NetError::IncompleteChunkedEncoding).await?;
        match read_line(reader, NetError::InvalidChunkedEncoding).await? {
            Some(crlf) if crlf.is_empty() => {}
            Some(_) => return Err(NetError::InvalidChunkedEncoding),
            None => return Err(NetError::IncompleteChunkedEncoding),
        }
    }

    // Trailer fields are not interpreted, only consumed up to the final CRLF.
    while let Some(line) = read_line(reader, NetError::InvalidChunkedEncoding).await? {
        if line.is_empty() {
            break;
        }
        tracing::trace!(trailer = %String::from_utf8_lossy(&line), "discarding chunk trailer");
    }
    Ok(())
}
