//! HTTP/1.1 response head parsing.
//!
//! Reads the status line and the header block from any buffered async
//! reader. `Set-Cookie` lines are diverted into a [`CookieMap`]; every other
//! header lands in a title-cased [`HeaderMap`] where the last occurrence wins.

use crate::base::neterror::NetError;
use crate::http::cookiemap::CookieMap;
use crate::http::headermap::{title_case, HeaderMap};
use http::StatusCode;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// Status line and headers of a response, before the body is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub version: String,
    pub status: StatusCode,
    pub reason: String,
    pub headers: HeaderMap,
    pub cookies: CookieMap,
}

/// Longest line accepted in a response head or chunked framing, terminator
/// included.
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// Read one line, without its CRLF or LF terminator.
///
/// Returns `None` at end of stream. A line that reaches [`MAX_LINE_LEN`]
/// without a newline fails with `on_overflow`.
pub(crate) async fn read_line<R>(
    reader: &mut R,
    on_overflow: NetError,
) -> Result<Option<Vec<u8>>, NetError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    let n = (&mut *reader)
        .take(MAX_LINE_LEN as u64)
        .read_until(b'\n', &mut line)
        .await?;
    if n == 0 {
        return Ok(None);
    }
    if line.last() == Some(&b'\n') {
        line.pop();
    } else if n >= MAX_LINE_LEN {
        tracing::debug!(limit = MAX_LINE_LEN, "line exceeds length limit");
        return Err(on_overflow);
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    Ok(Some(line))
}

/// Split a status line into (version, status, reason).
pub fn parse_status_line(line: &str) -> Result<(String, StatusCode, String), NetError> {
    let mut parts = line.splitn(3, ' ');
    let (version, code, reason) = match (parts.next(), parts.next(), parts.next()) {
        (Some(v), Some(c), Some(r)) if !v.is_empty() => (v, c, r),
        _ => return Err(NetError::MalformedStatusLine(line.to_string())),
    };
    let status = StatusCode::from_bytes(code.as_bytes())
        .map_err(|_| NetError::MalformedStatusLine(line.to_string()))?;
    Ok((version.to_string(), status, reason.to_string()))
}

/// Split a header line on the first `": "`.
///
/// A bare `:` is tolerated for servers that omit the space.
pub fn parse_header_line(line: &str) -> Result<(String, String), NetError> {
    if let Some((name, value)) = line.split_once(": ") {
        if !name.is_empty() {
            return Ok((title_case(name), value.to_string()));
        }
    }
    match line.split_once(':') {
        Some((name, value)) if !name.is_empty() => {
            Ok((title_case(name), value.trim_start().to_string()))
        }
        _ => Err(NetError::InvalidHeader(line.to_string())),
    }
}

/// Read the status line and header block.
///
/// An empty first line means the peer hung up without answering and maps to
/// [`NetError::ConnectionReset`].
pub async fn read_response_head<R>(reader: &mut R) -> Result<ResponseHead, NetError>
where
    R: AsyncBufRead + Unpin,
{
    let status_line = match read_line(reader, NetError::InvalidResponse).await? {
        Some(line) if !line.is_empty() => String::from_utf8_lossy(&line).into_owned(),
        _ => return Err(NetError::ConnectionReset),
    };
    let (version, status, reason) = parse_status_line(&status_line)?;

    let mut headers = HeaderMap::new();
    let mut cookies = CookieMap::new();
    loop {
        let line = read_line(reader, NetError::InvalidResponse)
            .await?
            .ok_or(NetError::ConnectionClosed)?;
        if line.is_empty() {
            break;
        }
        let line = String::from_utf8_lossy(&line);
        let (name, value) = parse_header_line(&line)?;
        if name == "Set-Cookie" {
            if !cookies.insert_set_cookie(&value) {
                tracing::warn!(value = %value, "ignoring Set-Cookie without name=value");
            }
        } else {
            headers.insert(name, value);
        }
    }

    Ok(ResponseHead {
        version,
        status,
        reason,
        headers,
        cookies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn parse(raw: &[u8]) -> Result<ResponseHead, NetError> {
        let mut reader = raw;
        read_response_head(&mut reader).await
    }

    #[tokio::test]
    async fn test_simple_head() {
        let head = parse(b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\n")
            .await
            .unwrap();
        assert_eq!(head.version, "HTTP/1.1");
        assert_eq!(head.status, StatusCode::OK);
        assert_eq!(head.reason, "OK");
        assert_eq!(head.headers.get("Content-Length"), Some("5"));
    }

    #[tokio::test]
    async fn test_reason_phrase_with_spaces() {
        let head = parse(b"HTTP/1.1 404 Not Found Here\r\n\r\n").await.unwrap();
        assert_eq!(head.status.as_u16(), 404);
        assert_eq!(head.reason, "Not Found Here");
    }

    #[tokio::test]
    async fn test_empty_first_line_is_connection_reset() {
        assert!(matches!(parse(b"").await, Err(NetError::ConnectionReset)));
        assert!(matches!(parse(b"\r\n").await, Err(NetError::ConnectionReset)));
    }

    #[tokio::test]
    async fn test_status_line_needs_three_fields() {
        let err = parse(b"HTTP/1.1 200\r\n\r\n").await.unwrap_err();
        assert!(matches!(err, NetError::MalformedStatusLine(_)));
    }

    #[tokio::test]
    async fn test_non_numeric_status() {
        let err = parse(b"HTTP/1.1 abc OK\r\n\r\n").await.unwrap_err();
        assert!(matches!(err, NetError::MalformedStatusLine(_)));
    }

    #[tokio::test]
    async fn test_empty_reason_with_trailing_space() {
        let head = parse(b"HTTP/1.1 204 \r\n\r\n").await.unwrap();
        assert_eq!(head.status, StatusCode::NO_CONTENT);
        assert_eq!(head.reason, "");
    }

    #[tokio::test]
    async fn test_headers_title_cased_last_wins() {
        let head = parse(b"HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\nX-A: 1\r\nx-a: 2\r\n\r\n")
            .await
            .unwrap();
        assert_eq!(head.headers.get("Content-Type"), Some("text/plain"));
        assert_eq!(head.headers.get("X-A"), Some("2"));
        let names: Vec<_> = head.headers.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["Content-Type", "X-A"]);
    }

    #[tokio::test]
    async fn test_set_cookie_diverted() {
        let head = parse(
            b"HTTP/1.1 200 OK\r\nSet-Cookie: sid=1; Path=/\r\nset-cookie: sid=2; HttpOnly\r\nSet-Cookie: lang=en\r\n\r\n",
        )
        .await
        .unwrap();
        assert!(!head.headers.contains_key("Set-Cookie"));
        assert_eq!(head.cookies.get("sid"), Some("2"));
        assert_eq!(head.cookies.get("lang"), Some("en"));
        assert_eq!(head.cookies.len(), 2);
    }

    #[tokio::test]
    async fn test_value_containing_separator() {
        let head = parse(b"HTTP/1.1 200 OK\r\nX-Note: a: b\r\n\r\n").await.unwrap();
        assert_eq!(head.headers.get("X-Note"), Some("a: b"));
    }

    #[tokio::test]
    async fn test_bare_lf_lines() {
        let head = parse(b"HTTP/1.0 301 Moved\nLocation: /next\n\n").await.unwrap();
        assert_eq!(head.version, "HTTP/1.0");
        assert_eq!(head.headers.get("Location"), Some("/next"));
    }

    #[tokio::test]
    async fn test_header_without_colon() {
        let err = parse(b"HTTP/1.1 200 OK\r\nnonsense\r\n\r\n").await.unwrap_err();
        assert!(matches!(err, NetError::InvalidHeader(_)));
    }

    #[tokio::test]
    async fn test_eof_inside_headers() {
        let err = parse(b"HTTP/1.1 200 OK\r\nX-A: 1\r\n").await.unwrap_err();
        assert!(matches!(err, NetError::ConnectionClosed));
    }

    #[tokio::test]
    async fn test_oversized_header_line() {
        let mut raw = b"HTTP/1.1 200 OK\r\nX-Flood: ".to_vec();
        raw.extend(std::iter::repeat(b'a').take(MAX_LINE_LEN + 10));
        raw.extend_from_slice(b"\r\n\r\n");
        let err = parse(&raw).await.unwrap_err();
        assert!(matches!(err, NetError::InvalidResponse));
    }

    #[tokio::test]
    async fn test_long_header_line_under_limit() {
        let value = "v".repeat(MAX_LINE_LEN - 64);
        let raw = format!("HTTP/1.1 200 OK\r\nX-Big: {}\r\n\r\n", value);
        let head = parse(raw.as_bytes()).await.unwrap();
        assert_eq!(head.headers.get("X-Big").map(str::len), Some(value.len()));
    }

    #[tokio::test]
    async fn test_oversized_status_line() {
        let raw = vec![b'H'; MAX_LINE_LEN * 2];
        let err = parse(&raw).await.unwrap_err();
        assert!(matches!(err, NetError::InvalidResponse));
    }
}
