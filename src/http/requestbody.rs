//! Outgoing request payload.
//!
//! The body is written verbatim after the request head; its length is what
//! the default `Content-Length` header announces. No chunked upload.

use bytes::Bytes;

/// Bytes sent after the request head. Any method may carry one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    /// Nothing after the head; announced as `Content-Length: 0`.
    #[default]
    Empty,
    Bytes(Bytes),
}

impl RequestBody {
    /// Body from a `'static` buffer, without copying.
    pub const fn from_static(data: &'static [u8]) -> Self {
        RequestBody::Bytes(Bytes::from_static(data))
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// A zero-length `Bytes` body counts as empty too.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            RequestBody::Empty => &[],
            RequestBody::Bytes(data) => data,
        }
    }
}

impl From<Bytes> for RequestBody {
    fn from(data: Bytes) -> Self {
        RequestBody::Bytes(data)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(data: Vec<u8>) -> Self {
        Bytes::from(data).into()
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        Bytes::from(text).into()
    }
}

impl From<&[u8]> for RequestBody {
    fn from(data: &[u8]) -> Self {
        Bytes::copy_from_slice(data).into()
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        text.as_bytes().into()
    }
}
