//! HTTP/1.1 framing, parsing and content decoding.

pub mod body;
pub mod cookiemap;
pub mod decoder;
pub mod headermap;
pub mod parser;
pub mod request;
pub mod requestbody;
pub mod response;
pub mod transaction;

// Re-exports for convenience
pub use cookiemap::CookieMap;
pub use decoder::DecodeErrors;
pub use headermap::{merge_headers, HeaderMap};
pub use requestbody::RequestBody;
pub use response::HttpResponse;
