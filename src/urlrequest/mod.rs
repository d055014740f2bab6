//! Request-level API: URL resolution, per-request state and redirect handling.
//!
//! - [`target`]: absolute URL → host, port, scheme, request path
//! - [`request`]: the caller's request value
//! - [`context`]: configuration shared by all requests of a client
//! - [`job`]: runs a request, following redirects hop by hop

pub mod context;
pub mod job;
pub mod request;
pub mod target;
