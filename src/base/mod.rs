//! Base types and error handling.
//!
//! Provides foundational types mirroring Chromium's `net/base/`:
//! - [`NetError`](neterror::NetError): every failure kind a request can produce
//! - [`LoadState`](loadstate::LoadState): progress of a single request attempt
//! - [`context`]: `io::Error` to `NetError` conversion with context

pub mod context;
pub mod loadstate;
pub mod neterror;
