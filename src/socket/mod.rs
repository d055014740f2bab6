//! Socket and connection management.
//!
//! Mirrors Chromium's `net/socket/` with one connection per request:
//! - [`connectjob`]: DNS → TCP → TLS connection flow
//! - [`client`]: the connected plain or TLS stream

pub mod client;
pub mod connectjob;
