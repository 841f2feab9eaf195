//! Courier - Asynchronous HTTP/1.0 Client
//!
//! Core library for issuing HTTP/1.0 requests over one persistent
//! connection, with completion delivered through callbacks.

pub mod client;
pub mod error;
pub mod http;

pub use client::Client;
pub use error::{Error, ProtocolError};
