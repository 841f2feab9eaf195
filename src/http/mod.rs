//! HTTP/1.0 protocol layer.
//!
//! This module implements the textual protocol work of the client: building
//! request bytes and parsing response bytes. It knows nothing about sockets;
//! the [`client`](crate::client) module feeds it lines and byte counts.
//!
//! # Submodules
//!
//! - **`parser`**: Parses the response status line and individual header lines
//! - **`headers`**: Case-insensitive response header map with a first-wins duplicate policy
//! - **`request`**: A submitted request: its serialized wire bytes and its completion callbacks
//!
//! # Response framing
//!
//! Only the HTTP/1.0 subset this client emits is understood on the way back:
//!
//! ```text
//! VERSION 200 REASON\r\n        ← any other status code is an error
//! name: value\r\n               ← zero or more, first occurrence wins
//! \r\n
//! <content-length bytes>        ← omitted entirely if no content-length
//! ```
//!
//! Chunked transfer-encoding and connection-close body delimiting are not
//! supported; a response without `content-length` has an empty body.

pub mod headers;
pub mod parser;
pub mod request;
