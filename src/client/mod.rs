//! Client connection handling.
//!
//! A [`Client`] is a cheap handle to a single persistent HTTP/1.0
//! connection. Opening it spawns a driver task that owns the socket;
//! submitting a request enqueues it and returns immediately. Callbacks run
//! on the driver task, the same context that performs the I/O.
//!
//! # Request state machine
//!
//! Each submitted request is driven through:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Writing   │ ← Serialize and send the request
//!        └──────┬──────┘
//!               │ Write complete
//!               ▼
//!        ┌───────────────────┐
//!        │ AwaitingStatusLine│ ← Must be `HTTP/... 200 ...`
//!        └──────┬────────────┘
//!               ▼
//!        ┌───────────────────┐
//!        │  AwaitingHeaders  │ ← Until the blank line
//!        └──────┬────────────┘
//!               ├─ content-length present → AwaitingBody → Done(body)
//!               └─ absent → Done(empty)
//! ```
//!
//! Requests are strictly sequenced: the next one starts writing only after
//! the active one's response has been fully consumed, so two requests'
//! bytes never interleave on the shared socket.
//!
//! # Example
//!
//! ```ignore
//! use courier::Client;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::open("example.com", 80);
//!
//!     client.submit(
//!         "GET",
//!         "/",
//!         |body| println!("{}", String::from_utf8_lossy(&body)),
//!         |err| eprintln!("request failed: {err}"),
//!     );
//! }
//! ```

pub mod connection;

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::error::Error;
use crate::http::request::PendingRequest;

/// Handle to one persistent HTTP/1.0 connection.
///
/// Cloning the handle shares the same connection and queue. The driver task
/// runs until every handle has been dropped.
#[derive(Debug, Clone)]
pub struct Client {
    queue: mpsc::UnboundedSender<PendingRequest>,
}

impl Client {
    /// Opens a connection to `host:port`.
    ///
    /// Returns immediately; resolution and connection establishment happen
    /// on the spawned driver task. If either fails, every request queued in
    /// the meantime (and any submitted later) fails with a transport error.
    /// A failed connection stays failed; open a new client to reconnect.
    ///
    /// Must be called within a tokio runtime.
    pub fn open(host: impl Into<String>, port: u16) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(connection::drive(host.into(), port, rx));

        Self { queue: tx }
    }

    /// Submits a request; never blocks.
    ///
    /// Exactly one of the two callbacks fires, once, when the request
    /// reaches a terminal state. Requests execute in submission order.
    pub fn submit<S, F>(&self, method: &str, path: &str, on_success: S, on_failure: F)
    where
        S: FnOnce(Bytes) + Send + Sync + 'static,
        F: FnOnce(Error) + Send + Sync + 'static,
    {
        let request = PendingRequest::new(method, path, Box::new(on_success), Box::new(on_failure));

        // The driver only exits once every sender is gone, so this send
        // cannot fail while `self` exists; completing the request on the
        // spot keeps the no-silent-drop guarantee regardless.
        if let Err(rejected) = self.queue.send(request) {
            rejected.0.complete(Err(Error::connection_failed("driver task gone")));
        }
    }
}
