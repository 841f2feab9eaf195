use std::fmt;

use bytes::Bytes;

use crate::error::Error;

/// Callback invoked with the response body when a request succeeds.
pub type OnSuccess = Box<dyn FnOnce(Bytes) + Send + Sync + 'static>;

/// Callback invoked with the error when a request fails.
pub type OnFailure = Box<dyn FnOnce(Error) + Send + Sync + 'static>;

/// A submitted request waiting for, or being driven through, the connection.
///
/// The wire bytes are built once at submission time. Completion consumes the
/// request, so each one is delivered exactly one terminal outcome and is
/// destroyed in the act of delivering it.
pub struct PendingRequest {
    method: String,
    path: String,
    wire: Vec<u8>,
    on_success: OnSuccess,
    on_failure: OnFailure,
}

/// Serializes one HTTP/1.0 request.
///
/// The emitted headers are fixed: this client sends no request body and no
/// custom headers.
fn serialize_request(method: &str, path: &str) -> Vec<u8> {
    let mut buffer = Vec::new();

    buffer.extend_from_slice(format!("{method} {path} HTTP/1.0\r\n").as_bytes());
    buffer.extend_from_slice(b"Accept: */*\r\n");
    buffer.extend_from_slice(b"Connection: keep-alive\r\n");
    buffer.extend_from_slice(b"\r\n");

    buffer
}

impl PendingRequest {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        on_success: OnSuccess,
        on_failure: OnFailure,
    ) -> Self {
        let method = method.into();
        let path = path.into();
        let wire = serialize_request(&method, &path);

        Self {
            method,
            path,
            wire,
            on_success,
            on_failure,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The exact bytes this request puts on the wire.
    pub fn wire_bytes(&self) -> &[u8] {
        &self.wire
    }

    /// Delivers the terminal outcome to the matching callback.
    pub fn complete(self, outcome: Result<Bytes, Error>) {
        match outcome {
            Ok(body) => (self.on_success)(body),
            Err(err) => (self.on_failure)(err),
        }
    }
}

impl fmt::Debug for PendingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
