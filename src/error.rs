use std::fmt;
use std::io;

/// Protocol-level failures while parsing a response.
///
/// These cover everything the client refuses to accept from the wire:
/// a status line it cannot read, a version it does not speak, any status
/// other than 200, and a content-length that is not a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The status line was missing, non-UTF-8, or not `VERSION CODE REASON`.
    InvalidStatusLine,
    /// The version token did not start with `HTTP/`.
    InvalidVersion,
    /// The server answered with a status code other than 200.
    NonSuccessStatus(u16),
    /// The `content-length` header value did not parse as a non-negative integer.
    InvalidContentLength,
}

/// Terminal outcome of a failed request.
///
/// Every failure delivered to a failure callback is one of these two
/// kinds. Transport errors wrap the underlying I/O cause; protocol errors
/// carry the specific parse failure.
#[derive(Debug)]
pub enum Error {
    /// Resolution, connect, or socket read/write failure.
    Transport(io::Error),
    /// The response violated the subset of HTTP/1.0 this client speaks.
    Protocol(ProtocolError),
}

impl Error {
    /// Transport error used when the connection has already failed and a
    /// queued or newly submitted request can never run.
    pub(crate) fn connection_failed(cause: &str) -> Self {
        Error::Transport(io::Error::new(
            io::ErrorKind::NotConnected,
            format!("connection failed: {cause}"),
        ))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    pub fn is_protocol(&self) -> bool {
        matches!(self, Error::Protocol(_))
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::InvalidStatusLine => write!(f, "invalid status line"),
            ProtocolError::InvalidVersion => write!(f, "invalid version"),
            ProtocolError::NonSuccessStatus(code) => write!(f, "non-200 status: {code}"),
            ProtocolError::InvalidContentLength => write!(f, "malformed content-length"),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "transport error: {e}"),
            Error::Protocol(e) => write!(f, "protocol error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transport(e) => Some(e),
            Error::Protocol(e) => Some(e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Transport(e)
    }
}

impl From<ProtocolError> for Error {
    fn from(e: ProtocolError) -> Self {
        Error::Protocol(e)
    }
}
