use std::io;
use std::net::SocketAddr;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, lookup_host};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::error::{Error, ProtocolError};
use crate::http::headers::ResponseHeaders;
use crate::http::parser;
use crate::http::request::PendingRequest;

/// Read buffer growth step.
const BUFFER_SIZE: usize = 8192;

/// Lifecycle of one client connection, as driven by its task.
pub enum ConnectionState {
    Resolving,
    Connecting(Vec<SocketAddr>),
    Open(Connection),
    Failed(String),
}

/// Per-request response progress. Single-use: a terminal outcome ends it.
enum RequestState {
    Writing,
    AwaitingStatusLine,
    AwaitingHeaders,
    AwaitingBody(usize),
    Done(Bytes),
}

/// The open socket and its read buffer.
///
/// Exactly one request at a time may execute against a `Connection`;
/// `execute` takes `&mut self`, so the exclusivity is structural.
pub struct Connection {
    stream: TcpStream,
    buffer: BytesMut,
}

/// Resolves `host:port` into an ordered list of candidate endpoints.
pub async fn resolve(host: &str, port: u16) -> Result<Vec<SocketAddr>, Error> {
    let endpoints: Vec<SocketAddr> = lookup_host((host, port)).await?.collect();

    if endpoints.is_empty() {
        return Err(Error::Transport(io::Error::new(
            io::ErrorKind::NotFound,
            "host resolved to no addresses",
        )));
    }

    Ok(endpoints)
}

impl Connection {
    /// Connects to the first reachable endpoint, in resolution order.
    pub async fn connect(endpoints: &[SocketAddr]) -> Result<Self, Error> {
        let mut last_err = io::Error::new(io::ErrorKind::NotFound, "no endpoints to connect to");

        for addr in endpoints {
            match TcpStream::connect(addr).await {
                Ok(stream) => {
                    return Ok(Self {
                        stream,
                        buffer: BytesMut::with_capacity(BUFFER_SIZE),
                    });
                }
                Err(e) => {
                    tracing::debug!(endpoint = %addr, error = %e, "endpoint unreachable");
                    last_err = e;
                }
            }
        }

        Err(Error::Transport(last_err))
    }

    /// Runs one request to its terminal outcome.
    ///
    /// Returns only after the response, including its body if any, has been
    /// fully consumed from the socket, so the next request may start writing
    /// immediately afterwards without interleaving.
    pub async fn execute(&mut self, request: &PendingRequest) -> Result<Bytes, Error> {
        let mut state = RequestState::Writing;

        loop {
            state = match state {
                RequestState::Writing => {
                    self.stream.write_all(request.wire_bytes()).await?;
                    RequestState::AwaitingStatusLine
                }

                RequestState::AwaitingStatusLine => {
                    let line = self.read_line().await?;
                    let line = std::str::from_utf8(&line)
                        .map_err(|_| ProtocolError::InvalidStatusLine)?;
                    let status = parser::parse_status_line(line)?;

                    if status.code != 200 {
                        return Err(ProtocolError::NonSuccessStatus(status.code).into());
                    }

                    RequestState::AwaitingHeaders
                }

                RequestState::AwaitingHeaders => {
                    let headers = self.read_headers().await?;

                    match headers.content_length()? {
                        Some(len) => RequestState::AwaitingBody(len),
                        None => RequestState::Done(Bytes::new()),
                    }
                }

                RequestState::AwaitingBody(len) => {
                    RequestState::Done(self.read_exact(len).await?)
                }

                RequestState::Done(body) => {
                    return Ok(body);
                }
            };
        }
    }

    /// Reads header lines until the blank line that ends the block.
    ///
    /// Lines without a `:` are skipped, not fatal.
    async fn read_headers(&mut self) -> Result<ResponseHeaders, Error> {
        let mut headers = ResponseHeaders::new();

        loop {
            let line = self.read_line().await?;

            if line.is_empty() {
                return Ok(headers);
            }

            let line = String::from_utf8_lossy(&line);
            if let Some((name, value)) = parser::parse_header_line(&line) {
                headers.insert(name, value);
            }
        }
    }

    /// Reads one CRLF-terminated line, returned without its terminator.
    async fn read_line(&mut self) -> Result<Bytes, Error> {
        loop {
            if let Some(pos) = self.buffer.windows(2).position(|w| w == b"\r\n") {
                let line = self.buffer.split_to(pos + 2);
                return Ok(line.freeze().slice(..pos));
            }

            self.fill("connection closed before complete response received")
                .await?;
        }
    }

    /// Reads exactly `len` body bytes; anything already buffered counts.
    async fn read_exact(&mut self, len: usize) -> Result<Bytes, Error> {
        while self.buffer.len() < len {
            self.fill("connection closed before complete body received")
                .await?;
        }

        Ok(self.buffer.split_to(len).freeze())
    }

    async fn fill(&mut self, eof_msg: &str) -> Result<(), Error> {
        let n = self.stream.read_buf(&mut self.buffer).await?;

        if n == 0 {
            return Err(Error::Transport(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                eof_msg,
            )));
        }

        Ok(())
    }
}

/// Drives one connection: resolve, connect, then serve the queue.
///
/// The queue receiver is the FIFO of submitted requests; only the request
/// currently handed to `execute` touches the socket. Once the connection
/// fails, every remaining and future request is failed with a transport
/// error until all senders are gone.
pub(crate) async fn drive(host: String, port: u16, mut queue: UnboundedReceiver<PendingRequest>) {
    let mut state = ConnectionState::Resolving;

    loop {
        state = match state {
            ConnectionState::Resolving => {
                tracing::debug!(host = %host, port, "resolving");

                match resolve(&host, port).await {
                    Ok(endpoints) => ConnectionState::Connecting(endpoints),
                    Err(err) => {
                        tracing::warn!(host = %host, port, error = %err, "resolution failed");
                        ConnectionState::Failed(err.to_string())
                    }
                }
            }

            ConnectionState::Connecting(endpoints) => {
                tracing::debug!(host = %host, port, endpoints = endpoints.len(), "connecting");

                match Connection::connect(&endpoints).await {
                    Ok(conn) => {
                        tracing::info!(host = %host, port, "connection open");
                        ConnectionState::Open(conn)
                    }
                    Err(err) => {
                        tracing::warn!(host = %host, port, error = %err, "connect failed");
                        ConnectionState::Failed(err.to_string())
                    }
                }
            }

            ConnectionState::Open(mut conn) => 'serve: loop {
                // Next request becomes active only once the previous one has
                // reached a terminal state.
                let Some(request) = queue.recv().await else {
                    return;
                };

                let method = request.method().to_string();
                let path = request.path().to_string();

                match conn.execute(&request).await {
                    Ok(body) => {
                        tracing::debug!(
                            method = %method,
                            path = %path,
                            body_len = body.len(),
                            "request complete"
                        );
                        request.complete(Ok(body));
                    }
                    Err(err) => {
                        // A half-parsed response leaves the framing on the
                        // shared socket indeterminate, so the connection
                        // cannot be trusted for the requests behind it.
                        tracing::warn!(
                            method = %method,
                            path = %path,
                            error = %err,
                            "request failed"
                        );
                        let cause = err.to_string();
                        request.complete(Err(err));
                        break 'serve ConnectionState::Failed(cause);
                    }
                }
            },

            ConnectionState::Failed(cause) => {
                tracing::warn!(host = %host, port, cause = %cause, "connection failed");

                // Stays failed until the caller opens a new client; every
                // queued and later-submitted request gets a transport error.
                while let Some(request) = queue.recv().await {
                    request.complete(Err(Error::connection_failed(&cause)));
                }

                return;
            }
        };
    }
}
