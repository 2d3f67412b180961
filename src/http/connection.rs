use std::fmt;
use std::net::SocketAddr;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::Error;
use crate::http::handler::Handler;
use crate::http::parser::parse_http_request;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::routing::Router;

/// Size of the single read performed per connection.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 4096;

/// Drives one request/response exchange over a stream, then closes it.
pub struct Connection<S = TcpStream> {
    stream: S,
    peer: SocketAddr,
    router: Router,
    read_buffer_size: usize,
    state: ConnectionState,
}

enum ConnectionState {
    Idle,
    Reading,
    Parsing(Bytes),
    Resolving(Request),
    Invoking(Request, Handler),
    Serializing(Request, Response),
    Writing(ResponseWriter),
    Closed,
    Failed,
}

impl ConnectionState {
    fn name(&self) -> &'static str {
        match self {
            ConnectionState::Idle => "idle",
            ConnectionState::Reading => "reading",
            ConnectionState::Parsing(_) => "parsing",
            ConnectionState::Resolving(_) => "resolving",
            ConnectionState::Invoking(..) => "invoking",
            ConnectionState::Serializing(..) => "serializing",
            ConnectionState::Writing(_) => "writing",
            ConnectionState::Closed => "closed",
            ConnectionState::Failed => "failed",
        }
    }
}

impl fmt::Debug for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: SocketAddr, router: Router) -> Self {
        Self {
            stream,
            peer,
            router,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            state: ConnectionState::Idle,
        }
    }

    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size;
        self
    }

    /// Runs the exchange to completion.
    ///
    /// The stream is shut down and dropped before this returns, whether the
    /// exchange succeeded or failed. Errors are returned for the caller to
    /// log; they never outlive this connection.
    pub async fn run(mut self) -> Result<(), Error> {
        let result = self.drive().await;

        if let Err(e) = self.stream.shutdown().await {
            tracing::debug!(peer = %self.peer, error = %e, "Shutdown after exchange failed");
        }
        tracing::debug!(peer = %self.peer, state = self.state.name(), "Connection closed");

        result
    }

    async fn drive(&mut self) -> Result<(), Error> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Failed);

            self.state = match self.step(state).await {
                Ok(ConnectionState::Closed) => {
                    self.state = ConnectionState::Closed;
                    return Ok(());
                }
                Ok(next) => next,
                Err(e) => return Err(e),
            };
        }
    }

    async fn step(&mut self, state: ConnectionState) -> Result<ConnectionState, Error> {
        match state {
            ConnectionState::Idle => Ok(ConnectionState::Reading),

            ConnectionState::Reading => match self.read_request().await? {
                Some(bytes) => Ok(ConnectionState::Parsing(bytes)),
                None => Ok(ConnectionState::Closed),
            },

            ConnectionState::Parsing(bytes) => {
                let request = parse_http_request(&bytes)?;
                Ok(ConnectionState::Resolving(request))
            }

            ConnectionState::Resolving(mut request) => {
                let handler = self.router.resolve(&mut request);
                Ok(ConnectionState::Invoking(request, handler))
            }

            ConnectionState::Invoking(request, handler) => {
                let (request, response) = tokio::task::spawn_blocking(move || {
                    let response = handler(&request);
                    (request, response)
                })
                .await?;

                Ok(ConnectionState::Serializing(request, response?))
            }

            ConnectionState::Serializing(request, response) => {
                let response = response.normalize_body();
                let writer = ResponseWriter::new(&response, &request)?;

                tracing::info!(
                    peer = %self.peer,
                    method = %request.method,
                    path = %request.path,
                    status = response.status.as_u16(),
                    bytes = writer.len(),
                    "Responding"
                );

                Ok(ConnectionState::Writing(writer))
            }

            ConnectionState::Writing(mut writer) => {
                writer.write_to_stream(&mut self.stream).await?;
                Ok(ConnectionState::Closed)
            }

            ConnectionState::Closed | ConnectionState::Failed => Ok(ConnectionState::Closed),
        }
    }

    /// Performs the single bounded read for this connection.
    ///
    /// Returns `None` when the peer closed without sending anything.
    async fn read_request(&mut self) -> Result<Option<Bytes>, Error> {
        let mut buf = vec![0u8; self.read_buffer_size];
        let n = self.stream.read(&mut buf).await?;

        if n == 0 {
            tracing::debug!(peer = %self.peer, "Client closed before sending a request");
            return Ok(None);
        }

        if n == self.read_buffer_size {
            tracing::warn!(
                peer = %self.peer,
                limit = self.read_buffer_size,
                "Request filled the read buffer and may be truncated"
            );
        }

        buf.truncate(n);
        Ok(Some(Bytes::from(buf)))
    }
}
