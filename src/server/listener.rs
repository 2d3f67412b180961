use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::routing::Router;

/// Pause after a failed accept, so fd exhaustion (EMFILE) doesn't spin the loop.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Source of incoming connections.
pub trait Acceptor {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send + 'static;

    fn accept(&self) -> impl Future<Output = io::Result<(Self::Stream, SocketAddr)>> + Send;
}

impl Acceptor for TcpListener {
    type Stream = TcpStream;

    fn accept(&self) -> impl Future<Output = io::Result<(TcpStream, SocketAddr)>> + Send {
        TcpListener::accept(self)
    }
}

pub async fn run(cfg: &Config, router: Router) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", cfg.server.listen_addr);

    serve(listener, cfg, router).await
}

/// Accepts connections forever, one task per connection.
///
/// A failed accept is logged and retried after a short pause; it never ends
/// the loop. With `max_connections` set, a permit is taken before each accept
/// and held until that connection's task ends.
pub async fn serve<A>(listener: A, cfg: &Config, router: Router) -> anyhow::Result<()>
where
    A: Acceptor + Sync,
{
    let limit = cfg.server.max_connections.map(|n| Arc::new(Semaphore::new(n)));
    let read_buffer_size = cfg.server.read_buffer_size;

    loop {
        let permit = match &limit {
            Some(limit) => Some(Arc::clone(limit).acquire_owned().await?),
            None => None,
        };

        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!("Failed to accept connection: {}", e);
                tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let router = router.clone();
        tokio::spawn(async move {
            let conn = Connection::new(socket, peer, router)
                .with_read_buffer_size(read_buffer_size);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
            drop(permit);
        });
    }
}
