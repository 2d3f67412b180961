use std::sync::Arc;

use crate::http::request::Request;
use crate::http::response::Response;

/// A request handler.
///
/// Handlers run on the blocking pool, so they may do plain file I/O. An `Err`
/// aborts the connection without a response.
pub type Handler = Arc<dyn Fn(&Request) -> anyhow::Result<Response> + Send + Sync>;

/// Wraps a function or closure into a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&Request) -> anyhow::Result<Response> + Send + Sync + 'static,
{
    Arc::new(f)
}
