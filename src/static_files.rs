//! Static asset handler used as the router's fallback.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::http::handler::{handler, Handler};
use crate::http::request::Request;
use crate::http::response::Response;

/// Serves files below a root directory.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps a request path onto the root, refusing anything that could
    /// escape it.
    pub fn resolve_path(&self, request_path: &str) -> Option<PathBuf> {
        let relative = Path::new(request_path.trim_start_matches('/'));

        if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            return None;
        }

        Some(self.root.join(relative))
    }

    /// Reads the file for `request.path`.
    ///
    /// Missing files and rejected paths produce a 404; any other I/O failure
    /// is returned as an error.
    pub fn serve(&self, request: &Request) -> anyhow::Result<Response> {
        let Some(path) = self.resolve_path(&request.path) else {
            tracing::warn!(path = %request.path, "Rejected static path");
            return Ok(Response::not_found());
        };

        match std::fs::read(&path) {
            Ok(contents) => Ok(Response::ok(contents)),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::IsADirectory) => {
                tracing::debug!(file = %path.display(), "Static file not found");
                Ok(Response::not_found())
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("failed to read static file {}", path.display()))),
        }
    }

    pub fn into_handler(self) -> Handler {
        handler(move |request| self.serve(request))
    }
}
