//! MIME type detection based on file extensions.

/// Content type used when the path has no extension at all.
pub const DEFAULT_HTML: &str = "text/html; charset=UTF-8";

/// Content type used for extensions missing from the table.
pub const OCTET_STREAM: &str = "application/octet-stream";

const MIME_TYPES: &[(&str, &str)] = &[
    ("html", "text/html; charset=UTF-8"),
    ("css", "text/css"),
    ("png", "image/png"),
    ("jpg", "image/jpg"),
    ("gif", "image/gif"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("txt", "text/plain; charset=UTF-8"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
];

/// Infers a content type from the text after the last `.` in `path`.
///
/// The path is taken verbatim, so a query string is part of the "extension"
/// and usually lands on [`OCTET_STREAM`].
///
/// # Example
///
/// ```
/// # use hearth::http::mime::content_type_for_path;
/// assert_eq!(content_type_for_path("/logo.png"), "image/png");
/// assert_eq!(content_type_for_path("/now"), "text/html; charset=UTF-8");
/// assert_eq!(content_type_for_path("/archive.tar.zst"), "application/octet-stream");
/// ```
pub fn content_type_for_path(path: &str) -> &'static str {
    match path.rsplit_once('.') {
        Some((_, ext)) => MIME_TYPES
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|(_, mime)| *mime)
            .unwrap_or(OCTET_STREAM),
        None => DEFAULT_HTML,
    }
}
