use bytes::Bytes;

/// HTTP status code carried by a [`Response`].
///
/// Handlers may put any number here; only codes with a known reason phrase
/// can be serialized. The writer rejects the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// 200 OK
    pub const OK: StatusCode = StatusCode(200);
    /// 302 Found
    pub const FOUND: StatusCode = StatusCode(302);
    /// 404 Not Found
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    /// 405 Method Not Allowed
    pub const METHOD_NOT_ALLOWED: StatusCode = StatusCode(405);

    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use hearth::http::response::StatusCode;
    /// assert_eq!(StatusCode::OK.as_u16(), 200);
    /// assert_eq!(StatusCode::NOT_FOUND.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns the canonical reason phrase, or `None` for unsupported codes.
    ///
    /// # Example
    ///
    /// ```
    /// # use hearth::http::response::StatusCode;
    /// assert_eq!(StatusCode::OK.reason_phrase(), Some("OK"));
    /// assert_eq!(StatusCode(418).reason_phrase(), None);
    /// ```
    pub fn reason_phrase(&self) -> Option<&'static str> {
        match self.0 {
            200 => Some("OK"),
            302 => Some("Found"),
            404 => Some("Not Found"),
            405 => Some("Method Not Allowed"),
            _ => None,
        }
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        StatusCode::OK
    }
}

/// Response payload as produced by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Text(String),
    Bytes(Bytes),
}

impl Body {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Body::Text(text) => text.as_bytes(),
            Body::Bytes(bytes) => bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts into raw bytes without copying.
    pub fn into_bytes(self) -> Bytes {
        match self {
            Body::Text(text) => Bytes::from(text),
            Body::Bytes(bytes) => bytes,
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::Bytes(Bytes::new())
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(Bytes::from(bytes))
    }
}

impl From<&'static [u8]> for Body {
    fn from(bytes: &'static [u8]) -> Self {
        Body::Bytes(Bytes::from_static(bytes))
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Bytes(bytes)
    }
}

/// Represents a complete HTTP response produced by a handler.
///
/// Headers and cookies keep the order in which they were first set; setting
/// an existing name again replaces its value in place. `Date`,
/// `Content-Length` and the other server headers are added by the writer,
/// not stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Extra headers, emitted after the server-generated ones
    pub headers: Vec<(String, String)>,
    /// Cookies, each rendered as its own `Set-Cookie` line
    pub cookies: Vec<(String, String)>,
    /// Explicit content type; inferred from the request path when `None`
    pub content_type: Option<String>,
    /// Response body
    pub body: Body,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use hearth::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::OK)
///     .header("Cache-Control", "no-cache")
///     .cookie("session", "abc")
///     .body("hello")
///     .build();
/// assert_eq!(response.body.len(), 5);
/// ```
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    cookies: Vec<(String, String)>,
    content_type: Option<String>,
    body: Body,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Adds a header, or replaces the value of one with the same name.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        upsert(&mut self.headers, key.into(), value.into());
        self
    }

    /// Adds a cookie, or replaces the value of one with the same name.
    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        upsert(&mut self.cookies, name.into(), value.into());
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the final Response.
    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            cookies: self.cookies,
            content_type: self.content_type,
            body: self.body,
        }
    }
}

fn upsert(pairs: &mut Vec<(String, String)>, key: String, value: String) {
    match pairs.iter_mut().find(|(k, _)| *k == key) {
        Some((_, v)) => *v = value,
        None => pairs.push((key, value)),
    }
}

impl Response {
    /// Creates a simple 200 OK response with the given body.
    pub fn ok(body: impl Into<Body>) -> Self {
        ResponseBuilder::new(StatusCode::OK)
            .body(body)
            .build()
    }

    /// Creates a 302 Found response pointing at `location`.
    pub fn redirect(location: impl Into<String>) -> Self {
        ResponseBuilder::new(StatusCode::FOUND)
            .header("Location", location)
            .build()
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        ResponseBuilder::new(StatusCode::NOT_FOUND)
            .content_type("text/html; charset=UTF-8")
            .body(&b"<html><body><h1>404 Not Found</h1></body></html>"[..])
            .build()
    }

    /// Creates a 405 Method Not Allowed response.
    pub fn method_not_allowed() -> Self {
        ResponseBuilder::new(StatusCode::METHOD_NOT_ALLOWED)
            .body(&b"<html><body><h1>405 Method Not Allowed</h1></body></html>"[..])
            .build()
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the response with a text body converted to raw bytes.
    pub fn normalize_body(self) -> Self {
        Self {
            body: Body::Bytes(self.body.into_bytes()),
            ..self
        }
    }
}
