use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;

use crate::error::ParseError;
use crate::http::parser::parse_cookies;

/// HTTP request methods.
///
/// The common verbs get their own variant. Any other token from the request
/// line is kept verbatim in [`Method::Extension`], so parsing a method never
/// fails; deciding what to do with an unexpected verb is up to the handler.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
    /// Any other method token, case preserved
    Extension(String),
}

/// Represents a parsed HTTP request from a client.
///
/// Headers and cookies are fully decoded by the time a handler sees the
/// request. `path_params` stays empty until the router binds a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request target, verbatim, query string included (e.g. "/search?q=1")
    pub path: String,
    /// HTTP version token (typically "HTTP/1.1")
    pub version: String,
    /// Request headers; names are case-sensitive and the last duplicate wins
    pub headers: HashMap<String, String>,
    /// Cookies decoded from the `Cookie` header
    pub cookies: HashMap<String, String>,
    /// Named captures from the matched route pattern
    pub path_params: HashMap<String, String>,
    /// Everything after the blank line, unvalidated against Content-Length
    pub body: Bytes,
}

/// Builder for constructing Request objects.
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    version: Option<String>,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Method {
    /// Maps a request-line token to a method.
    ///
    /// Matching is case-sensitive, as method tokens are.
    ///
    /// # Example
    ///
    /// ```
    /// # use hearth::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::GET);
    /// assert_eq!(Method::from_token("get"), Method::Extension("get".to_string()));
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            other => Method::Extension(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Extension(token) => token,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the request, decoding any `Cookie` header the same way the
    /// wire parser does. A missing method, or a path not starting with `/`,
    /// is rejected as a malformed request line.
    pub fn build(self) -> Result<Request, ParseError> {
        let cookies = match self.headers.get("Cookie") {
            Some(raw) => parse_cookies(raw)?,
            None => HashMap::new(),
        };

        let path = self
            .path
            .filter(|p| p.starts_with('/'))
            .ok_or(ParseError::MalformedRequestLine)?;

        Ok(Request {
            method: self.method.ok_or(ParseError::MalformedRequestLine)?,
            path,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
            cookies,
            path_params: HashMap::new(),
            body: self.body,
        })
    }
}

impl Request {
    /// Retrieves a header value by its exact name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(key)
            .map(|v| v.as_str())
    }

    /// Retrieves a cookie sent by the client.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(|v| v.as_str())
    }

    /// Retrieves a path parameter captured by the matched route.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(|v| v.as_str())
    }
}
