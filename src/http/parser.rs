use std::collections::HashMap;

use bytes::Bytes;

use crate::error::ParseError;
use crate::http::request::{Method, Request};

const CRLF: &[u8] = b"\r\n";
const HEADERS_END: &[u8] = b"\r\n\r\n";

/// Parses one complete HTTP message held entirely in `buf`.
///
/// The function is pure: the same bytes always produce the same request or
/// the same error. Nothing is read beyond `buf`, and the body is taken as-is
/// without checking it against `Content-Length`.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    let line_end = find(buf, CRLF).ok_or(ParseError::MalformedRequestLine)?;
    let request_line = &buf[..line_end];
    let remain = &buf[line_end + CRLF.len()..];

    let headers_end = find(remain, HEADERS_END).ok_or(ParseError::MissingHeaderBodySeparator)?;
    let header_bytes = &remain[..headers_end];
    let body = Bytes::copy_from_slice(&remain[headers_end + HEADERS_END.len()..]);

    let request_line = std::str::from_utf8(request_line)
        .map_err(|_| ParseError::MalformedRequestLine)?;

    let (method, path, version) = match request_line.split(' ').collect::<Vec<_>>()[..] {
        [method, path, version] => (method, path, version),
        _ => return Err(ParseError::MalformedRequestLine),
    };

    if !path.starts_with('/') {
        return Err(ParseError::MalformedRequestLine);
    }

    let headers = parse_headers(header_bytes)?;

    let cookies = match headers.get("Cookie") {
        Some(raw) => parse_cookies(raw)?,
        None => HashMap::new(),
    };

    Ok(Request {
        method: Method::from_token(method),
        path: path.to_string(),
        version: version.to_string(),
        headers,
        cookies,
        path_params: HashMap::new(),
        body,
    })
}

fn parse_headers(block: &[u8]) -> Result<HashMap<String, String>, ParseError> {
    let block = std::str::from_utf8(block)
        .map_err(|_| ParseError::MalformedHeader(String::from_utf8_lossy(block).into_owned()))?;

    let mut headers = HashMap::new();

    for line in block.split("\r\n") {
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| ParseError::MalformedHeader(line.to_string()))?;

        // Only the spaces right after the colon belong to the separator.
        headers.insert(key.to_string(), value.trim_start_matches(' ').to_string());
    }

    Ok(headers)
}

/// Decodes a `Cookie` header value of the form `a=1; b=2`.
pub(crate) fn parse_cookies(raw: &str) -> Result<HashMap<String, String>, ParseError> {
    raw.split("; ")
        .map(|pair| {
            pair.split_once('=')
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .ok_or_else(|| ParseError::MalformedCookie(pair.to_string()))
        })
        .collect()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len())
        .position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let parsed = parse_http_request(req).unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
        assert!(parsed.body.is_empty());
    }

    #[test]
    fn header_value_keeps_later_colons() {
        let req = b"GET / HTTP/1.1\r\nReferer: http://a:8080/x\r\n\r\n";

        let parsed = parse_http_request(req).unwrap();

        assert_eq!(parsed.header("Referer"), Some("http://a:8080/x"));
    }

    #[test]
    fn header_without_space_after_colon() {
        let req = b"GET / HTTP/1.1\r\nX-Tight:value\r\n\r\n";

        let parsed = parse_http_request(req).unwrap();

        assert_eq!(parsed.header("X-Tight"), Some("value"));
    }

    #[test]
    fn cookie_value_may_contain_equals() {
        let cookies = parse_cookies("token=a=b").unwrap();

        assert_eq!(cookies.get("token").unwrap(), "a=b");
    }

    #[test]
    fn find_locates_first_occurrence() {
        assert_eq!(find(b"ab\r\ncd\r\n", CRLF), Some(2));
        assert_eq!(find(b"abcd", CRLF), None);
    }
}
