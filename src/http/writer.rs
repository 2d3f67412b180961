use std::time::SystemTime;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::SerializeError;
use crate::http::mime::content_type_for_path;
use crate::http::request::Request;
use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Value of the server identity header sent with every response.
pub const SERVER_IDENTITY: &str = "Hearth/0.1";

/// Serializes `resp` using the current time for the `Date` header.
pub fn serialize_response(resp: &Response, req: &Request) -> Result<Vec<u8>, SerializeError> {
    serialize_response_at(resp, req, SystemTime::now())
}

/// Serializes `resp` as it would be sent at instant `now`.
///
/// Header order is fixed: `Date`, `Host`, `Content-Length`, `Connection`,
/// `Content-Type`, one `Set-Cookie` per cookie, then the response's own
/// headers in insertion order.
pub fn serialize_response_at(
    resp: &Response,
    req: &Request,
    now: SystemTime,
) -> Result<Vec<u8>, SerializeError> {
    let reason = resp
        .status
        .reason_phrase()
        .ok_or(SerializeError::UnknownStatusCode(resp.status.as_u16()))?;

    let content_type = resp
        .content_type
        .as_deref()
        .unwrap_or_else(|| content_type_for_path(&req.path));

    let body = resp.body.as_bytes();

    let mut head = format!("{} {} {}\r\n", HTTP_VERSION, resp.status.as_u16(), reason);
    head.push_str(&format!("Date: {}\r\n", httpdate::fmt_http_date(now)));
    head.push_str(&format!("Host: {}\r\n", SERVER_IDENTITY));
    head.push_str(&format!("Content-Length: {}\r\n", body.len()));
    head.push_str("Connection: Close\r\n");
    head.push_str(&format!("Content-Type: {}\r\n", content_type));

    for (name, value) in &resp.cookies {
        head.push_str(&format!("Set-Cookie: {}={}\r\n", name, value));
    }

    for (k, v) in &resp.headers {
        head.push_str(&format!("{}: {}\r\n", k, v));
    }

    // Header/body separator
    head.push_str("\r\n");

    let mut buf = Vec::with_capacity(head.len() + body.len());
    buf.extend_from_slice(head.as_bytes());
    buf.extend_from_slice(body);

    Ok(buf)
}

/// Holds serialized response bytes and pushes them to a stream.
#[derive(Debug)]
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response, request: &Request) -> Result<Self, SerializeError> {
        Ok(Self {
            buffer: serialize_response(response, request)?,
            written: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub async fn write_to_stream<S>(&mut self, stream: &mut S) -> std::io::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream
                .write(&self.buffer[self.written..])
                .await?;

            if n == 0 {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "connection closed while writing",
                ));
            }

            self.written += n;
        }

        stream.flush().await
    }
}
