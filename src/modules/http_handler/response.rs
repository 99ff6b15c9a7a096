//! HTTP response building and serialization.

use bytes::{Bytes, BytesMut};
use http::{StatusCode, Version};
use std::collections::HashMap;

/// HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    version: Version,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Response {
    /// Create a new response builder.
    #[must_use]
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::new()
    }

    /// Create an OK (200) response.
    #[must_use]
    pub fn ok() -> ResponseBuilder {
        ResponseBuilder::new().status(StatusCode::OK)
    }

    /// Create a Not Found (404) response.
    #[must_use]
    pub fn not_found() -> ResponseBuilder {
        ResponseBuilder::new().status(StatusCode::NOT_FOUND)
    }

    /// Get the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get a header value.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Get all headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Get the response body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Set a header value.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into().to_lowercase(), value.into());
    }

    /// Serialize the response to HTTP/1.x bytes.
    #[must_use]
    pub fn serialize(&self) -> BytesMut {
        let mut buf = BytesMut::new();

        let version_str = match self.version {
            Version::HTTP_10 => "HTTP/1.0",
            _ => "HTTP/1.1",
        };
        buf.extend_from_slice(
            format!(
                "{} {} {}\r\n",
                version_str,
                self.status.as_u16(),
                self.status.canonical_reason().unwrap_or("")
            )
            .as_bytes(),
        );

        for (name, value) in &self.headers {
            buf.extend_from_slice(format!("{name}: {value}\r\n").as_bytes());
        }
        if !self.headers.contains_key("content-length") {
            buf.extend_from_slice(format!("content-length: {}\r\n", self.body.len()).as_bytes());
        }
        buf.extend_from_slice(b"\r\n");
        buf.extend_from_slice(&self.body);

        buf
    }
}

impl Default for Response {
    fn default() -> Self {
        ResponseBuilder::new().build()
    }
}

/// Builder for HTTP responses.
#[derive(Debug)]
pub struct ResponseBuilder {
    status: StatusCode,
    version: Version,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl ResponseBuilder {
    /// Create a new response builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            version: Version::HTTP_11,
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    /// Set the status code.
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Set the response body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Set a text body with Content-Type: text/plain.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.header("content-type", "text/plain; charset=utf-8")
            .body(Bytes::from(text.into()))
    }

    /// Build the response.
    #[must_use]
    pub fn build(self) -> Response {
        Response {
            status: self.status,
            version: self.version,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}
