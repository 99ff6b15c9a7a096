//! Inbound HTTP request as seen by the middleware pipeline.

use super::error::{HttpError, HttpResult};
use bytes::Bytes;
use http::{Method, Uri, Version};
use std::collections::HashMap;
use std::str::FromStr;

/// Maximum number of headers to parse.
const MAX_HEADERS: usize = 100;

/// Parsed HTTP request.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: Uri,
    version: Version,
    /// Header names are stored lowercase.
    headers: HashMap<String, String>,
    body: Bytes,
    /// Address of the connected peer (`ip` or `ip:port`).
    remote_addr: Option<String>,
}

impl Request {
    /// Create a new request builder.
    #[must_use]
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    /// Get the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Get the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Get the HTTP version.
    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Get a header value (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Get all headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Get the User-Agent header.
    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.header("user-agent")
    }

    /// Get the request body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Get the peer address of the connection.
    #[must_use]
    pub fn remote_addr(&self) -> Option<&str> {
        self.remote_addr.as_deref()
    }

    /// Set the peer address, as the server does after accepting a connection.
    pub fn set_remote_addr(&mut self, addr: impl Into<String>) {
        self.remote_addr = Some(addr.into());
    }

    /// Set a header value.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into().to_lowercase(), value.into());
    }

    /// Parse a request head from raw HTTP/1.x bytes.
    ///
    /// Returns the request and the offset at which the body starts.
    pub fn parse(data: &[u8]) -> HttpResult<(Self, usize)> {
        let mut headers = [httparse::EMPTY_HEADER; MAX_HEADERS];
        let mut req = httparse::Request::new(&mut headers);

        match req.parse(data)? {
            httparse::Status::Complete(body_offset) => {
                let method = Method::from_str(req.method.unwrap_or("GET"))?;
                let uri = Uri::from_str(req.path.unwrap_or("/"))?;
                let version = match req.version {
                    Some(0) => Version::HTTP_10,
                    _ => Version::HTTP_11,
                };

                // Repeated headers keep the first occurrence, except
                // X-Forwarded-For style lists which are joined.
                let mut headers_map: HashMap<String, String> = HashMap::new();
                for header in req.headers.iter() {
                    let name = header.name.to_lowercase();
                    let value = String::from_utf8_lossy(header.value).trim().to_string();
                    match headers_map.get_mut(&name) {
                        Some(existing) if name == "x-forwarded-for" => {
                            existing.push_str(", ");
                            existing.push_str(&value);
                        },
                        Some(_) => {},
                        None => {
                            headers_map.insert(name, value);
                        },
                    }
                }

                let request = Request {
                    method,
                    uri,
                    version,
                    headers: headers_map,
                    body: Bytes::new(),
                    remote_addr: None,
                };

                Ok((request, body_offset))
            },
            httparse::Status::Partial => Err(HttpError::Parse("Incomplete request".to_string())),
        }
    }
}

/// Builder for HTTP requests.
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    uri: Option<Uri>,
    headers: HashMap<String, String>,
    body: Bytes,
    remote_addr: Option<String>,
}

impl RequestBuilder {
    /// Create a new request builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Set the request URI.
    pub fn uri(mut self, uri: impl Into<String>) -> HttpResult<Self> {
        self.uri = Some(Uri::from_str(&uri.into())?);
        Ok(self)
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Set the request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the peer address.
    pub fn remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.remote_addr = Some(addr.into());
        self
    }

    /// Build the request.
    #[must_use]
    pub fn build(self) -> Request {
        Request {
            method: self.method.unwrap_or(Method::GET),
            uri: self.uri.unwrap_or_else(|| Uri::from_static("/")),
            version: Version::HTTP_11,
            headers: self.headers,
            body: self.body,
            remote_addr: self.remote_addr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_request() {
        let data = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\nUser-Agent: curl/8.0\r\n\r\n";
        let (req, offset) = Request::parse(data).unwrap();

        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.path(), "/index.html");
        assert_eq!(req.version(), Version::HTTP_11);
        assert_eq!(req.user_agent(), Some("curl/8.0"));
        assert_eq!(offset, data.len());
        assert!(req.remote_addr().is_none());
    }

    #[test]
    fn test_parse_joins_forwarded_for() {
        let data = b"GET / HTTP/1.1\r\nX-Forwarded-For: 1.2.3.4\r\nX-Forwarded-For: 5.6.7.8\r\n\r\n";
        let (req, _) = Request::parse(data).unwrap();
        assert_eq!(req.header("x-forwarded-for"), Some("1.2.3.4, 5.6.7.8"));
    }

    #[test]
    fn test_parse_partial() {
        let data = b"GET / HTTP/1.1\r\nHost: exa";
        assert!(matches!(Request::parse(data), Err(HttpError::Parse(_))));
    }

    #[test]
    fn test_request_builder() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/next")
            .unwrap()
            .header("Referer", "https://example.com/")
            .remote_addr("10.0.0.5:41000")
            .build();

        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.path(), "/next");
        assert_eq!(req.header("referer"), Some("https://example.com/"));
        assert_eq!(req.remote_addr(), Some("10.0.0.5:41000"));
    }

    #[test]
    fn test_header_case_insensitive() {
        let mut req = Request::builder().build();
        req.set_header("X-Real-IP", "192.0.2.1");
        assert_eq!(req.header("x-real-ip"), Some("192.0.2.1"));
        assert_eq!(req.header("X-REAL-IP"), Some("192.0.2.1"));
    }
}
