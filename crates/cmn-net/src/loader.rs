//! Request description
//!
//! Method, destination, headers and body of one outgoing request.

use futures::future::AbortRegistration;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Patch => "PATCH",
        }
    }

    /// Parse a method name, defaulting to GET like `fetch` does for unknown input
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "HEAD" => Method::Head,
            "OPTIONS" => Method::Options,
            "PATCH" => Method::Patch,
            _ => Method::Get,
        }
    }
}

/// Request configuration
#[derive(Debug, Default)]
pub struct Request {
    pub method: Method,
    pub url: String,
    /// Header list in insertion order; names compare case-insensitively
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    /// Abort path honoured by transports that support it
    pub abort: Option<AbortRegistration>,
}

impl Request {
    pub fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
            ..Default::default()
        }
    }

    pub fn get(url: &str) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: &str) -> Self {
        Self::new(Method::Post, url)
    }

    /// Get header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set a header, replacing any existing one with the same name
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// Set a header only if none with that name exists yet
    pub fn with_default_header(self, key: &str, value: &str) -> Self {
        if self.header(key).is_some() {
            self
        } else {
            self.with_header(key, value)
        }
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_abort(mut self, registration: AbortRegistration) -> Self {
        self.abort = Some(registration);
        self
    }
}
