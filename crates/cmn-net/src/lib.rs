//! cmn Networking
//!
//! Requests issued one at a time in submission order, a JSON API helper
//! and file uploads with progress, all over a pluggable [`Transport`].

mod api;
mod config;
mod http;
pub mod loader;
mod query;
mod serializer;
mod transport;

pub use api::{error_result, ApiClient, ApiParams, UploadOptions};
pub use config::ApiConfig;
pub use http::{HttpTransport, UPLOAD_CHUNK_SIZE};
pub use loader::{Method, Request};
pub use query::{encode_component, query_string};
pub use serializer::{Pending, RequestSerializer};
pub use transport::{ProgressEvent, ProgressFn, Transport};
pub use url::Url;

/// HTTP Response
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// Check if response is OK (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, NetError> {
        serde_json::from_slice(&self.body).map_err(|e| NetError::Parse(e.to_string()))
    }
}

/// Network error
///
/// `Clone` because one outcome can be observed by several pollers of the
/// request chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Request aborted")]
    Aborted,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid arg")]
    InvalidArg,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_helpers() {
        let response = Response {
            status: 204,
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: br#"{"status":0}"#.to_vec(),
        };

        assert!(response.ok());
        assert_eq!(response.header("content-type"), Some("application/json"));
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["status"], 0);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let response = Response {
            status: 200,
            body: b"<html>".to_vec(),
            ..Default::default()
        };
        let parsed: Result<serde_json::Value, _> = response.json();
        assert!(matches!(parsed, Err(NetError::Parse(_))));
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(NetError::Timeout.to_string(), "Request timed out");
        assert_eq!(NetError::Aborted.to_string(), "Request aborted");
        assert_eq!(NetError::InvalidArg.to_string(), "Invalid arg");
    }
}
