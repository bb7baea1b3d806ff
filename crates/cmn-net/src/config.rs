//! API client configuration

use serde::Deserialize;

use crate::NetError;

/// Client configuration options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// User agent string sent by [`HttpTransport`](crate::HttpTransport)
    pub user_agent: String,

    /// Per-request timeout in milliseconds, 0 disables it
    pub timeout_ms: u64,

    /// Content type added to non-GET API calls that do not set one
    pub form_content_type: String,

    /// Content type used by uploads when the caller gives none
    pub upload_content_type: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("cmn/{}", env!("CARGO_PKG_VERSION")),
            timeout_ms: 0,
            form_content_type: "application/x-www-form-urlencoded".to_string(),
            upload_content_type: "application/octet-stream".to_string(),
        }
    }
}

impl ApiConfig {
    /// Load from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, NetError> {
        serde_json::from_str(json).map_err(|e| NetError::Parse(e.to_string()))
    }

    pub fn timeout(&self) -> Option<std::time::Duration> {
        (self.timeout_ms > 0).then(|| std::time::Duration::from_millis(self.timeout_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.form_content_type, "application/x-www-form-urlencoded");
        assert_eq!(config.upload_content_type, "application/octet-stream");
        assert!(config.timeout().is_none());
        assert!(config.user_agent.starts_with("cmn/"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ApiConfig::from_json(r#"{"timeout_ms": 1500}"#).unwrap();
        assert_eq!(config.timeout(), Some(std::time::Duration::from_millis(1500)));
        assert_eq!(config.upload_content_type, "application/octet-stream");
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(ApiConfig::from_json("{"), Err(NetError::Parse(_))));
    }
}
