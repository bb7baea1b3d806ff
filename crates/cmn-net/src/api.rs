//! JSON API helper
//!
//! Page-relative API calls and uploads. Every failure is folded into a
//! `{"status": -1, "message": ...}` value so callers branch on `status`
//! instead of handling errors.

use std::rc::Rc;

use futures::future::{self, AbortRegistration, LocalBoxFuture};
use futures::FutureExt;
use serde_json::{json, Value};
use url::Url;

use crate::{
    query_string, ApiConfig, Method, NetError, ProgressEvent, ProgressFn, Request, RequestSerializer, Transport,
};

/// Uniform error result
pub fn error_result(message: impl std::fmt::Display) -> Value {
    json!({ "status": -1, "message": message.to_string() })
}

/// Parameters of one API call
#[derive(Debug, Clone, Default)]
pub struct ApiParams {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl ApiParams {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::method(Method::Post)
    }

    pub fn method(method: Method) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Form-encoded body from name/value pairs
    pub fn form<I, K, V>(self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.body(query_string(params))
    }
}

/// Optional parts of an upload
#[derive(Default)]
pub struct UploadOptions {
    pub content_type: Option<String>,
    pub on_progress: Option<Rc<ProgressFn>>,
    pub abort: Option<AbortRegistration>,
}

impl UploadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    /// Called with `(event, is_upload_phase)`
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressEvent, bool) + 'static,
    {
        self.on_progress = Some(Rc::new(callback));
        self
    }

    pub fn abort(mut self, registration: AbortRegistration) -> Self {
        self.abort = Some(registration);
        self
    }
}

/// API client bound to the current page location
#[derive(Debug, Clone)]
pub struct ApiClient {
    location: Url,
    serializer: RequestSerializer,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(location: &str, transport: Rc<dyn Transport>) -> Result<Self, NetError> {
        Self::with_config(location, transport, ApiConfig::default())
    }

    pub fn with_config(location: &str, transport: Rc<dyn Transport>, config: ApiConfig) -> Result<Self, NetError> {
        Self::with_serializer(location, RequestSerializer::new(transport), config)
    }

    /// Share an existing request chain, e.g. with another client
    pub fn with_serializer(location: &str, serializer: RequestSerializer, config: ApiConfig) -> Result<Self, NetError> {
        let location = Url::parse(location).map_err(|e| NetError::InvalidUrl(format!("{location}: {e}")))?;
        Ok(Self {
            location,
            serializer,
            config,
        })
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    pub fn serializer(&self) -> &RequestSerializer {
        &self.serializer
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Resolve `path` against the page location, always page-relative
    pub fn endpoint(&self, path: &str) -> Result<Url, NetError> {
        self.location
            .join(path.trim_start_matches('/'))
            .map_err(|e| NetError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Call a JSON API endpoint through the request chain.
    ///
    /// The request takes its place in the chain immediately; the returned
    /// future only waits for and parses the outcome.
    pub fn call_api(&self, path: &str, params: ApiParams) -> LocalBoxFuture<'static, Value> {
        let url = match self.endpoint(path) {
            Ok(url) => url,
            Err(e) => return future::ready(error_result(&e)).boxed_local(),
        };

        let mut request = Request::new(params.method, url.as_str());
        request.headers = params.headers;
        request.body = params.body;
        if params.method != Method::Get {
            request = request.with_default_header("Content-Type", &self.config.form_content_type);
        }

        let pending = self.serializer.enqueue(request);
        let path = path.to_string();
        async move {
            match pending.await.and_then(|response| response.json::<Value>()) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("API {} failed: {}", path, e);
                    error_result(&e)
                }
            }
        }
        .boxed_local()
    }

    /// Upload raw bytes with POST, in order with the other requests.
    ///
    /// `None` resolves at once to the "Invalid arg" error result and never
    /// reaches the transport.
    pub fn upload_file(&self, path: &str, file: Option<Vec<u8>>, options: UploadOptions) -> LocalBoxFuture<'static, Value> {
        let Some(file) = file else {
            return future::ready(error_result(NetError::InvalidArg)).boxed_local();
        };
        let url = match self.endpoint(path) {
            Ok(url) => url,
            Err(e) => return future::ready(error_result(&e)).boxed_local(),
        };

        let content_type = options
            .content_type
            .unwrap_or_else(|| self.config.upload_content_type.clone());
        let mut request = Request::post(url.as_str())
            .with_header("Content-Type", &content_type)
            .with_body(file);
        request.abort = options.abort;

        let pending = self.serializer.enqueue_upload(request, options.on_progress);
        let path = path.to_string();
        async move {
            match pending.await.and_then(|response| response.json::<Value>()) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("upload {} failed: {}", path, e);
                    error_result(upload_message(&e))
                }
            }
        }
        .boxed_local()
    }
}

/// Fixed messages for transport-level upload failures
fn upload_message(error: &NetError) -> String {
    match error {
        NetError::Network(_) => "Network error".to_string(),
        other => other.to_string(),
    }
}
