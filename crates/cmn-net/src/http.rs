//! HTTP transport
//!
//! [`Transport`] backed by `reqwest`. reqwest needs a Tokio reactor, so each
//! transport owns a one-worker Tokio runtime and every exchange runs there.
//! The caller's executor only awaits the outcome and relays progress, which
//! arrives over a channel.
//!
//! Upload bodies are streamed in [`UPLOAD_CHUNK_SIZE`] pieces and progress
//! is reported as each piece is handed to the connection. Download progress
//! is reported per received chunk.

use std::sync::Arc;

use async_trait::async_trait;
use futures::channel::mpsc::{self, UnboundedSender};
use futures::future::{self, Abortable, Either};
use futures::StreamExt;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::{ApiConfig, NetError, ProgressEvent, ProgressFn, Request, Response, Transport};

/// Size of the pieces an upload body is streamed in
pub const UPLOAD_CHUNK_SIZE: usize = 16 * 1024;

/// `(event, is_upload_phase)` as sent from the runtime
type Progress = (ProgressEvent, bool);

/// Network transport over a shared `reqwest` client.
///
/// Must not be dropped from inside a Tokio runtime.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Option<std::time::Duration>,
    runtime: Arc<Runtime>,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, NetError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("cmn-http")
            .enable_all()
            .build()
            .map_err(|e| NetError::Network(e.to_string()))?;

        let client = {
            let _guard = runtime.enter();
            reqwest::Client::builder()
                .user_agent(config.user_agent.clone())
                .build()
                .map_err(map_error)?
        };

        Ok(Self {
            client,
            timeout: config.timeout(),
            runtime: Arc::new(runtime),
        })
    }

    /// Translate `request`, taking its body. With `progress`, the body is
    /// streamed and reports upload events.
    fn builder(
        &self,
        request: &mut Request,
        progress: Option<UnboundedSender<Progress>>,
    ) -> Result<reqwest::RequestBuilder, NetError> {
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|e| NetError::Network(e.to_string()))?;

        let mut builder = self.client.request(method, request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body.take() {
            builder = match progress {
                Some(sender) => builder
                    .header(reqwest::header::CONTENT_LENGTH, body.len().to_string())
                    .body(streamed_body(body, sender)),
                None => builder.body(body),
            };
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder)
    }

    async fn perform(&self, mut request: Request, progress: Option<&ProgressFn>) -> Result<Response, NetError> {
        let (sender, mut events) = mpsc::unbounded();
        let sender = progress.map(|_| sender);
        let builder = self.builder(&mut request, sender.clone())?;
        let mut task = AbortOnDrop(self.runtime.spawn(exchange(builder, request.url, sender)));

        let joined = loop {
            let next = match future::select(events.next(), &mut task.0).await {
                Either::Left((event, _)) => Either::Left(event),
                Either::Right((joined, _)) => Either::Right(joined),
            };
            match next {
                Either::Left(Some((event, upload))) => relay(progress, event, upload),
                Either::Left(None) => break (&mut task.0).await,
                Either::Right(joined) => break joined,
            }
        };
        while let Ok(Some((event, upload))) = events.try_next() {
            relay(progress, event, upload);
        }

        joined.unwrap_or_else(|e| Err(NetError::Network(format!("transfer task failed: {e}"))))
    }

    async fn run(&self, mut request: Request, progress: Option<&ProgressFn>) -> Result<Response, NetError> {
        match request.abort.take() {
            Some(registration) => Abortable::new(self.perform(request, progress), registration)
                .await
                .unwrap_or(Err(NetError::Aborted)),
            None => self.perform(request, progress).await,
        }
    }
}

/// Cancels the runtime task when the caller stops waiting, e.g. on abort
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

fn relay(progress: Option<&ProgressFn>, event: ProgressEvent, upload: bool) {
    if let Some(report) = progress {
        report(event, upload);
    }
}

fn streamed_body(body: Vec<u8>, progress: UnboundedSender<Progress>) -> reqwest::Body {
    let total = body.len() as u64;
    let chunks: Vec<Vec<u8>> = body.chunks(UPLOAD_CHUNK_SIZE).map(<[u8]>::to_vec).collect();
    let mut loaded = 0u64;

    let stream = futures::stream::iter(chunks).map(move |chunk| {
        loaded += chunk.len() as u64;
        let _ = progress.unbounded_send((ProgressEvent::new(loaded, Some(total)), true));
        Ok::<_, std::io::Error>(chunk)
    });
    reqwest::Body::wrap_stream(stream)
}

/// Runs on the transport's runtime
async fn exchange(
    builder: reqwest::RequestBuilder,
    url: String,
    progress: Option<UnboundedSender<Progress>>,
) -> Result<Response, NetError> {
    let mut response = builder.send().await.map_err(map_error)?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
        .collect();

    let total = response.content_length();
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(map_error)? {
        body.extend_from_slice(&chunk);
        if let Some(sender) = &progress {
            let _ = sender.unbounded_send((ProgressEvent::new(body.len() as u64, total), false));
        }
    }

    tracing::debug!("HTTP {} -> {} ({} bytes)", url, status, body.len());
    Ok(Response { status, headers, body })
}

fn map_error(e: reqwest::Error) -> NetError {
    if e.is_timeout() {
        NetError::Timeout
    } else if e.is_builder() {
        NetError::InvalidUrl(e.to_string())
    } else {
        NetError::Network(e.to_string())
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn fetch(&self, request: Request) -> Result<Response, NetError> {
        self.run(request, None).await
    }

    async fn upload(&self, request: Request, progress: Option<&ProgressFn>) -> Result<Response, NetError> {
        self.run(request, progress).await
    }
}
