//! Transport seam
//!
//! The fetch-like primitive the serializer drives. Single-threaded, so
//! futures are not required to be `Send`.

use async_trait::async_trait;

use crate::{NetError, Request, Response};

/// Progress of one transfer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub loaded: u64,
    /// Known only when the size was announced
    pub total: Option<u64>,
}

impl ProgressEvent {
    pub fn new(loaded: u64, total: Option<u64>) -> Self {
        Self { loaded, total }
    }

    /// Whether `total` is known
    pub fn length_computable(&self) -> bool {
        self.total.is_some()
    }

    /// Completed fraction in `0.0..=1.0`, if computable
    pub fn fraction(&self) -> Option<f64> {
        match self.total {
            Some(0) => Some(1.0),
            Some(total) => Some((self.loaded as f64 / total as f64).min(1.0)),
            None => None,
        }
    }
}

/// Progress callback: `(event, is_upload_phase)`
pub type ProgressFn = dyn Fn(ProgressEvent, bool);

/// Issues a request and resolves to the full response
#[async_trait(?Send)]
pub trait Transport {
    async fn fetch(&self, request: Request) -> Result<Response, NetError>;

    /// Binary upload with optional progress reporting
    async fn upload(&self, request: Request, progress: Option<&ProgressFn>) -> Result<Response, NetError> {
        let _ = progress;
        self.fetch(request).await
    }
}
