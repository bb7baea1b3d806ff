//! Request Serializer
//!
//! Keeps a handle to the last scheduled operation. Every new operation is
//! chained behind it and starts only after it settled, whatever the
//! outcome, so transports see requests one at a time in call order.
//!
//! The position in the chain is taken when `enqueue` is called, not when
//! the returned future is first polled. Each step is a [`Shared`] future:
//! whoever polls a later step also drives the earlier ones, so a caller
//! dropping its future never stalls the requests behind it.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::future::{self, LocalBoxFuture, Shared};
use futures::FutureExt;

use crate::{NetError, ProgressFn, Request, Response, Transport};

/// Handle to one scheduled operation's outcome; cloneable, poll from anywhere
pub type Pending<T> = Shared<LocalBoxFuture<'static, T>>;

type Tail = Pending<()>;

/// Issues requests through a [`Transport`] strictly one after another
#[derive(Clone)]
pub struct RequestSerializer {
    transport: Rc<dyn Transport>,
    last: Rc<RefCell<Tail>>,
}

impl RequestSerializer {
    pub fn new(transport: Rc<dyn Transport>) -> Self {
        Self {
            transport,
            last: Rc::new(RefCell::new(future::ready(()).boxed_local().shared())),
        }
    }

    pub fn transport(&self) -> &Rc<dyn Transport> {
        &self.transport
    }

    /// Run `op` once everything scheduled before it has settled.
    ///
    /// The returned future resolves to `op`'s own output.
    pub fn after_settled<T, F, Fut>(&self, op: F) -> Pending<T>
    where
        T: Clone + 'static,
        F: FnOnce() -> Fut + 'static,
        Fut: Future<Output = T> + 'static,
    {
        let mut last = self.last.borrow_mut();
        let prev = last.clone();
        let step = async move {
            prev.await;
            op().await
        }
        .boxed_local()
        .shared();
        *last = step.clone().map(|_| ()).boxed_local().shared();
        step
    }

    /// Queue a request behind every earlier one
    pub fn enqueue(&self, request: Request) -> Pending<Result<Response, NetError>> {
        let transport = Rc::clone(&self.transport);
        self.after_settled(move || async move {
            tracing::info!("HTTP {} {}", request.method.as_str(), request.url);
            transport.fetch(request).await
        })
    }

    /// Queue an upload behind every earlier request
    pub fn enqueue_upload(
        &self,
        request: Request,
        progress: Option<Rc<ProgressFn>>,
    ) -> Pending<Result<Response, NetError>> {
        let transport = Rc::clone(&self.transport);
        self.after_settled(move || async move {
            tracing::info!("HTTP upload {} {}", request.method.as_str(), request.url);
            transport.upload(request, progress.as_deref()).await
        })
    }
}

impl std::fmt::Debug for RequestSerializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSerializer").finish_non_exhaustive()
    }
}
