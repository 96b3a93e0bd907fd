//! Response routing
//!
//! Every dispatched call registers a [`Continuation`] under a fresh
//! [`CallId`]. When the transport completes, it calls exactly one of the two
//! entry points, [`ResponseRouter::on_success`] or [`ResponseRouter::on_error`].
//! The entry removes the pending call and hands the continuation a tagged
//! [`Outcome`]. A call is routed at most once; later outcomes for the same id
//! are rejected with [`CcPaymentError::UnknownCall`].

use crate::types::ApiResponse;
use crate::{CcPaymentError, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::oneshot;
use tracing::{debug, warn};
use uuid::Uuid;

/// Identifies one dispatched call
pub type CallId = Uuid;

/// What a continuation receives: the decoded response or the failure
pub type Outcome = Result<ApiResponse>;

type Handler = Box<dyn FnOnce(Outcome) + Send + 'static>;

/// A caller-supplied handler bound to a single call
pub struct Continuation {
    name: String,
    handler: Handler,
}

impl Continuation {
    /// Create a continuation that receives both outcomes
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: FnOnce(Outcome) + Send + 'static,
    {
        Self {
            name: name.into(),
            handler: Box::new(handler),
        }
    }

    /// Create a continuation from separate success and error handlers
    pub fn split<S, E>(name: impl Into<String>, on_success: S, on_error: E) -> Self
    where
        S: FnOnce(ApiResponse) + Send + 'static,
        E: FnOnce(CcPaymentError) + Send + 'static,
    {
        Self::new(name, move |outcome| match outcome {
            Ok(response) => on_success(response),
            Err(error) => on_error(error),
        })
    }

    /// Create a continuation that forwards its outcome to a oneshot receiver
    pub fn channel(name: impl Into<String>) -> (Self, oneshot::Receiver<Outcome>) {
        let (tx, rx) = oneshot::channel();
        let continuation = Self::new(name, move |outcome| {
            // The receiver may have been dropped; nobody is waiting then.
            let _ = tx.send(outcome);
        });
        (continuation, rx)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn invoke(self, outcome: Outcome) {
        (self.handler)(outcome)
    }
}

impl fmt::Debug for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation")
            .field("name", &self.name)
            .field("handler", &"<function>")
            .finish()
    }
}

/// Maps pending calls to their continuations
#[derive(Default)]
pub struct ResponseRouter {
    pending: Mutex<HashMap<CallId, Continuation>>,
}

impl fmt::Debug for ResponseRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseRouter")
            .field("pending", &self.pending_calls())
            .finish()
    }
}

impl ResponseRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a continuation and return the id of its pending call
    pub fn register(&self, continuation: Continuation) -> CallId {
        let call_id = Uuid::new_v4();
        debug!(%call_id, continuation = continuation.name(), "registered pending call");
        self.lock().insert(call_id, continuation);
        call_id
    }

    /// Number of calls still waiting for an outcome
    pub fn pending_calls(&self) -> usize {
        self.lock().len()
    }

    /// Whether `call_id` is still waiting for an outcome
    pub fn is_pending(&self, call_id: &CallId) -> bool {
        self.lock().contains_key(call_id)
    }

    /// Success entry point: decode `payload` and route it.
    ///
    /// A payload that is not valid JSON is routed to the same continuation
    /// as a decoding error.
    pub fn on_success(&self, call_id: CallId, payload: &str) -> Result<()> {
        let continuation = self.take(call_id)?;

        let outcome = ApiResponse::from_json(payload).map_err(|e| {
            warn!(%call_id, continuation = continuation.name(), error = %e, "failed to decode response");
            CcPaymentError::decoding(e.to_string(), payload)
        });

        debug!(%call_id, continuation = continuation.name(), ok = outcome.is_ok(), "routing response");
        continuation.invoke(outcome);
        Ok(())
    }

    /// Error entry point: route the raw error payload as a transport error
    pub fn on_error(&self, call_id: CallId, status: Option<u16>, payload: &str) -> Result<()> {
        let continuation = self.take(call_id)?;

        warn!(%call_id, continuation = continuation.name(), ?status, "call failed");
        continuation.invoke(Err(CcPaymentError::transport(status, payload)));
        Ok(())
    }

    /// Drop a pending call without invoking its continuation
    pub fn forget(&self, call_id: &CallId) -> bool {
        self.lock().remove(call_id).is_some()
    }

    fn take(&self, call_id: CallId) -> Result<Continuation> {
        self.lock().remove(&call_id).ok_or_else(|| {
            warn!(%call_id, "outcome for a call that is not pending");
            CcPaymentError::UnknownCall { call_id }
        })
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CallId, Continuation>> {
        match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
