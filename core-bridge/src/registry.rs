//! # Correlation Registry
//!
//! Maps each in-flight [`RequestId`] to the caller waiting for its reply.
//!
//! - An entry is created by [`CorrelationRegistry::register`] and removed by
//!   the first matching [`CorrelationRegistry::resolve`]; later replies with
//!   the same id find nothing and are dropped.
//! - Entries are never expired. A host that never answers leaves its waiter
//!   suspended; [`CorrelationRegistry::pending_count`] makes that visible.
//! - If the registry is dropped with waiters outstanding, each
//!   [`PendingReply`] settles with `null`.

use futures::channel::oneshot;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::id::RequestId;

type Waiters = HashMap<RequestId, oneshot::Sender<Value>>;

/// Table of requests awaiting a reply.
#[derive(Debug, Default)]
pub struct CorrelationRegistry {
    waiters: Mutex<Waiters>,
}

impl CorrelationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn waiters(&self) -> MutexGuard<'_, Waiters> {
        // The map stays consistent across a panicking holder: every critical
        // section is a single insert or remove.
        self.waiters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a waiter for `id`.
    ///
    /// Fails with [`Error::DuplicateRequestId`] if `id` is already pending;
    /// the existing waiter is left untouched.
    pub fn register(&self, id: RequestId) -> Result<PendingReply> {
        let mut waiters = self.waiters();
        if waiters.contains_key(&id) {
            return Err(Error::DuplicateRequestId(id));
        }

        let (sender, receiver) = oneshot::channel();
        waiters.insert(id.clone(), sender);
        trace!(request_id = %id, pending = waiters.len(), "Registered waiter");

        Ok(PendingReply { id, receiver })
    }

    /// Deliver `result` to the waiter for `id` and forget it.
    ///
    /// Returns `false` when no such waiter exists.
    pub fn resolve(&self, id: &RequestId, result: Value) -> bool {
        let Some(sender) = self.waiters().remove(id) else {
            debug!(request_id = %id, "Reply has no pending request");
            return false;
        };

        if sender.send(result).is_err() {
            debug!(request_id = %id, "Caller stopped waiting before the reply arrived");
        }
        true
    }

    pub fn pending_count(&self) -> usize {
        self.waiters().len()
    }

    pub fn is_pending(&self, id: &RequestId) -> bool {
        self.waiters().contains_key(id)
    }
}

/// Future side of a registry entry. Yields the raw reply value.
#[derive(Debug)]
pub struct PendingReply {
    id: RequestId,
    receiver: oneshot::Receiver<Value>,
}

impl PendingReply {
    pub fn id(&self) -> &RequestId {
        &self.id
    }
}

impl Future for PendingReply {
    type Output = Value;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(value)) => Poll::Ready(value),
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Value::Null),
            Poll::Pending => Poll::Pending,
        }
    }
}
