//! Typed reply futures
//!
//! A facade call does its work (register and send, or run the fallback)
//! before returning. What it hands back is a [`Reply`]: either a value that
//! is already settled, or a pending registry entry plus the decoder that
//! turns the host's raw result into the operation's typed result.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::{debug, warn};

use crate::id::RequestId;
use crate::models::OperationResult;
use crate::registry::PendingReply;

enum ReplyState<T> {
    Settled(T),
    Waiting {
        pending: PendingReply,
        decode: fn(Value) -> T,
    },
    Done,
}

/// Result of a correlated facade operation.
#[must_use = "a Reply does nothing unless awaited; the request has already been sent"]
pub struct Reply<T> {
    state: ReplyState<T>,
}

impl<T> Reply<T> {
    pub(crate) fn settled(value: T) -> Self {
        Self {
            state: ReplyState::Settled(value),
        }
    }

    pub(crate) fn waiting(pending: PendingReply, decode: fn(Value) -> T) -> Self {
        Self {
            state: ReplyState::Waiting { pending, decode },
        }
    }

    /// Identifier of the in-flight request, if one was sent.
    pub fn request_id(&self) -> Option<&RequestId> {
        match &self.state {
            ReplyState::Waiting { pending, .. } => Some(pending.id()),
            _ => None,
        }
    }
}

impl<T> Unpin for Reply<T> {}

impl<T> Future for Reply<T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        let this = self.get_mut();
        match std::mem::replace(&mut this.state, ReplyState::Done) {
            ReplyState::Settled(value) => Poll::Ready(value),
            ReplyState::Waiting {
                mut pending,
                decode,
            } => match Pin::new(&mut pending).poll(cx) {
                Poll::Ready(raw) => Poll::Ready(decode(raw)),
                Poll::Pending => {
                    this.state = ReplyState::Waiting { pending, decode };
                    Poll::Pending
                }
            },
            ReplyState::Done => panic!("`Reply` polled after completion"),
        }
    }
}

impl<T> std::fmt::Debug for Reply<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            ReplyState::Settled(_) => "settled",
            ReplyState::Waiting { .. } => "waiting",
            ReplyState::Done => "done",
        };
        f.debug_struct("Reply")
            .field("state", &state)
            .field("request_id", &self.request_id())
            .finish()
    }
}

// =============================================================================
// Decoders
// =============================================================================

pub(crate) fn decode_raw(raw: Value) -> Option<Value> {
    match raw {
        Value::Null => None,
        value => Some(value),
    }
}

/// `null` or a non-list is absent. Rows are decoded one by one and a row
/// that does not decode is dropped without losing the rest.
pub(crate) fn decode_list<T: DeserializeOwned>(raw: Value) -> Option<Vec<T>> {
    let rows = match raw {
        Value::Null => return None,
        Value::Array(rows) => rows,
        _ => {
            warn!("Host returned a record list that is not an array");
            return None;
        }
    };

    let total = rows.len();
    let records: Vec<T> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(index, error = %err, "Skipping undecodable record");
                None
            }
        })
        .collect();

    if records.len() < total {
        debug!(kept = records.len(), total, "Record list decoded with skipped rows");
    }
    Some(records)
}

pub(crate) fn decode_optional_result(raw: Value) -> Option<OperationResult> {
    if raw.is_null() {
        return None;
    }
    match serde_json::from_value(raw) {
        Ok(result) => Some(result),
        Err(err) => {
            warn!(error = %err, "Host returned an undecodable result");
            None
        }
    }
}

/// File operations always produce a result; anything unusable is a failure.
pub(crate) fn decode_file_result(raw: Value) -> OperationResult {
    decode_optional_result(raw).unwrap_or_else(OperationResult::failed)
}
