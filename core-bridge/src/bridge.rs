//! # Operation Facade
//!
//! [`NativeBridge`] is the only surface the application calls. Each method
//! maps to one operation tag and hides correlation and transport:
//!
//! ```ignore
//! let transactions = bridge.get_transactions().await;   // Option<Vec<Transaction>>
//! let saved = bridge.save_file("backup.json", json).await; // OperationResult
//! bridge.open_external("https://example.com");            // fire and forget
//! ```
//!
//! Correlated methods register a waiter and post the request before they
//! return, so requests reach the host in call order even if the returned
//! [`Reply`]s are awaited later or not at all. Without a native host the
//! fallback runs instead and the `Reply` is already settled.
//!
//! Records passed to the `save_*` methods are sent exactly as they
//! serialize; nothing is filled in on the way to the host.

use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::fallback::FallbackStrategies;
use crate::id::RequestIdGenerator;
use crate::models::{DebtReminder, FileSave, OperationResult, Partner, RecordId, Transaction};

/// Id draws allowed before a request is given up as unsendable.
const MAX_ID_ATTEMPTS: usize = 16;
use crate::protocol::{CorrelatedOp, OneShotOp, Request};
use crate::registry::{CorrelationRegistry, PendingReply};
use crate::reply::{decode_file_result, decode_list, decode_optional_result, Reply};
use crate::transport::TransportAdapter;

pub struct NativeBridge {
    transport: TransportAdapter,
    registry: Arc<CorrelationRegistry>,
    ids: RequestIdGenerator,
    fallback: FallbackStrategies,
}

impl NativeBridge {
    pub fn new(
        transport: TransportAdapter,
        registry: Arc<CorrelationRegistry>,
        ids: RequestIdGenerator,
        fallback: FallbackStrategies,
    ) -> Self {
        Self {
            transport,
            registry,
            ids,
            fallback,
        }
    }

    pub fn is_native_host_available(&self) -> bool {
        self.transport.is_native_host_available()
    }

    pub fn registry(&self) -> &Arc<CorrelationRegistry> {
        &self.registry
    }

    /// Number of requests still waiting for the host.
    pub fn pending_requests(&self) -> usize {
        self.registry.pending_count()
    }

    // =========================================================================
    // Records
    // =========================================================================

    pub fn get_transactions(&self) -> Reply<Option<Vec<Transaction>>> {
        self.correlated(
            CorrelatedOp::GetTransactions,
            || None,
            decode_list::<Transaction>,
        )
    }

    /// Insert or update a transaction. `record` may be a [`Transaction`] or
    /// any value serializing to a JSON object, such as the page's own record.
    pub fn save_transaction(&self, record: impl Serialize) -> Reply<Option<OperationResult>> {
        let Some(fields) = record_fields(&record) else {
            return Reply::settled(None);
        };
        self.correlated(
            CorrelatedOp::SaveTransaction(fields),
            || None,
            decode_optional_result,
        )
    }

    pub fn delete_transaction(&self, id: impl Into<RecordId>) -> Reply<Option<OperationResult>> {
        self.correlated(
            CorrelatedOp::DeleteTransaction(id.into()),
            || None,
            decode_optional_result,
        )
    }

    pub fn get_partners(&self) -> Reply<Option<Vec<Partner>>> {
        self.correlated(CorrelatedOp::GetPartners, || None, decode_list::<Partner>)
    }

    pub fn save_partner(&self, record: impl Serialize) -> Reply<Option<OperationResult>> {
        let Some(fields) = record_fields(&record) else {
            return Reply::settled(None);
        };
        self.correlated(
            CorrelatedOp::SavePartner(fields),
            || None,
            decode_optional_result,
        )
    }

    pub fn delete_partner(&self, id: impl Into<RecordId>) -> Reply<Option<OperationResult>> {
        self.correlated(
            CorrelatedOp::DeletePartner(id.into()),
            || None,
            decode_optional_result,
        )
    }

    // =========================================================================
    // Files
    // =========================================================================

    /// Save `content` under `file_name`; the host picks the MIME type.
    pub fn save_file(
        &self,
        file_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Reply<OperationResult> {
        self.save_file_with(FileSave::new(file_name, content))
    }

    pub fn save_file_with(&self, file: FileSave) -> Reply<OperationResult> {
        if !self.is_native_host_available() {
            return Reply::settled(self.fallback.save_file(&file));
        }
        self.send_correlated(CorrelatedOp::SaveFile(file), decode_file_result)
    }

    /// Ask the host to let the user pick a file; `content` holds its text.
    pub fn pick_file(&self) -> Reply<OperationResult> {
        self.correlated(
            CorrelatedOp::PickFile,
            || self.fallback.pick_file(),
            decode_file_result,
        )
    }

    // =========================================================================
    // Data management and reminders
    // =========================================================================

    pub fn clear_all_data(&self) -> Reply<Option<OperationResult>> {
        self.correlated(CorrelatedOp::ClearAllData, || None, decode_optional_result)
    }

    /// Replace the host's records with an exported backup.
    pub fn import_data(&self, content: impl Into<String>) -> Reply<Option<OperationResult>> {
        self.correlated(
            CorrelatedOp::ImportData {
                content: content.into(),
            },
            || None,
            decode_optional_result,
        )
    }

    pub fn share_text(
        &self,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Reply<Option<OperationResult>> {
        self.correlated(
            CorrelatedOp::ShareText {
                title: title.into(),
                text: text.into(),
            },
            || None,
            decode_optional_result,
        )
    }

    /// On success the result carries the host's `reminderId`.
    pub fn schedule_debt_reminder(&self, reminder: DebtReminder) -> Reply<Option<OperationResult>> {
        self.correlated(
            CorrelatedOp::ScheduleDebtReminder(reminder),
            || None,
            decode_optional_result,
        )
    }

    pub fn cancel_debt_reminder(
        &self,
        reminder_id: impl Into<String>,
    ) -> Reply<Option<OperationResult>> {
        self.correlated(
            CorrelatedOp::CancelDebtReminder {
                reminder_id: reminder_id.into(),
            },
            || None,
            decode_optional_result,
        )
    }

    // =========================================================================
    // Fire and forget
    // =========================================================================

    pub fn open_external(&self, url: &str) {
        if self.is_native_host_available() {
            self.transport.send(&Request::OneShot(OneShotOp::OpenExternal {
                url: url.to_string(),
            }));
        } else {
            self.fallback.open_external(url);
        }
    }

    /// Ask the host to close the app. Does nothing in a browser.
    pub fn exit_app(&self) {
        if self.is_native_host_available() {
            self.transport.send(&Request::OneShot(OneShotOp::ExitApp));
        } else {
            debug!("No native host; exit request ignored");
        }
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    pub(crate) fn correlated<T>(
        &self,
        op: CorrelatedOp,
        fallback: impl FnOnce() -> T,
        decode: fn(Value) -> T,
    ) -> Reply<T> {
        if !self.is_native_host_available() {
            debug!(op = %op.tag(), "No native host; using fallback");
            return Reply::settled(fallback());
        }
        self.send_correlated(op, decode)
    }

    #[instrument(level = "debug", skip_all, fields(op = %op.tag()))]
    fn send_correlated<T>(&self, op: CorrelatedOp, decode: fn(Value) -> T) -> Reply<T> {
        let Some(pending) = self.register_fresh() else {
            return Reply::settled(decode(Value::Null));
        };
        self.transport.send(&Request::Correlated {
            id: pending.id().clone(),
            op,
        });
        Reply::waiting(pending, decode)
    }

    fn register_fresh(&self) -> Option<PendingReply> {
        for _ in 0..MAX_ID_ATTEMPTS {
            match self.registry.register(self.ids.next_id()) {
                Ok(pending) => return Some(pending),
                Err(err) => debug!(error = %err, "Drawing a fresh request id"),
            }
        }
        warn!(
            attempts = MAX_ID_ATTEMPTS,
            "Every drawn request id is in flight; request not sent"
        );
        None
    }
}

fn record_fields(record: &impl Serialize) -> Option<Map<String, Value>> {
    match serde_json::to_value(record) {
        Ok(Value::Object(fields)) => Some(fields),
        Ok(_) => {
            warn!("Record to save is not a JSON object");
            None
        }
        Err(err) => {
            warn!(error = %err, "Record to save could not be serialized");
            None
        }
    }
}

impl std::fmt::Debug for NativeBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeBridge")
            .field("transport", &self.transport)
            .field("pending", &self.registry.pending_count())
            .finish_non_exhaustive()
    }
}
