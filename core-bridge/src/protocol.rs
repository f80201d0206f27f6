//! # Wire Protocol
//!
//! Message framing between the document and the native host.
//!
//! ## Outbound
//!
//! ```text
//! { "id"?: string, "type": OperationTag, "payload": object }
//! ```
//!
//! `id` is present exactly for correlated operations. The split is encoded in
//! the types: [`Request::Correlated`] always carries a [`RequestId`] and a
//! [`CorrelatedOp`], [`Request::OneShot`] never does.
//!
//! ## Inbound
//!
//! ```text
//! { "id": string, "result": any }          reply to a correlated request
//! { "type": "GO_BACK" }                     hardware back pressed
//! { "type": "THEME_CHANGED", "payload": "light" | "dark" | ... }
//! ```
//!
//! The `id` and `type` checks are independent: an envelope carrying both is
//! treated as a reply and as a notification.

use bridge_traits::ColorScheme;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

use crate::id::RequestId;
use crate::models::{DebtReminder, FileSave, RecordId};

// =============================================================================
// Operation tags
// =============================================================================

/// Discriminator of an outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationTag {
    GetTransactions,
    SaveTransaction,
    DeleteTransaction,
    GetPartners,
    SavePartner,
    DeletePartner,
    SaveFile,
    PickFile,
    OpenExternal,
    ExitApp,
    ClearAllData,
    ImportData,
    ShareText,
    ScheduleDebtReminder,
    CancelDebtReminder,
}

impl OperationTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationTag::GetTransactions => "GET_TRANSACTIONS",
            OperationTag::SaveTransaction => "SAVE_TRANSACTION",
            OperationTag::DeleteTransaction => "DELETE_TRANSACTION",
            OperationTag::GetPartners => "GET_PARTNERS",
            OperationTag::SavePartner => "SAVE_PARTNER",
            OperationTag::DeletePartner => "DELETE_PARTNER",
            OperationTag::SaveFile => "SAVE_FILE",
            OperationTag::PickFile => "PICK_FILE",
            OperationTag::OpenExternal => "OPEN_EXTERNAL",
            OperationTag::ExitApp => "EXIT_APP",
            OperationTag::ClearAllData => "CLEAR_ALL_DATA",
            OperationTag::ImportData => "IMPORT_DATA",
            OperationTag::ShareText => "SHARE_TEXT",
            OperationTag::ScheduleDebtReminder => "SCHEDULE_DEBT_REMINDER",
            OperationTag::CancelDebtReminder => "CANCEL_DEBT_REMINDER",
        }
    }

    /// Whether the host answers this operation with a reply.
    pub fn expects_reply(&self) -> bool {
        !matches!(self, OperationTag::OpenExternal | OperationTag::ExitApp)
    }
}

impl fmt::Display for OperationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Operation answered by exactly one reply.
///
/// Saved records are carried as the caller's JSON object and go out
/// untouched, including fields this crate has no model for.
#[derive(Debug, Clone, PartialEq)]
pub enum CorrelatedOp {
    GetTransactions,
    SaveTransaction(Map<String, Value>),
    DeleteTransaction(RecordId),
    GetPartners,
    SavePartner(Map<String, Value>),
    DeletePartner(RecordId),
    SaveFile(FileSave),
    PickFile,
    ClearAllData,
    ImportData { content: String },
    ShareText { title: String, text: String },
    ScheduleDebtReminder(DebtReminder),
    CancelDebtReminder { reminder_id: String },
}

impl CorrelatedOp {
    pub fn tag(&self) -> OperationTag {
        match self {
            CorrelatedOp::GetTransactions => OperationTag::GetTransactions,
            CorrelatedOp::SaveTransaction(_) => OperationTag::SaveTransaction,
            CorrelatedOp::DeleteTransaction(_) => OperationTag::DeleteTransaction,
            CorrelatedOp::GetPartners => OperationTag::GetPartners,
            CorrelatedOp::SavePartner(_) => OperationTag::SavePartner,
            CorrelatedOp::DeletePartner(_) => OperationTag::DeletePartner,
            CorrelatedOp::SaveFile(_) => OperationTag::SaveFile,
            CorrelatedOp::PickFile => OperationTag::PickFile,
            CorrelatedOp::ClearAllData => OperationTag::ClearAllData,
            CorrelatedOp::ImportData { .. } => OperationTag::ImportData,
            CorrelatedOp::ShareText { .. } => OperationTag::ShareText,
            CorrelatedOp::ScheduleDebtReminder(_) => OperationTag::ScheduleDebtReminder,
            CorrelatedOp::CancelDebtReminder { .. } => OperationTag::CancelDebtReminder,
        }
    }

    pub fn payload(&self) -> serde_json::Result<Value> {
        let payload = match self {
            CorrelatedOp::GetTransactions
            | CorrelatedOp::GetPartners
            | CorrelatedOp::PickFile
            | CorrelatedOp::ClearAllData => empty_object(),
            CorrelatedOp::SaveTransaction(record) | CorrelatedOp::SavePartner(record) => {
                Value::Object(record.clone())
            }
            CorrelatedOp::DeleteTransaction(id) | CorrelatedOp::DeletePartner(id) => {
                json!({ "id": id })
            }
            CorrelatedOp::SaveFile(file) => serde_json::to_value(file)?,
            CorrelatedOp::ImportData { content } => json!({ "content": content }),
            CorrelatedOp::ShareText { title, text } => json!({ "title": title, "text": text }),
            CorrelatedOp::ScheduleDebtReminder(reminder) => serde_json::to_value(reminder)?,
            CorrelatedOp::CancelDebtReminder { reminder_id } => json!({ "id": reminder_id }),
        };
        Ok(payload)
    }
}

/// Operation with no reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneShotOp {
    OpenExternal { url: String },
    ExitApp,
}

impl OneShotOp {
    pub fn tag(&self) -> OperationTag {
        match self {
            OneShotOp::OpenExternal { .. } => OperationTag::OpenExternal,
            OneShotOp::ExitApp => OperationTag::ExitApp,
        }
    }

    pub fn payload(&self) -> Value {
        match self {
            OneShotOp::OpenExternal { url } => json!({ "url": url }),
            OneShotOp::ExitApp => empty_object(),
        }
    }
}

/// A typed outbound request.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Correlated { id: RequestId, op: CorrelatedOp },
    OneShot(OneShotOp),
}

impl Request {
    pub fn id(&self) -> Option<&RequestId> {
        match self {
            Request::Correlated { id, .. } => Some(id),
            Request::OneShot(_) => None,
        }
    }

    pub fn tag(&self) -> OperationTag {
        match self {
            Request::Correlated { op, .. } => op.tag(),
            Request::OneShot(op) => op.tag(),
        }
    }

    pub fn to_envelope(&self) -> serde_json::Result<OutboundEnvelope> {
        let payload = match self {
            Request::Correlated { op, .. } => op.payload()?,
            Request::OneShot(op) => op.payload(),
        };

        Ok(OutboundEnvelope {
            id: self.id().cloned(),
            tag: self.tag(),
            payload,
        })
    }

    /// Encode as the JSON text handed to the native transport.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.to_envelope()?)
    }
}

/// Serialized form of a [`Request`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
    #[serde(rename = "type")]
    pub tag: OperationTag,
    pub payload: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

// =============================================================================
// Inbound
// =============================================================================

/// Unsolicited message from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    GoBack,
    /// New system color scheme. `scheme` is `None` when the host sent
    /// something unrecognized; `raw` keeps the payload text as sent.
    ThemeChanged {
        scheme: Option<ColorScheme>,
        raw: Option<String>,
    },
}

/// Decoded inbound message.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InboundEnvelope {
    /// `(id, result)` when the message carries a string `id`
    pub reply: Option<(RequestId, Value)>,
    pub notification: Option<Notification>,
}

impl InboundEnvelope {
    /// Classify a decoded JSON value. Non-objects classify as empty.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };

        let notification = match fields.get("type").and_then(Value::as_str) {
            Some("GO_BACK") => Some(Notification::GoBack),
            Some("THEME_CHANGED") => {
                let raw = fields
                    .get("payload")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Some(Notification::ThemeChanged {
                    scheme: raw.as_deref().and_then(|name| name.parse().ok()),
                    raw,
                })
            }
            _ => None,
        };

        let reply = match fields.get("id") {
            Some(Value::String(id)) => {
                let id = RequestId::from(id.as_str());
                let result = fields.remove("result").unwrap_or(Value::Null);
                Some((id, result))
            }
            _ => None,
        };

        Self {
            reply,
            notification,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reply.is_none() && self.notification.is_none()
    }
}
