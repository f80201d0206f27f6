//! Records exchanged with the native host
//!
//! These are the typed views of what travels in `SAVE_*` payloads and in the
//! host's results. Every record keeps fields it does not know about in
//! `extra`, so a newer host or page can round-trip data through an older
//! bridge without losing anything.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// =============================================================================
// ID Types
// =============================================================================

/// Identifier of a transaction or partner.
///
/// The page mints numeric ids (`Date.now()`) while the native database hands
/// them back as text, so both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Text(String::new())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Text(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

// =============================================================================
// Records
// =============================================================================

/// A sale or purchase entry.
///
/// Monetary fields are in the base currency; `currency` names the display
/// currency at the time of entry. Host rows may carry `null` for any column,
/// so text and flag fields read `null` as empty and numeric fields stay
/// unset rather than defaulting to zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: RecordId,
    /// `"sale"`, `"purchase"`, ...
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price_base: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_base: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_credit: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_amount_base: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_fully_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    /// Units sold or bought; a missing quantity counts as one.
    pub fn quantity_or_one(&self) -> f64 {
        self.quantity.unwrap_or(1.0)
    }

    /// Amount still owed on a credit sale.
    pub fn outstanding_base(&self) -> f64 {
        if !self.is_credit || self.is_fully_paid {
            return 0.0;
        }
        let amount = self.amount_base.unwrap_or(0.0);
        let paid = self.paid_amount_base.unwrap_or(0.0);
        (amount - paid).max(0.0)
    }
}

/// A business partner and their profit share.
///
/// The host stores partners saved without an id or name as they are, so
/// every field is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Share of profit, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Read an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// =============================================================================
// Operation payloads and results
// =============================================================================

/// File handed to the host for saving or sharing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSave {
    pub file_name: String,
    pub content: String,
    /// Omitted from the payload when unset; the host infers it from the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl FileSave {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Local notification reminding the user of an unpaid credit sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtReminder {
    /// When to fire, Unix milliseconds
    pub timestamp: i64,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<RecordId>,
}

/// Record counts reported after an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportCounts {
    #[serde(default)]
    pub partners: u64,
    #[serde(default)]
    pub transactions: u64,
}

/// Typed view of a host result payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// File contents returned by `PICK_FILE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<ImportCounts>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OperationResult {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn failed() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
