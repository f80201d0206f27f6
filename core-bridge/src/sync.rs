//! Startup synchronization
//!
//! On launch inside a native host the page pulls the host's records and
//! replaces its local copies, with one asymmetry: an empty transaction list
//! never wipes local transactions, while any partner list (even empty) does
//! replace local partners.

use tracing::info;

use crate::bridge::NativeBridge;
use crate::models::{Partner, Transaction};

/// Records the page should adopt. `None` means keep local state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncSnapshot {
    pub transactions: Option<Vec<Transaction>>,
    pub partners: Option<Vec<Partner>>,
}

impl SyncSnapshot {
    /// Apply the replacement rules to raw fetch results.
    pub fn from_fetched(
        transactions: Option<Vec<Transaction>>,
        partners: Option<Vec<Partner>>,
    ) -> Self {
        Self {
            transactions: transactions.filter(|records| !records.is_empty()),
            partners,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_none() && self.partners.is_none()
    }
}

impl NativeBridge {
    /// Fetch transactions, then partners, from the host.
    ///
    /// Returns `None` without sending anything when no native host is present.
    pub async fn sync_on_startup(&self) -> Option<SyncSnapshot> {
        if !self.is_native_host_available() {
            return None;
        }

        let transactions = self.get_transactions().await;
        let partners = self.get_partners().await;
        let snapshot = SyncSnapshot::from_fetched(transactions, partners);

        info!(
            transactions = snapshot.transactions.as_ref().map_or(0, Vec::len),
            partners = snapshot.partners.as_ref().map_or(0, Vec::len),
            "Startup sync finished"
        );
        Some(snapshot)
    }
}
