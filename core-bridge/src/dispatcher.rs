//! # Inbound Dispatch
//!
//! One [`MessageDispatcher`] is subscribed to every inbound channel. For each
//! physical event it:
//!
//! 1. drops the event if its key was already seen on another channel,
//! 2. decodes JSON text (undecodable text is dropped silently),
//! 3. resolves the matching request when the envelope carries a string `id`,
//! 4. handles `GO_BACK` / `THEME_CHANGED` when the envelope carries a known
//!    `type`.
//!
//! Steps 3 and 4 are independent. Nothing here returns an error to the
//! platform.

use bridge_traits::{ColorScheme, InboundData, InboundMessage, InboundSink};
use serde_json::Value;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, trace};

use crate::id::RequestId;
use crate::navigation::{BackAction, BackNavigator};
use crate::protocol::{InboundEnvelope, Notification};
use crate::registry::CorrelationRegistry;
use crate::theme::ThemeState;

/// What a dispatched event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Delivered to the waiting request
    Resolved(RequestId),
    /// Carried an id nobody is waiting for
    Unmatched(RequestId),
    /// Handled a host notification
    Notification(NotificationOutcome),
    /// Same physical event already processed via another channel
    Duplicate,
    /// Text that is not JSON
    Malformed,
    /// Valid JSON with nothing to act on
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOutcome {
    Back(BackAction),
    ThemeChanged {
        scheme: Option<ColorScheme>,
        reapplied: bool,
    },
}

/// Bounded memory of recently processed event keys.
#[derive(Debug)]
struct RecentEvents {
    capacity: usize,
    order: VecDeque<u64>,
    seen: HashSet<u64>,
}

impl RecentEvents {
    fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            order: VecDeque::new(),
            seen: HashSet::new(),
        }
    }

    /// Record `key`; false if it was already present.
    fn insert(&mut self, key: u64) -> bool {
        if !self.seen.insert(key) {
            return false;
        }
        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.seen.remove(&evicted);
            }
        }
        true
    }
}

pub struct MessageDispatcher {
    registry: Arc<CorrelationRegistry>,
    navigator: Arc<BackNavigator>,
    theme: Arc<ThemeState>,
    recent: Mutex<RecentEvents>,
}

impl MessageDispatcher {
    pub fn new(
        registry: Arc<CorrelationRegistry>,
        navigator: Arc<BackNavigator>,
        theme: Arc<ThemeState>,
        dedup_window: usize,
    ) -> Self {
        Self {
            registry,
            navigator,
            theme,
            recent: Mutex::new(RecentEvents::new(dedup_window)),
        }
    }

    pub fn dispatch(&self, message: InboundMessage) -> DispatchOutcome {
        if let Some(key) = message.event_key {
            let first_sighting = self
                .recent
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(key);
            if !first_sighting {
                trace!(event_key = key, "Event already dispatched");
                return DispatchOutcome::Duplicate;
            }
        }

        let value = match message.data {
            InboundData::Structured(value) => value,
            InboundData::Text(text) => match serde_json::from_str::<Value>(&text) {
                Ok(value) => value,
                Err(err) => {
                    trace!(error = %err, bytes = text.len(), "Ignoring non-JSON message");
                    return DispatchOutcome::Malformed;
                }
            },
        };

        let envelope = InboundEnvelope::from_value(value);

        let reply_outcome = envelope.reply.map(|(id, result)| {
            if self.registry.resolve(&id, result) {
                debug!(request_id = %id, "Resolved request");
                DispatchOutcome::Resolved(id)
            } else {
                DispatchOutcome::Unmatched(id)
            }
        });

        let notification_outcome = envelope
            .notification
            .map(|notification| DispatchOutcome::Notification(self.notify(notification)));

        match (reply_outcome, notification_outcome) {
            (Some(reply), _) => reply,
            (None, Some(notification)) => notification,
            (None, None) => DispatchOutcome::Ignored,
        }
    }

    fn notify(&self, notification: Notification) -> NotificationOutcome {
        match notification {
            Notification::GoBack => NotificationOutcome::Back(self.navigator.handle_back()),
            Notification::ThemeChanged { scheme, raw } => NotificationOutcome::ThemeChanged {
                scheme,
                reapplied: self.theme.on_system_scheme_changed(scheme, raw.as_deref()),
            },
        }
    }
}

impl InboundSink for MessageDispatcher {
    fn on_message(&self, message: InboundMessage) {
        self.dispatch(message);
    }
}

impl std::fmt::Debug for MessageDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageDispatcher")
            .field("pending", &self.registry.pending_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_events_evicts_oldest() {
        let mut recent = RecentEvents::new(2);
        assert!(recent.insert(1));
        assert!(recent.insert(2));
        assert!(!recent.insert(1));
        assert!(recent.insert(3));
        // 1 fell out of the window
        assert!(recent.insert(1));
        assert!(!recent.insert(3));
    }

    #[test]
    fn test_zero_capacity_still_remembers_last_event() {
        let mut recent = RecentEvents::new(0);
        assert!(recent.insert(5));
        assert!(!recent.insert(5));
    }
}
