//! Transport adapter
//!
//! Owns the single outbound primitive. Sending never fails from the caller's
//! point of view: without a native host the message is dropped, and encoding
//! or platform errors are logged and swallowed.

use bridge_traits::{HostEnvironment, NativeTransport};
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::protocol::Request;

pub struct TransportAdapter {
    transport: Option<Arc<dyn NativeTransport>>,
    environment: Arc<dyn HostEnvironment>,
}

impl TransportAdapter {
    pub fn new(
        transport: Option<Arc<dyn NativeTransport>>,
        environment: Arc<dyn HostEnvironment>,
    ) -> Self {
        Self {
            transport,
            environment,
        }
    }

    /// True when a transport is wired and the environment reports a host.
    pub fn is_native_host_available(&self) -> bool {
        self.transport.is_some() && self.environment.is_native_host_available()
    }

    fn active_transport(&self) -> Option<&Arc<dyn NativeTransport>> {
        self.transport
            .as_ref()
            .filter(|_| self.environment.is_native_host_available())
    }

    /// Serialize `request` and hand it to the host.
    pub fn send(&self, request: &Request) {
        let Some(transport) = self.active_transport() else {
            debug!(op = %request.tag(), "No native host; message not sent");
            return;
        };

        let message = match request.to_json() {
            Ok(message) => message,
            Err(err) => {
                warn!(op = %request.tag(), error = %err, "Failed to encode request");
                return;
            }
        };

        trace!(
            op = %request.tag(),
            request_id = request.id().map(|id| id.as_str()).unwrap_or("-"),
            bytes = message.len(),
            "Posting message to native host"
        );

        if let Err(err) = transport.post_message(&message) {
            warn!(op = %request.tag(), error = %err, "Native host rejected message");
        }
    }
}

impl std::fmt::Debug for TransportAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportAdapter")
            .field("has_transport", &self.transport.is_some())
            .finish()
    }
}
