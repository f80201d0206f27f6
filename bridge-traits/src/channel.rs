//! Inbound Message Channels
//!
//! A WebView host may deliver messages to the document through more than one
//! event source (Android delivers on `document`, iOS on `window`). Each source
//! is modelled as an [`InboundChannel`]; the bridge subscribes the same
//! [`InboundSink`] to every channel and deduplicates physical events by their
//! [`InboundMessage::event_key`].

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::{
    error::Result,
    platform::{DetachFn, PlatformSendSync},
};

/// Payload of an inbound event as delivered by the platform.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundData {
    /// JSON text that still needs decoding.
    Text(String),
    /// Already-structured value.
    Structured(Value),
}

impl From<String> for InboundData {
    fn from(text: String) -> Self {
        InboundData::Text(text)
    }
}

impl From<&str> for InboundData {
    fn from(text: &str) -> Self {
        InboundData::Text(text.to_string())
    }
}

impl From<Value> for InboundData {
    fn from(value: Value) -> Self {
        InboundData::Structured(value)
    }
}

/// One physical inbound event.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    /// Identity of the physical event, shared by every channel that observes
    /// it. `None` when the platform cannot identify events.
    pub event_key: Option<u64>,
    /// Event payload.
    pub data: InboundData,
}

impl InboundMessage {
    pub fn new(data: impl Into<InboundData>) -> Self {
        Self {
            event_key: None,
            data: data.into(),
        }
    }

    pub fn with_event_key(mut self, key: u64) -> Self {
        self.event_key = Some(key);
        self
    }
}

/// Receiver of inbound events.
pub trait InboundSink: PlatformSendSync {
    fn on_message(&self, message: InboundMessage);
}

/// A platform event source that can deliver inbound messages.
pub trait InboundChannel: PlatformSendSync {
    /// Short name used in logs (e.g. `"window"`, `"document"`).
    fn name(&self) -> &'static str;

    /// Start delivering events to `sink` until the returned subscription is
    /// dropped or detached.
    fn subscribe(&self, sink: Arc<dyn InboundSink>) -> Result<ChannelSubscription>;
}

/// Live subscription on an [`InboundChannel`]. Dropping it detaches.
pub struct ChannelSubscription {
    channel: &'static str,
    detach: Option<DetachFn>,
}

impl ChannelSubscription {
    pub fn new(channel: &'static str, detach: DetachFn) -> Self {
        Self {
            channel,
            detach: Some(detach),
        }
    }

    pub fn channel(&self) -> &'static str {
        self.channel
    }

    /// Detach now instead of at drop time.
    pub fn detach(mut self) {
        self.run_detach();
    }

    fn run_detach(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for ChannelSubscription {
    fn drop(&mut self) {
        self.run_detach();
    }
}

impl fmt::Debug for ChannelSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelSubscription")
            .field("channel", &self.channel)
            .field("attached", &self.detach.is_some())
            .finish()
    }
}
