//! `message` listeners on `window` and `document`
//!
//! Android WebViews deliver host messages on `document`, iOS on `window`.
//! The runtime listens on both. When one physical event reaches both
//! listeners, the first one stamps it with a numeric key so the dispatcher
//! can drop the second sighting.

use bridge_traits::error::Result as BridgeResult;
use bridge_traits::{ChannelSubscription, InboundChannel, InboundData, InboundMessage, InboundSink};
use js_sys::Reflect;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{trace, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, MessageEvent};

use crate::error::{document, window, WasmError, WasmResult};

/// Property written onto each event to carry its dedup key.
pub const EVENT_KEY_PROPERTY: &str = "__bridgeEventId";

static NEXT_EVENT_KEY: AtomicU64 = AtomicU64::new(1);

/// One DOM event target listened to for `message` events.
#[derive(Debug, Clone)]
pub struct MessageChannel {
    name: &'static str,
    target: EventTarget,
}

impl MessageChannel {
    /// Listen on `window`.
    pub fn window() -> WasmResult<Self> {
        Ok(Self {
            name: "window",
            target: window()?.into(),
        })
    }

    /// Listen on `document`.
    pub fn document() -> WasmResult<Self> {
        Ok(Self {
            name: "document",
            target: document()?.into(),
        })
    }

    /// Both channels a WebView may deliver on.
    pub fn all() -> WasmResult<Vec<Arc<dyn InboundChannel>>> {
        Ok(vec![Arc::new(Self::window()?), Arc::new(Self::document()?)])
    }
}

impl InboundChannel for MessageChannel {
    fn name(&self) -> &'static str {
        self.name
    }

    fn subscribe(&self, sink: Arc<dyn InboundSink>) -> BridgeResult<ChannelSubscription> {
        let channel = self.name;
        let listener = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
            if let Some(message) = inbound_message(&event) {
                sink.on_message(message);
            } else {
                trace!(channel, "Ignoring message event without usable data");
            }
        });

        self.target
            .add_event_listener_with_callback("message", listener.as_ref().unchecked_ref())
            .map_err(|err| WasmError::js("addEventListener", err))?;

        let target = self.target.clone();
        Ok(ChannelSubscription::new(
            self.name,
            Box::new(move || {
                if let Err(err) = target
                    .remove_event_listener_with_callback("message", listener.as_ref().unchecked_ref())
                {
                    warn!(channel, error = %WasmError::from(err), "Could not remove message listener");
                }
                drop(listener);
            }),
        ))
    }
}

/// Convert a DOM `message` event into the bridge's inbound form.
///
/// String data is passed on as text; anything else is converted to JSON.
/// Returns `None` when the data cannot be represented as JSON.
pub fn inbound_message(event: &MessageEvent) -> Option<InboundMessage> {
    let data = event.data();
    let data = match data.as_string() {
        Some(text) => InboundData::Text(text),
        None => match serde_wasm_bindgen::from_value::<Value>(data) {
            Ok(value) => InboundData::Structured(value),
            Err(err) => {
                trace!(error = %err, "Message data is not JSON-compatible");
                return None;
            }
        },
    };

    let message = InboundMessage::new(data);
    Some(match event_key(event) {
        Some(key) => message.with_event_key(key),
        None => message,
    })
}

/// Largest integer an `f64` holds exactly.
const MAX_EXACT_KEY: f64 = 9_007_199_254_740_991.0;

/// A stamped key is only trusted when it is a whole number `u64` can hold.
fn stamped_key(value: &JsValue) -> Option<u64> {
    let key = value.as_f64()?;
    (key.fract() == 0.0 && (0.0..=MAX_EXACT_KEY).contains(&key)).then(|| key as u64)
}

/// Read the event's dedup key, stamping a fresh one on first sighting or
/// over a value that is not a usable key.
fn event_key(event: &MessageEvent) -> Option<u64> {
    let property = JsValue::from_str(EVENT_KEY_PROPERTY);
    let existing = Reflect::get(event, &property).ok()?;
    if let Some(key) = stamped_key(&existing) {
        return Some(key);
    }

    let key = NEXT_EVENT_KEY.fetch_add(1, Ordering::Relaxed);
    match Reflect::set(event, &property, &JsValue::from_f64(key as f64)) {
        Ok(true) => Some(key),
        _ => None,
    }
}
