//! Outbound messages to the WebView host

use bridge_traits::error::Result as BridgeResult;
use bridge_traits::NativeTransport;
use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use crate::error::{WasmError, WasmResult};
use crate::host::{host_object, HOST_OBJECT};

/// Calls `window.ReactNativeWebView.postMessage(text)`.
///
/// The host object is looked up on every send; some hosts inject it after
/// the page script has started.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebViewTransport;

impl WebViewTransport {
    /// Create the transport.
    pub fn new() -> Self {
        Self
    }

    fn post(&self, message: &str) -> WasmResult<()> {
        let host = host_object().ok_or_else(|| WasmError::NotAvailable(HOST_OBJECT.to_string()))?;
        let post_message = Reflect::get(&host, &JsValue::from_str("postMessage"))
            .map_err(|err| WasmError::js("postMessage lookup", err))?
            .dyn_into::<Function>()
            .map_err(|_| WasmError::NotAvailable(format!("{HOST_OBJECT}.postMessage")))?;

        post_message
            .call1(&host, &JsValue::from_str(message))
            .map_err(|err| WasmError::js("postMessage", err))?;
        Ok(())
    }
}

impl NativeTransport for WebViewTransport {
    fn post_message(&self, message: &str) -> BridgeResult<()> {
        Ok(self.post(message)?)
    }
}
