//! Error types for the browser-side bridge adapters

use bridge_traits::error::BridgeError;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Result type for browser adapter operations
pub type WasmResult<T> = Result<T, WasmError>;

/// Errors raised while talking to `window`, `document` or the WebView host
#[derive(Error, Debug)]
pub enum WasmError {
    /// A JavaScript call threw
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    /// A global or DOM node the adapter needs is missing
    #[error("Not available: {0}")]
    NotAvailable(String),

    /// A value could not cross the JS/Rust boundary
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl WasmError {
    /// Wrap a thrown JavaScript value with the call that raised it.
    pub fn js(context: &str, value: JsValue) -> Self {
        match WasmError::from(value) {
            WasmError::JavaScript(message) => WasmError::JavaScript(format!("{context}: {message}")),
            other => other,
        }
    }
}

impl From<WasmError> for BridgeError {
    fn from(err: WasmError) -> Self {
        match err {
            WasmError::NotAvailable(what) => BridgeError::NotAvailable(what),
            other => BridgeError::OperationFailed(other.to_string()),
        }
    }
}

impl From<JsValue> for WasmError {
    fn from(js_value: JsValue) -> Self {
        let msg = if let Some(text) = js_value.as_string() {
            text
        } else if let Some(error) = js_value.dyn_ref::<js_sys::Error>() {
            error.message().into()
        } else {
            format!("{:?}", js_value)
        };
        WasmError::JavaScript(msg)
    }
}

impl From<serde_wasm_bindgen::Error> for WasmError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        WasmError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for WasmError {
    fn from(err: serde_json::Error) -> Self {
        WasmError::Serialization(err.to_string())
    }
}

/// Look up `window`, failing with [`WasmError::NotAvailable`] outside a page.
pub(crate) fn window() -> WasmResult<web_sys::Window> {
    web_sys::window().ok_or_else(|| WasmError::NotAvailable("window".to_string()))
}

/// Look up `document`.
pub(crate) fn document() -> WasmResult<web_sys::Document> {
    window()?
        .document()
        .ok_or_else(|| WasmError::NotAvailable("document".to_string()))
}
