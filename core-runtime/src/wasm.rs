//! WASM bindings for core-runtime
//!
//! Exposes logging setup to the page script that boots the bridge.

use crate::logging::{init_logging, LoggingConfig};
use bridge_traits::time::LogLevel;
use wasm_bindgen::prelude::*;

fn to_js_error<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// JavaScript-accessible logging configuration
#[wasm_bindgen]
#[derive(Clone, Default)]
pub struct JsLoggingConfig {
    inner: LoggingConfig,
}

#[wasm_bindgen]
impl JsLoggingConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum log level (0 = Trace, 1 = Debug, 2 = Info, 3 = Warn, 4 = Error)
    #[wasm_bindgen(js_name = setLevel)]
    pub fn set_level(&mut self, level: u8) {
        self.inner.level = level_from_u8(level);
    }

    /// Set custom filter string (e.g., "core_bridge=debug,bridge_wasm=trace")
    #[wasm_bindgen(js_name = setFilter)]
    pub fn set_filter(&mut self, filter: String) {
        self.inner.filter = Some(filter);
    }

    /// Report span timings to the performance panel
    #[wasm_bindgen(js_name = setSpans)]
    pub fn set_spans(&mut self, enable: bool) {
        self.inner.enable_spans = enable;
    }
}

fn level_from_u8(level: u8) -> LogLevel {
    match level {
        0 => LogLevel::Trace,
        1 => LogLevel::Debug,
        3 => LogLevel::Warn,
        4 => LogLevel::Error,
        _ => LogLevel::Info,
    }
}

/// Initialize logging to the browser console.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging_js(config: JsLoggingConfig) -> Result<(), JsValue> {
    init_logging(config.inner).map_err(to_js_error)
}
