//! Wiring the browser adapters into a running bridge.
//!
//! [`build_wasm_runtime`] is the single entry point a page needs: it builds a
//! [`BridgeConfig`] from the adapters in this crate, assembles the
//! [`BridgeRuntime`] and attaches it to the `window` and `document` message
//! channels.

use bridge_traits::error::BridgeError;
use core_bridge::{BridgeRuntime, Result};
use core_runtime::config::{DEFAULT_DEDUP_WINDOW, DEFAULT_DOWNLOAD_MIME_TYPE};
use core_runtime::BridgeConfig;
use std::sync::Arc;
use tracing::info;

use crate::channels::MessageChannel;
use crate::fallback::WindowFallback;
use crate::host::{DomScreenNavigator, JsHostEnvironment, PageHooks};
use crate::transport::WebViewTransport;

/// Tunables for [`build_wasm_runtime`].
#[derive(Debug, Clone)]
pub struct WasmBridgeConfig {
    /// How many recent event keys are remembered for duplicate suppression.
    pub dedup_window: usize,
    /// MIME type for browser downloads that do not name one.
    pub download_mime_type: String,
    /// Attach the message listeners immediately.
    pub attach_listeners: bool,
}

impl WasmBridgeConfig {
    /// Override the duplicate suppression window.
    pub fn with_dedup_window(mut self, dedup_window: usize) -> Self {
        self.dedup_window = dedup_window;
        self
    }

    /// Override the fallback download MIME type.
    pub fn with_download_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.download_mime_type = mime_type.into();
        self
    }

    /// Build the runtime without attaching listeners; call
    /// [`BridgeRuntime::attach`] later.
    pub fn deferred(mut self) -> Self {
        self.attach_listeners = false;
        self
    }
}

impl Default for WasmBridgeConfig {
    fn default() -> Self {
        Self {
            dedup_window: DEFAULT_DEDUP_WINDOW,
            download_mime_type: DEFAULT_DOWNLOAD_MIME_TYPE.to_string(),
            attach_listeners: true,
        }
    }
}

/// Assemble a runtime over the page's globals and DOM.
pub fn build_wasm_runtime(hooks: PageHooks, config: WasmBridgeConfig) -> Result<BridgeRuntime> {
    let config_built = BridgeConfig::builder()
        .transport(Arc::new(WebViewTransport::new()))
        .environment(Arc::new(JsHostEnvironment::new(hooks.clone())))
        .screens(Arc::new(DomScreenNavigator::new(hooks)))
        .fallback(Arc::new(WindowFallback::new()))
        .dedup_window(config.dedup_window)
        .download_mime_type(config.download_mime_type)
        .build()?;

    let runtime = BridgeRuntime::new(config_built);
    if config.attach_listeners {
        attach_message_channels(&runtime)?;
    }

    info!(
        native = runtime.bridge().is_native_host_available(),
        "Bridge runtime ready"
    );
    Ok(runtime)
}

/// Subscribe `runtime` to the `window` and `document` message channels.
pub fn attach_message_channels(runtime: &BridgeRuntime) -> Result<()> {
    let channels = MessageChannel::all().map_err(BridgeError::from)?;
    runtime.attach(&channels)
}
