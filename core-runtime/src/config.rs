//! # Bridge Configuration Module
//!
//! Collects the host capabilities and tuning options the bridge runtime needs.
//!
//! ## Overview
//!
//! The runtime used to read ambient globals (`window.isNativeApp`, the theme
//! flag, the application's screen state). Here every such fact is an injected
//! capability, assembled with a builder that fails fast when something
//! required is missing.
//!
//! ## Required Capabilities
//!
//! - `HostEnvironment` - native presence and theme preference
//! - `ScreenNavigator` - modal/screen state for back navigation
//! - `BrowserFallback` - browser affordances used without a native host
//!
//! ## Optional Capabilities
//!
//! - `NativeTransport` - absent in a plain browser; every operation then
//!   takes its fallback path
//! - `Clock` - defaults to [`SystemClock`]
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::BridgeConfig;
//! use std::sync::Arc;
//!
//! let config = BridgeConfig::builder()
//!     .transport(Arc::new(MyWebViewTransport))
//!     .environment(Arc::new(MyEnvironment))
//!     .screens(Arc::new(MyScreens))
//!     .fallback(Arc::new(MyBrowserFallback))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{
    BrowserFallback, Clock, HostEnvironment, NativeTransport, ScreenNavigator, SystemClock,
};
use std::sync::Arc;

/// Default number of recently seen physical events remembered for
/// cross-channel deduplication.
pub const DEFAULT_DEDUP_WINDOW: usize = 64;

/// Upper bound for the dedup window; larger values only cost memory.
pub const MAX_DEDUP_WINDOW: usize = 4096;

/// MIME type used for browser-side downloads when the caller gives none.
pub const DEFAULT_DOWNLOAD_MIME_TYPE: &str = "application/json";

/// Tuning options for the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeOptions {
    /// How many recent physical event keys the dispatcher remembers.
    pub dedup_window: usize,
    /// MIME type for `SAVE_FILE` fallback downloads.
    pub download_mime_type: String,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            dedup_window: DEFAULT_DEDUP_WINDOW,
            download_mime_type: DEFAULT_DOWNLOAD_MIME_TYPE.to_string(),
        }
    }
}

impl BridgeOptions {
    pub fn validate(&self) -> Result<()> {
        if self.dedup_window == 0 {
            return Err(Error::Config(
                "Dedup window must hold at least one event".to_string(),
            ));
        }

        if self.dedup_window > MAX_DEDUP_WINDOW {
            return Err(Error::Config(format!(
                "Dedup window exceeds maximum of {MAX_DEDUP_WINDOW} events"
            )));
        }

        if self.download_mime_type.trim().is_empty() || !self.download_mime_type.contains('/') {
            return Err(Error::Config(format!(
                "Download MIME type '{}' is not a valid type/subtype pair",
                self.download_mime_type
            )));
        }

        Ok(())
    }
}

/// Capabilities and options for one bridge runtime.
///
/// Use [`BridgeConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct BridgeConfig {
    /// Outbound message primitive (absent in a plain browser)
    pub transport: Option<Arc<dyn NativeTransport>>,

    /// Ambient host facts
    pub environment: Arc<dyn HostEnvironment>,

    /// Screen and modal state for back navigation
    pub screens: Arc<dyn ScreenNavigator>,

    /// Browser affordances used when no native host is present
    pub fallback: Arc<dyn BrowserFallback>,

    /// Time source for request identifiers
    pub clock: Arc<dyn Clock>,

    pub options: BridgeOptions,
}

impl std::fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeConfig")
            .field(
                "transport",
                &self.transport.as_ref().map(|_| "NativeTransport { ... }"),
            )
            .field("environment", &"HostEnvironment { ... }")
            .field("screens", &"ScreenNavigator { ... }")
            .field("fallback", &"BrowserFallback { ... }")
            .field("clock", &"Clock { ... }")
            .field("options", &self.options)
            .finish()
    }
}

impl BridgeConfig {
    pub fn builder() -> BridgeConfigBuilder {
        BridgeConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        self.options.validate()
    }
}

fn capability_missing(capability: &str, message: &str) -> Error {
    Error::CapabilityMissing {
        capability: capability.to_string(),
        message: message.to_string(),
    }
}

/// Builder for [`BridgeConfig`].
#[derive(Default)]
pub struct BridgeConfigBuilder {
    transport: Option<Arc<dyn NativeTransport>>,
    environment: Option<Arc<dyn HostEnvironment>>,
    screens: Option<Arc<dyn ScreenNavigator>>,
    fallback: Option<Arc<dyn BrowserFallback>>,
    clock: Option<Arc<dyn Clock>>,
    options: BridgeOptions,
}

impl BridgeConfigBuilder {
    /// Sets the native transport.
    ///
    /// Leave unset when running in an ordinary browser.
    pub fn transport(mut self, transport: Arc<dyn NativeTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the host environment (required).
    pub fn environment(mut self, environment: Arc<dyn HostEnvironment>) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Sets the screen navigator (required).
    pub fn screens(mut self, screens: Arc<dyn ScreenNavigator>) -> Self {
        self.screens = Some(screens);
        self
    }

    /// Sets the browser fallback (required).
    pub fn fallback(mut self, fallback: Arc<dyn BrowserFallback>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Sets the clock. Default: [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets how many recent physical events are remembered for dedup.
    ///
    /// Default: [`DEFAULT_DEDUP_WINDOW`]
    pub fn dedup_window(mut self, events: usize) -> Self {
        self.options.dedup_window = events;
        self
    }

    /// Sets the MIME type for fallback downloads.
    ///
    /// Default: [`DEFAULT_DOWNLOAD_MIME_TYPE`]
    pub fn download_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.options.download_mime_type = mime_type.into();
        self
    }

    /// Sets all options at once.
    pub fn options(mut self, options: BridgeOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the final `BridgeConfig`.
    ///
    /// Returns `Error::CapabilityMissing` naming the first required capability
    /// that was not provided, or `Error::Config` for invalid options.
    pub fn build(self) -> Result<BridgeConfig> {
        let environment = self.environment.ok_or_else(|| {
            capability_missing(
                "HostEnvironment",
                "HostEnvironment is required to detect the native host and theme. \
                 Browser: use bridge_wasm::JsHostEnvironment. \
                 Tests: inject a stub environment.",
            )
        })?;

        let screens = self.screens.ok_or_else(|| {
            capability_missing(
                "ScreenNavigator",
                "ScreenNavigator is required for back navigation. \
                 Inject an adapter over the application's modal and screen state.",
            )
        })?;

        let fallback = self.fallback.ok_or_else(|| {
            capability_missing(
                "BrowserFallback",
                "BrowserFallback is required for operations without a native host. \
                 Browser: use bridge_wasm::WindowFallback.",
            )
        })?;

        let config = BridgeConfig {
            transport: self.transport,
            environment,
            screens,
            fallback,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            options: self.options,
        };

        config.validate()?;

        Ok(config)
    }
}
