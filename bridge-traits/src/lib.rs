//! # Host Bridge Traits
//!
//! Capability traits that connect the bridge runtime to the document and the
//! native WebView host it may be embedded in.
//!
//! ## Overview
//!
//! The runtime never touches `window` or `document` directly. Everything it
//! needs from its surroundings is expressed as a trait here and injected at
//! construction, so the protocol core can be tested without a browser.
//!
//! ## Traits
//!
//! ### Messaging
//! - [`NativeTransport`](host::NativeTransport) - Outbound `postMessage` primitive
//! - [`InboundChannel`](channel::InboundChannel) - Event source delivering host messages
//! - [`InboundSink`](channel::InboundSink) - Receiver subscribed to inbound channels
//!
//! ### Environment
//! - [`HostEnvironment`](host::HostEnvironment) - Native presence and theme state
//! - [`ScreenNavigator`](navigation::ScreenNavigator) - Modal/screen state for back navigation
//! - [`BrowserFallback`](host::BrowserFallback) - Browser affordances when no host is present
//!
//! ### Utilities
//! - [`Clock`](time::Clock) - Time source for request identifiers
//! - [`LoggerSink`](time::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate |
//! |----------|---------------------|
//! | Browser / WebView (wasm32) | `bridge-wasm` |
//! | Native test harness | test doubles in each crate's `tests/` |
//!
//! ## Thread Safety
//!
//! Traits are bounded by [`PlatformSendSync`](platform::PlatformSendSync):
//! `Send + Sync` on native targets, unbounded on `wasm32`.

pub mod channel;
pub mod error;
pub mod host;
pub mod http;
pub mod navigation;
pub mod platform;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use channel::{ChannelSubscription, InboundChannel, InboundData, InboundMessage, InboundSink};
pub use host::{BrowserFallback, ColorScheme, HostEnvironment, NativeTransport, ThemePreference};
pub use http::HttpMethod;
pub use navigation::{Modal, ScreenNavigator};
pub use time::{Clock, ConsoleLogger, FixedClock, LogEntry, LogLevel, LoggerSink, SystemClock};
