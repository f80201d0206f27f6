//! WebAssembly Bridge Adapters
//!
//! Browser implementations of the `bridge-traits` capabilities, built on
//! `web-sys` and `wasm-bindgen`, plus the JavaScript-facing [`JsBridge`].
//!
//! # Platform Support
//!
//! This crate is designed exclusively for the `wasm32-unknown-unknown` target.
//! It will not compile for native targets.
//!
//! # Implementations
//!
//! - `WebViewTransport`: `window.ReactNativeWebView.postMessage`
//! - `MessageChannel`: `message` listeners on `window` and `document`
//! - `WindowFallback`: `window.open` and anchor downloads
//! - `JsHostEnvironment` / `DomScreenNavigator`: page globals, DOM state and
//!   page hooks
//!
//! # Examples
//!
//! ```ignore
//! use bridge_wasm::{build_wasm_runtime, WasmBridgeConfig};
//!
//! let runtime = build_wasm_runtime(hooks, WasmBridgeConfig::default())?;
//! let files = runtime.bridge().pick_file().await;
//! ```

#![cfg(target_arch = "wasm32")]
#![warn(missing_docs)]

pub mod bootstrap;
pub mod channels;
pub mod error;
pub mod fallback;
pub mod host;
pub mod transport;
pub mod wasm;

// Re-export commonly used types
pub use bootstrap::{attach_message_channels, build_wasm_runtime, WasmBridgeConfig};
pub use channels::MessageChannel;
pub use error::{WasmError, WasmResult};
pub use fallback::WindowFallback;
pub use host::{DomScreenNavigator, JsHostEnvironment, PageHooks};
pub use transport::WebViewTransport;
pub use wasm::JsBridge;
