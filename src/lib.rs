//! Workspace facade crate.
//!
//! Re-exports the bridge runtime so host applications can depend on a single
//! crate. Enable the `wasm` feature to pull in the browser adapters from
//! `bridge-wasm` (wasm32 targets only).

pub use core_bridge::*;

pub use bridge_traits as traits;
pub use core_runtime::logging;
pub use core_runtime::{BridgeConfig, BridgeConfigBuilder, BridgeOptions};

#[cfg(feature = "wasm")]
pub use bridge_wasm as wasm;
