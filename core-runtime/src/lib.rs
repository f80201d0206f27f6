//! # Core Runtime Module
//!
//! Runtime infrastructure shared by the bridge crates:
//! - Logging and tracing setup
//! - Bridge configuration and capability injection
//!
//! The protocol itself lives in `core-bridge`; this crate only decides how it
//! is wired and observed.

pub mod config;
pub mod error;
pub mod logging;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::{BridgeConfig, BridgeConfigBuilder, BridgeOptions};
pub use error::{Error, Result};
