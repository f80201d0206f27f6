//! Platform-specific helper abstractions used to keep trait bounds aligned with
//! the threading guarantees of each target.
//!
//! Native hosts (desktop shells, test harnesses) may share bridge objects
//! across threads and therefore require `Send + Sync`. WebAssembly builds run
//! entirely on the document's event loop and hold `web_sys` handles that are
//! not thread-safe, so the same bounds become no-ops there.

/// Marker trait that applies `Send + Sync` on native targets while becoming a
/// no-op on `wasm32`.
#[cfg(not(target_arch = "wasm32"))]
pub trait PlatformSendSync: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<T> PlatformSendSync for T where T: Send + Sync {}

#[cfg(target_arch = "wasm32")]
pub trait PlatformSendSync {}

#[cfg(target_arch = "wasm32")]
impl<T> PlatformSendSync for T {}

/// Marker trait equivalent to `Send` on native targets.
#[cfg(not(target_arch = "wasm32"))]
pub trait PlatformSend: Send {}

#[cfg(not(target_arch = "wasm32"))]
impl<T> PlatformSend for T where T: Send {}

#[cfg(target_arch = "wasm32")]
pub trait PlatformSend {}

#[cfg(target_arch = "wasm32")]
impl<T> PlatformSend for T {}

/// Callback that removes a channel subscription, `Send` when available.
#[cfg(not(target_arch = "wasm32"))]
pub type DetachFn = Box<dyn FnOnce() + Send>;

#[cfg(target_arch = "wasm32")]
pub type DetachFn = Box<dyn FnOnce()>;
