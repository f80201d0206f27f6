//! # Core Bridge
//!
//! Correlation-based request/response protocol between a web document and
//! the native WebView host embedding it.
//!
//! ## Overview
//!
//! The document calls typed operations on [`NativeBridge`]. Each correlated
//! call gets a fresh [`RequestId`], a waiter in the [`CorrelationRegistry`],
//! and one outbound `{ id, type, payload }` message. The host answers with
//! `{ id, result }` on either of two inbound channels; the
//! [`MessageDispatcher`] matches the reply to its waiter exactly once. The
//! host may also push `GO_BACK` and `THEME_CHANGED` notifications at any
//! time.
//!
//! Without a native host every operation degrades to a browser fallback and
//! nothing is sent.
//!
//! ## Components
//!
//! - **Protocol** (`protocol`): operation tags, typed requests, envelopes
//! - **Registry** (`registry`): pending requests keyed by id
//! - **Transport** (`transport`): the single outbound primitive
//! - **Facade** (`bridge`): [`NativeBridge`] and its [`Reply`] futures
//! - **Fallbacks** (`fallback`): behavior without a native host
//! - **Dispatcher** (`dispatcher`): inbound normalization, dedup and routing
//! - **Back navigation** (`navigation`): the `GO_BACK` priority chain
//! - **Startup sync** (`sync`) and **legacy endpoints** (`endpoint`)
//! - **Runtime** (`runtime`): assembly from a `BridgeConfig`

pub mod bridge;
pub mod dispatcher;
pub mod endpoint;
pub mod error;
pub mod fallback;
pub mod id;
pub mod models;
pub mod navigation;
pub mod protocol;
pub mod registry;
pub mod reply;
pub mod runtime;
pub mod sync;
pub mod theme;
pub mod transport;

pub use bridge::NativeBridge;
pub use dispatcher::{DispatchOutcome, MessageDispatcher, NotificationOutcome};
pub use endpoint::Route;
pub use error::{Error, Result};
pub use id::{RequestId, RequestIdGenerator};
pub use models::{
    DebtReminder, FileSave, ImportCounts, OperationResult, Partner, RecordId, Transaction,
};
pub use navigation::{BackAction, BackNavigator};
pub use protocol::{
    CorrelatedOp, InboundEnvelope, Notification, OneShotOp, OperationTag, OutboundEnvelope,
    Request,
};
pub use registry::{CorrelationRegistry, PendingReply};
pub use reply::Reply;
pub use runtime::BridgeRuntime;
pub use sync::SyncSnapshot;
pub use theme::ThemeState;
pub use transport::TransportAdapter;
