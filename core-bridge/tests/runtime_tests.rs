//! Runtime assembly and channel lifecycle.

mod common;

use bridge_traits::InboundChannel;
use common::{idle_screens, BrokenChannel, ManualChannel, RecordingFallback, StubEnvironment};
use core_bridge::{BridgeRuntime, Error};
use core_runtime::BridgeConfig;
use std::sync::Arc;

fn browser_runtime() -> BridgeRuntime {
    let config = BridgeConfig::builder()
        .environment(Arc::new(StubEnvironment::new(false)))
        .screens(Arc::new(idle_screens()))
        .fallback(Arc::new(RecordingFallback::default()))
        .build()
        .unwrap();
    BridgeRuntime::new(config)
}

#[test]
fn test_runtime_without_transport_has_no_native_host() {
    let runtime = browser_runtime();
    assert!(!runtime.bridge().is_native_host_available());
}

#[test]
fn test_reattach_replaces_subscriptions() {
    let runtime = browser_runtime();
    let first = Arc::new(ManualChannel::new("window"));
    let second = Arc::new(ManualChannel::new("document"));

    let channels: Vec<Arc<dyn InboundChannel>> = vec![first.clone()];
    runtime.attach(&channels).unwrap();
    assert!(first.is_subscribed());

    let channels: Vec<Arc<dyn InboundChannel>> = vec![second.clone()];
    runtime.attach(&channels).unwrap();
    assert!(!first.is_subscribed());
    assert!(second.is_subscribed());
    assert_eq!(runtime.attached_channels(), vec!["document"]);
}

#[test]
fn test_failed_subscription_keeps_earlier_channels() {
    let runtime = browser_runtime();
    let window = Arc::new(ManualChannel::new("window"));
    let channels: Vec<Arc<dyn InboundChannel>> = vec![window.clone(), Arc::new(BrokenChannel)];

    let err = runtime.attach(&channels).unwrap_err();

    assert!(matches!(err, Error::Bridge(_)));
    assert!(window.is_subscribed());
}

#[test]
fn test_dropping_runtime_detaches() {
    let window = Arc::new(ManualChannel::new("window"));
    {
        let runtime = browser_runtime();
        let channels: Vec<Arc<dyn InboundChannel>> = vec![window.clone()];
        runtime.attach(&channels).unwrap();
    }
    assert!(!window.is_subscribed());
}
