#![cfg(target_arch = "wasm32")]
//! Browser tests for the WebView adapters
//!
//! These run in a real page and exercise the adapters against `window`,
//! `document` and a fake `ReactNativeWebView` object.

use bridge_traits::{
    BrowserFallback, HostEnvironment, InboundChannel, InboundData, InboundMessage, InboundSink,
    NativeTransport,
};
use bridge_wasm::channels::{inbound_message, EVENT_KEY_PROPERTY};
use bridge_wasm::fallback::data_url;
use bridge_wasm::wasm::back_action_name;
use bridge_wasm::host::SYSTEM_THEME_GLOBAL;
use bridge_wasm::{
    JsHostEnvironment, MessageChannel, PageHooks, WasmError, WebViewTransport, WindowFallback,
};
use core_bridge::BackAction;
use js_sys::{Array, Function, Object, Reflect};
use serde_json::json;
use std::sync::{Arc, Mutex};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{MessageEvent, MessageEventInit};

wasm_bindgen_test_configure!(run_in_browser);

#[derive(Default)]
struct Collector {
    messages: Mutex<Vec<InboundMessage>>,
}

impl Collector {
    fn taken(&self) -> Vec<InboundMessage> {
        std::mem::take(&mut *self.messages.lock().unwrap())
    }
}

impl InboundSink for Collector {
    fn on_message(&self, message: InboundMessage) {
        self.messages.lock().unwrap().push(message);
    }
}

fn message_event(data: &JsValue) -> MessageEvent {
    let init = MessageEventInit::new();
    init.set_data(data);
    MessageEvent::new_with_event_init_dict("message", &init).unwrap()
}

/// Install a fake host whose `postMessage` records into `window.__sent`.
fn install_fake_host() {
    let window = web_sys::window().unwrap();
    let sent = Array::new();
    let host = Object::new();
    let post = Function::new_with_args("message", "window.__sent.push(message);");
    Reflect::set(&host, &"postMessage".into(), &post).unwrap();
    Reflect::set(&window, &"__sent".into(), &sent).unwrap();
    Reflect::set(&window, &"ReactNativeWebView".into(), &host).unwrap();
    Reflect::set(&window, &"isNativeApp".into(), &JsValue::TRUE).unwrap();
}

fn remove_fake_host() {
    let window = web_sys::window().unwrap();
    for key in ["__sent", "ReactNativeWebView", "isNativeApp"] {
        Reflect::delete_property(&window, &key.into()).unwrap();
    }
}

fn sent_messages() -> Vec<String> {
    let window = web_sys::window().unwrap();
    let sent: Array = Reflect::get(&window, &"__sent".into()).unwrap().into();
    sent.iter().filter_map(|value| value.as_string()).collect()
}

#[wasm_bindgen_test]
fn test_string_event_data_stays_text() {
    let event = message_event(&JsValue::from_str("{\"type\":\"GO_BACK\"}"));
    let message = inbound_message(&event).unwrap();
    assert_eq!(
        message.data,
        InboundData::Text("{\"type\":\"GO_BACK\"}".to_string())
    );
}

#[wasm_bindgen_test]
fn test_object_event_data_becomes_json() {
    let data = js_sys::JSON::parse("{\"id\":\"42\",\"result\":{\"success\":true}}").unwrap();
    let message = inbound_message(&message_event(&data)).unwrap();
    assert_eq!(
        message.data,
        InboundData::Structured(json!({ "id": "42", "result": { "success": true } }))
    );
}

#[wasm_bindgen_test]
fn test_event_key_is_stable_per_event() {
    let event = message_event(&JsValue::from_str("{}"));
    let first = inbound_message(&event).unwrap().event_key;
    let second = inbound_message(&event).unwrap().event_key;
    assert!(first.is_some());
    assert_eq!(first, second);

    let stamped = Reflect::get(&event, &EVENT_KEY_PROPERTY.into()).unwrap();
    assert_eq!(stamped.as_f64().map(|key| key as u64), first);

    let other = inbound_message(&message_event(&JsValue::from_str("{}"))).unwrap();
    assert_ne!(other.event_key, first);
}

#[wasm_bindgen_test]
fn test_unusable_stamped_key_is_replaced() {
    for preset in [1.5, -3.0, f64::NAN, 1e300] {
        let event = message_event(&JsValue::from_str("{}"));
        Reflect::set(&event, &EVENT_KEY_PROPERTY.into(), &JsValue::from_f64(preset)).unwrap();

        let key = inbound_message(&event).unwrap().event_key.unwrap();
        let stamped = Reflect::get(&event, &EVENT_KEY_PROPERTY.into()).unwrap();
        assert_eq!(stamped.as_f64(), Some(key as f64), "preset {preset}");
        assert_eq!(inbound_message(&event).unwrap().event_key, Some(key));
    }

    let event = message_event(&JsValue::from_str("{}"));
    Reflect::set(&event, &EVENT_KEY_PROPERTY.into(), &JsValue::from_f64(77.0)).unwrap();
    assert_eq!(inbound_message(&event).unwrap().event_key, Some(77));
}

#[wasm_bindgen_test]
fn test_system_scheme_global_follows_host() {
    let hooks: PageHooks = Object::new().unchecked_into();
    let environment = JsHostEnvironment::new(hooks);
    let window = web_sys::window().unwrap();

    environment.publish_system_scheme(Some("sepia"));
    let global = Reflect::get(&window, &SYSTEM_THEME_GLOBAL.into()).unwrap();
    assert_eq!(global.as_string().as_deref(), Some("sepia"));

    environment.publish_system_scheme(None);
    assert!(Reflect::get(&window, &SYSTEM_THEME_GLOBAL.into()).unwrap().is_null());

    Reflect::delete_property(&window, &SYSTEM_THEME_GLOBAL.into()).unwrap();
}

#[wasm_bindgen_test]
fn test_window_channel_delivers_until_detached() {
    let collector = Arc::new(Collector::default());
    let channel = MessageChannel::window().unwrap();
    assert_eq!(channel.name(), "window");

    let subscription = channel.subscribe(collector.clone()).unwrap();
    let window = web_sys::window().unwrap();
    window
        .dispatch_event(&message_event(&JsValue::from_str("{\"type\":\"GO_BACK\"}")))
        .unwrap();
    assert_eq!(collector.taken().len(), 1);

    subscription.detach();
    window
        .dispatch_event(&message_event(&JsValue::from_str("{\"type\":\"GO_BACK\"}")))
        .unwrap();
    assert!(collector.taken().is_empty());
}

#[wasm_bindgen_test]
fn test_transport_posts_to_fake_host() {
    install_fake_host();

    let transport = WebViewTransport::new();
    transport.post_message("{\"type\":\"EXIT_APP\",\"payload\":{}}").unwrap();
    assert_eq!(sent_messages(), vec!["{\"type\":\"EXIT_APP\",\"payload\":{}}"]);

    remove_fake_host();
}

#[wasm_bindgen_test]
fn test_transport_without_host_is_not_available() {
    remove_fake_host();
    let err = WebViewTransport::new().post_message("{}").unwrap_err();
    assert!(err.to_string().contains("ReactNativeWebView"));
}

#[wasm_bindgen_test]
fn test_data_url_encodes_content() {
    assert_eq!(
        data_url("{\"a\": 1}", "application/json"),
        "data:application/json;charset=utf-8,%7B%22a%22%3A%201%7D"
    );
}

#[wasm_bindgen_test]
fn test_download_uses_anchor_and_cleans_up() {
    let fallback = WindowFallback::new();
    fallback
        .download_file("backup.json", "{}", "application/json")
        .unwrap();

    let document = web_sys::window().unwrap().document().unwrap();
    let anchors = document.query_selector("a[download]").unwrap();
    assert!(anchors.is_none());
}

#[wasm_bindgen_test]
fn test_js_error_conversion() {
    let err = WasmError::from(JsValue::from(js_sys::Error::new("boom")));
    assert_eq!(err.to_string(), "JavaScript error: boom");

    let err = WasmError::js("postMessage", JsValue::from_str("denied"));
    assert_eq!(err.to_string(), "JavaScript error: postMessage: denied");

    let bridge: bridge_traits::BridgeError = WasmError::NotAvailable("window".into()).into();
    assert!(matches!(bridge, bridge_traits::BridgeError::NotAvailable(_)));
}

#[wasm_bindgen_test]
fn test_back_action_names() {
    assert_eq!(back_action_name(BackAction::ExitRequested), "exitRequested");
    assert_eq!(back_action_name(BackAction::Unhandled), "unhandled");
}
