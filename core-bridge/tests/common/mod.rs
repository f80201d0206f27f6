//! Shared test doubles for the bridge integration tests.

#![allow(dead_code)]

use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::{
    BrowserFallback, ChannelSubscription, ColorScheme, FixedClock, HostEnvironment,
    InboundChannel, InboundMessage, InboundSink, Modal, NativeTransport, ScreenNavigator,
    ThemePreference,
};
use core_bridge::BridgeRuntime;
use core_runtime::BridgeConfig;
use mockall::mock;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Transport
// ============================================================================

/// Captures every message posted to the "host".
#[derive(Default)]
pub struct RecordingTransport {
    messages: Mutex<Vec<String>>,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<Value> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .map(|m| serde_json::from_str(m).expect("outbound message is JSON"))
            .collect()
    }

    pub fn raw(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn id_of(&self, index: usize) -> String {
        self.sent()[index]["id"]
            .as_str()
            .expect("message carries an id")
            .to_string()
    }
}

impl NativeTransport for RecordingTransport {
    fn post_message(&self, message: &str) -> BridgeResult<()> {
        self.messages.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

// ============================================================================
// Inbound channels
// ============================================================================

/// Channel whose events are pushed by the test.
pub struct ManualChannel {
    name: &'static str,
    sink: Arc<Mutex<Option<Arc<dyn InboundSink>>>>,
}

impl ManualChannel {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            sink: Arc::new(Mutex::new(None)),
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.sink.lock().unwrap().is_some()
    }

    /// Deliver `message`; returns false if nobody is subscribed.
    pub fn deliver(&self, message: InboundMessage) -> bool {
        let sink = self.sink.lock().unwrap().clone();
        match sink {
            Some(sink) => {
                sink.on_message(message);
                true
            }
            None => false,
        }
    }
}

impl InboundChannel for ManualChannel {
    fn name(&self) -> &'static str {
        self.name
    }

    fn subscribe(&self, sink: Arc<dyn InboundSink>) -> BridgeResult<ChannelSubscription> {
        *self.sink.lock().unwrap() = Some(sink);
        let slot = Arc::clone(&self.sink);
        Ok(ChannelSubscription::new(
            self.name,
            Box::new(move || {
                *slot.lock().unwrap() = None;
            }),
        ))
    }
}

/// Channel that refuses subscriptions.
pub struct BrokenChannel;

impl InboundChannel for BrokenChannel {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn subscribe(&self, _sink: Arc<dyn InboundSink>) -> BridgeResult<ChannelSubscription> {
        Err(BridgeError::NotAvailable("broken channel".to_string()))
    }
}

// ============================================================================
// Environment and browser
// ============================================================================

pub struct StubEnvironment {
    native: AtomicBool,
    preference: Mutex<ThemePreference>,
    applied: Mutex<Vec<Option<ColorScheme>>>,
    /// Stands in for the page's `systemTheme` global.
    published: Mutex<Option<String>>,
}

impl StubEnvironment {
    pub fn new(native: bool) -> Self {
        Self {
            native: AtomicBool::new(native),
            preference: Mutex::new(ThemePreference::System),
            applied: Mutex::new(Vec::new()),
            published: Mutex::new(None),
        }
    }

    pub fn set_preference(&self, preference: ThemePreference) {
        *self.preference.lock().unwrap() = preference;
    }

    pub fn applied(&self) -> Vec<Option<ColorScheme>> {
        self.applied.lock().unwrap().clone()
    }

    pub fn published(&self) -> Option<String> {
        self.published.lock().unwrap().clone()
    }
}

impl HostEnvironment for StubEnvironment {
    fn is_native_host_available(&self) -> bool {
        self.native.load(Ordering::SeqCst)
    }

    fn theme_preference(&self) -> ThemePreference {
        *self.preference.lock().unwrap()
    }

    fn apply_theme(&self, system_scheme: Option<ColorScheme>) {
        self.applied.lock().unwrap().push(system_scheme);
    }

    fn publish_system_scheme(&self, raw: Option<&str>) {
        *self.published.lock().unwrap() = raw.map(str::to_string);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub file_name: String,
    pub content: String,
    pub mime_type: String,
}

#[derive(Default)]
pub struct RecordingFallback {
    opened: Mutex<Vec<String>>,
    downloads: Mutex<Vec<Download>>,
    refuse_downloads: AtomicBool,
}

impl RecordingFallback {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    pub fn downloads(&self) -> Vec<Download> {
        self.downloads.lock().unwrap().clone()
    }

    pub fn refuse_downloads(&self) {
        self.refuse_downloads.store(true, Ordering::SeqCst);
    }
}

impl BrowserFallback for RecordingFallback {
    fn open_url(&self, url: &str) -> BridgeResult<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }

    fn download_file(&self, file_name: &str, content: &str, mime_type: &str) -> BridgeResult<()> {
        if self.refuse_downloads.load(Ordering::SeqCst) {
            return Err(BridgeError::OperationFailed("download blocked".to_string()));
        }
        self.downloads.lock().unwrap().push(Download {
            file_name: file_name.to_string(),
            content: content.to_string(),
            mime_type: mime_type.to_string(),
        });
        Ok(())
    }
}

// ============================================================================
// Screens
// ============================================================================

mock! {
    pub Screens {}
    impl ScreenNavigator for Screens {
        fn is_modal_open(&self, modal: Modal) -> bool;
        fn close_modal(&self, modal: Modal);
        fn is_settings_active(&self) -> bool;
        fn close_settings(&self);
        fn has_previous_screen(&self) -> bool;
        fn go_back(&self);
    }
}

/// Screens with nothing open and no history.
pub fn idle_screens() -> MockScreens {
    let mut screens = MockScreens::new();
    screens.expect_is_modal_open().return_const(false);
    screens.expect_is_settings_active().return_const(false);
    screens.expect_has_previous_screen().return_const(false);
    screens
}

// ============================================================================
// Harness
// ============================================================================

pub const CLOCK_MILLIS: i64 = 1_700_000_000_000;

/// A runtime wired to recording doubles and attached to a window and a
/// document channel.
pub struct Harness {
    pub runtime: BridgeRuntime,
    pub transport: Arc<RecordingTransport>,
    pub environment: Arc<StubEnvironment>,
    pub fallback: Arc<RecordingFallback>,
    pub window: Arc<ManualChannel>,
    pub document: Arc<ManualChannel>,
    next_event: AtomicU64,
}

impl Harness {
    pub fn native() -> Self {
        Self::build(true, idle_screens())
    }

    pub fn browser() -> Self {
        Self::build(false, idle_screens())
    }

    pub fn with_screens(native: bool, screens: MockScreens) -> Self {
        Self::build(native, screens)
    }

    fn build(native: bool, screens: MockScreens) -> Self {
        let transport = Arc::new(RecordingTransport::default());
        let environment = Arc::new(StubEnvironment::new(native));
        let fallback = Arc::new(RecordingFallback::default());

        let config = BridgeConfig::builder()
            .transport(transport.clone())
            .environment(environment.clone())
            .screens(Arc::new(screens))
            .fallback(fallback.clone())
            .clock(Arc::new(FixedClock::from_millis(CLOCK_MILLIS)))
            .dedup_window(16)
            .build()
            .expect("complete config");

        let runtime = BridgeRuntime::new(config);
        let window = Arc::new(ManualChannel::new("window"));
        let document = Arc::new(ManualChannel::new("document"));
        let channels: Vec<Arc<dyn InboundChannel>> = vec![window.clone(), document.clone()];
        runtime.attach(&channels).expect("channels attach");

        Self {
            runtime,
            transport,
            environment,
            fallback,
            window,
            document,
            next_event: AtomicU64::new(1),
        }
    }

    /// One physical event, observed on both channels as a real WebView does.
    pub fn broadcast(&self, data: impl Into<bridge_traits::InboundData>) {
        let key = self.next_event.fetch_add(1, Ordering::SeqCst);
        let message = InboundMessage::new(data).with_event_key(key);
        self.window.deliver(message.clone());
        self.document.deliver(message);
    }

    /// Answer the `index`-th outbound message with `result`, as JSON text.
    pub fn reply(&self, index: usize, result: Value) {
        let id = self.transport.id_of(index);
        self.broadcast(json!({ "id": id, "result": result }).to_string());
    }
}
