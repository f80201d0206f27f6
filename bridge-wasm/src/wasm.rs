//! JavaScript bindings for the bridge
//!
//! [`JsBridge`] is what page scripts hold. Every correlated operation
//! returns a `Promise`; operations without a reply return nothing.
//!
//! ```javascript
//! const bridge = new JsBridge(hooks);
//! bridge.init();
//!
//! const snapshot = await bridge.syncOnStartup();
//! if (snapshot?.transactions) state.transactions = snapshot.transactions;
//!
//! await bridge.saveTransaction({ id: 1, type: 'sale', item: 'Rice', ... });
//! const picked = await bridge.pickFile();   // { success, content? }
//! ```

use bridge_traits::HttpMethod;
use core_bridge::{BackAction, BridgeRuntime, DebtReminder, NativeBridge, RecordId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::bootstrap::{attach_message_channels, build_wasm_runtime, WasmBridgeConfig};
use crate::host::PageHooks;

// =============================================================================
// Conversion helpers
// =============================================================================

fn to_js_error<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(to_js_error)
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(to_js_error)
}

/// Read a page record the way `JSON.stringify` sees it, keeping key order.
fn record_from_js(record: &JsValue) -> Result<serde_json::Value, JsValue> {
    let text = js_sys::JSON::stringify(record)?
        .as_string()
        .ok_or_else(|| JsValue::from_str("record has no JSON form"))?;
    serde_json::from_str(&text).map_err(to_js_error)
}

fn promise_of<T, F>(reply: F) -> js_sys::Promise
where
    T: Serialize,
    F: Future<Output = T> + 'static,
{
    future_to_promise(async move { to_js(&reply.await) })
}

/// Name reported to JavaScript for each back-chain step.
pub fn back_action_name(action: BackAction) -> &'static str {
    match action {
        BackAction::ClosedModal(_) => "closedModal",
        BackAction::ClosedSettings => "closedSettings",
        BackAction::NavigatedBack => "navigatedBack",
        BackAction::ExitRequested => "exitRequested",
        BackAction::Unhandled => "unhandled",
    }
}

// =============================================================================
// Bridge
// =============================================================================

/// JavaScript-accessible bridge to the native WebView host.
#[wasm_bindgen]
pub struct JsBridge {
    runtime: BridgeRuntime,
}

#[wasm_bindgen]
impl JsBridge {
    /// Build the bridge over the page's hook object.
    ///
    /// Listeners are not attached until [`JsBridge::init`] is called.
    /// `dedup_window` overrides how many recent events are remembered.
    #[wasm_bindgen(constructor)]
    pub fn new(hooks: PageHooks, dedup_window: Option<usize>) -> Result<JsBridge, JsValue> {
        console_error_panic_hook::set_once();

        let mut config = WasmBridgeConfig::default().deferred();
        if let Some(events) = dedup_window {
            config = config.with_dedup_window(events);
        }
        let runtime = build_wasm_runtime(hooks, config).map_err(to_js_error)?;
        Ok(Self { runtime })
    }

    /// Start listening for host messages on `window` and `document`.
    ///
    /// Calling it again replaces the earlier listeners.
    pub fn init(&self) -> Result<(), JsValue> {
        attach_message_channels(&self.runtime).map_err(to_js_error)
    }

    /// Stop listening for host messages.
    pub fn dispose(&self) {
        self.runtime.detach();
    }

    /// Whether a WebView host is embedding the page.
    #[wasm_bindgen(js_name = isNativeHostAvailable)]
    pub fn is_native_host_available(&self) -> bool {
        self.bridge().is_native_host_available()
    }

    /// Last color scheme the host reported, exactly as sent, or `null`.
    /// Mirrors `window.systemTheme`.
    #[wasm_bindgen(js_name = systemScheme)]
    pub fn system_scheme(&self) -> Option<String> {
        self.runtime.theme().reported_scheme()
    }

    /// Requests still waiting for a host reply.
    #[wasm_bindgen(js_name = pendingRequests)]
    pub fn pending_requests(&self) -> usize {
        self.bridge().pending_requests()
    }

    // -------------------------------------------------------------------------
    // Records
    // -------------------------------------------------------------------------

    /// Resolves to an array of transactions, or `null`.
    #[wasm_bindgen(js_name = getTransactions)]
    pub fn get_transactions(&self) -> js_sys::Promise {
        promise_of(self.bridge().get_transactions())
    }

    /// Insert or update a transaction on the host. The object is sent as
    /// given.
    #[wasm_bindgen(js_name = saveTransaction)]
    pub fn save_transaction(&self, transaction: JsValue) -> Result<js_sys::Promise, JsValue> {
        let record = record_from_js(&transaction)?;
        Ok(promise_of(self.bridge().save_transaction(record)))
    }

    /// Delete a transaction by id.
    #[wasm_bindgen(js_name = deleteTransaction)]
    pub fn delete_transaction(&self, id: JsValue) -> Result<js_sys::Promise, JsValue> {
        let id: RecordId = from_js(id)?;
        Ok(promise_of(self.bridge().delete_transaction(id)))
    }

    /// Resolves to an array of partners, or `null`.
    #[wasm_bindgen(js_name = getPartners)]
    pub fn get_partners(&self) -> js_sys::Promise {
        promise_of(self.bridge().get_partners())
    }

    /// Insert or update a partner on the host.
    #[wasm_bindgen(js_name = savePartner)]
    pub fn save_partner(&self, partner: JsValue) -> Result<js_sys::Promise, JsValue> {
        let record = record_from_js(&partner)?;
        Ok(promise_of(self.bridge().save_partner(record)))
    }

    /// Delete a partner by id.
    #[wasm_bindgen(js_name = deletePartner)]
    pub fn delete_partner(&self, id: JsValue) -> Result<js_sys::Promise, JsValue> {
        let id: RecordId = from_js(id)?;
        Ok(promise_of(self.bridge().delete_partner(id)))
    }

    // -------------------------------------------------------------------------
    // Files
    // -------------------------------------------------------------------------

    /// Resolves to `{ success, message?, error? }`. Without a native host the
    /// file is downloaded by the browser.
    #[wasm_bindgen(js_name = saveFile)]
    pub fn save_file(
        &self,
        file_name: String,
        content: String,
        mime_type: Option<String>,
    ) -> js_sys::Promise {
        let mut file = core_bridge::FileSave::new(file_name, content);
        if let Some(mime_type) = mime_type {
            file = file.with_mime_type(mime_type);
        }
        promise_of(self.bridge().save_file_with(file))
    }

    /// Resolves to `{ success, content? }`.
    #[wasm_bindgen(js_name = pickFile)]
    pub fn pick_file(&self) -> js_sys::Promise {
        promise_of(self.bridge().pick_file())
    }

    // -------------------------------------------------------------------------
    // Data management and reminders
    // -------------------------------------------------------------------------

    /// Wipe every record the host stores.
    #[wasm_bindgen(js_name = clearAllData)]
    pub fn clear_all_data(&self) -> js_sys::Promise {
        promise_of(self.bridge().clear_all_data())
    }

    /// Replace the host's records with an exported backup.
    #[wasm_bindgen(js_name = importData)]
    pub fn import_data(&self, content: String) -> js_sys::Promise {
        promise_of(self.bridge().import_data(content))
    }

    /// Open the host's share sheet.
    #[wasm_bindgen(js_name = shareText)]
    pub fn share_text(&self, title: String, text: String) -> js_sys::Promise {
        promise_of(self.bridge().share_text(title, text))
    }

    /// Resolves to `{ success, reminderId? }`.
    #[wasm_bindgen(js_name = scheduleDebtReminder)]
    pub fn schedule_debt_reminder(&self, reminder: JsValue) -> Result<js_sys::Promise, JsValue> {
        let reminder: DebtReminder = from_js(reminder)?;
        Ok(promise_of(self.bridge().schedule_debt_reminder(reminder)))
    }

    /// Cancel a reminder scheduled earlier.
    #[wasm_bindgen(js_name = cancelDebtReminder)]
    pub fn cancel_debt_reminder(&self, reminder_id: String) -> js_sys::Promise {
        promise_of(self.bridge().cancel_debt_reminder(reminder_id))
    }

    // -------------------------------------------------------------------------
    // Fire and forget
    // -------------------------------------------------------------------------

    /// Open `url` outside the app, or in a new tab without a host.
    #[wasm_bindgen(js_name = openExternal)]
    pub fn open_external(&self, url: String) {
        self.bridge().open_external(&url);
    }

    /// Ask the host to close the app.
    #[wasm_bindgen(js_name = exitApp)]
    pub fn exit_app(&self) {
        self.bridge().exit_app();
    }

    // -------------------------------------------------------------------------
    // Navigation, sync and legacy endpoints
    // -------------------------------------------------------------------------

    /// Unwind one level of UI, as for a hardware back press.
    #[wasm_bindgen(js_name = handleBack)]
    pub fn handle_back(&self) -> String {
        back_action_name(self.runtime.handle_back()).to_string()
    }

    /// Resolves to `{ transactions, partners }` (each `null` when local data
    /// should be kept), or `null` without a native host.
    #[wasm_bindgen(js_name = syncOnStartup)]
    pub fn sync_on_startup(&self) -> js_sys::Promise {
        let bridge = Arc::clone(self.bridge());
        promise_of(async move {
            bridge.sync_on_startup().await.map(|snapshot| {
                json!({
                    "transactions": snapshot.transactions,
                    "partners": snapshot.partners,
                })
            })
        })
    }

    /// Route an old REST-style call (`GET /transactions`,
    /// `DELETE /partners/7`, ...) onto the matching operation.
    pub fn fetch(
        &self,
        method: String,
        path: String,
        body: Option<String>,
    ) -> Result<js_sys::Promise, JsValue> {
        let method: HttpMethod = method.parse().map_err(to_js_error)?;
        Ok(promise_of(
            self.bridge().fetch(method, &path, body.as_deref()),
        ))
    }
}

impl JsBridge {
    fn bridge(&self) -> &Arc<NativeBridge> {
        self.runtime.bridge()
    }
}

// =============================================================================
// Module Info
// =============================================================================

/// Get the bridge-wasm version
#[wasm_bindgen(js_name = bridgeWasmVersion)]
pub fn bridge_wasm_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
