//! Page-backed environment and screen state
//!
//! The bridge reads native presence from the globals a WebView host injects
//! (`window.isNativeApp`, `window.ReactNativeWebView`). Everything about the
//! page's own UI (theme preference, modal and screen state) comes from a
//! [`PageHooks`] object the page hands over at startup:
//!
//! ```javascript
//! const hooks = {
//!   themePreference: () => state.theme,          // "light" | "dark" | "system"
//!   applyTheme: (systemScheme) => applyTheme(),
//!   closeModal: (elementId) => closeModal(elementId),
//!   closeSettings: () => showScreen('home-screen'),
//!   hasPreviousScreen: () => history.length > 0,
//!   goBack: () => goBack(),
//! };
//! ```
//!
//! Missing hooks are tolerated: queries fall back to a neutral answer and
//! actions are skipped, both with a warning.

use bridge_traits::{ColorScheme, HostEnvironment, Modal, ScreenNavigator, ThemePreference};
use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::error::{document, window, WasmError};

/// Name of the global a WebView host sets to `true` when it embeds the page.
pub const NATIVE_FLAG: &str = "isNativeApp";
/// Name of the global object exposing `postMessage` to the host.
pub const HOST_OBJECT: &str = "ReactNativeWebView";
/// Global mirroring the last system scheme, read by page theme code.
pub const SYSTEM_THEME_GLOBAL: &str = "systemTheme";
/// DOM id of the settings overlay.
pub const SETTINGS_SCREEN_ID: &str = "settings-screen";

#[wasm_bindgen]
extern "C" {
    /// Duck-typed page callbacks, see the module docs.
    #[derive(Clone, Debug)]
    pub type PageHooks;

    #[wasm_bindgen(method, catch, js_name = themePreference)]
    fn theme_preference(this: &PageHooks) -> Result<Option<String>, JsValue>;

    #[wasm_bindgen(method, catch, js_name = applyTheme)]
    fn apply_theme(this: &PageHooks, system_scheme: Option<String>) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = closeModal)]
    fn close_modal(this: &PageHooks, element_id: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = closeSettings)]
    fn close_settings(this: &PageHooks) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = hasPreviousScreen)]
    fn has_previous_screen(this: &PageHooks) -> Result<bool, JsValue>;

    #[wasm_bindgen(method, catch, js_name = goBack)]
    fn go_back(this: &PageHooks) -> Result<(), JsValue>;
}

fn global_flag(name: &str) -> bool {
    window()
        .ok()
        .and_then(|window| js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok())
        .map(|value| value.is_truthy())
        .unwrap_or(false)
}

/// `window.ReactNativeWebView`, when the host injected it.
pub(crate) fn host_object() -> Option<JsValue> {
    let window = window().ok()?;
    let host = js_sys::Reflect::get(&window, &JsValue::from_str(HOST_OBJECT)).ok()?;
    if host.is_undefined() || host.is_null() {
        None
    } else {
        Some(host)
    }
}

fn log_hook_failure(hook: &str, err: JsValue) {
    warn!(hook, error = %WasmError::from(err), "Page hook failed");
}

/// [`HostEnvironment`] over WebView globals and page theme hooks.
#[derive(Debug, Clone)]
pub struct JsHostEnvironment {
    hooks: PageHooks,
}

impl JsHostEnvironment {
    /// Wrap the page's hook object.
    pub fn new(hooks: PageHooks) -> Self {
        Self { hooks }
    }
}

impl HostEnvironment for JsHostEnvironment {
    fn is_native_host_available(&self) -> bool {
        global_flag(NATIVE_FLAG) && host_object().is_some()
    }

    fn theme_preference(&self) -> ThemePreference {
        match self.hooks.theme_preference() {
            Ok(Some(name)) => name.parse().unwrap_or_else(|err: String| {
                warn!(error = %err, "Unknown theme preference; following the system");
                ThemePreference::System
            }),
            Ok(None) => ThemePreference::System,
            Err(err) => {
                log_hook_failure("themePreference", err);
                ThemePreference::System
            }
        }
    }

    fn apply_theme(&self, system_scheme: Option<ColorScheme>) {
        let name = system_scheme.map(|scheme| scheme.as_str().to_string());
        if let Err(err) = self.hooks.apply_theme(name) {
            log_hook_failure("applyTheme", err);
        }
    }

    /// Sets `window.systemTheme` to the host's payload, or `null`.
    fn publish_system_scheme(&self, raw: Option<&str>) {
        let value = raw.map_or(JsValue::NULL, JsValue::from_str);
        let published = window().and_then(|window| {
            js_sys::Reflect::set(&window, &JsValue::from_str(SYSTEM_THEME_GLOBAL), &value)
                .map_err(WasmError::from)
        });
        if let Err(err) = published {
            warn!(error = %err, "Could not publish system theme");
        }
    }
}

/// [`ScreenNavigator`] reading modal and settings state from the DOM.
///
/// A modal is open while its element lacks the `hidden` class; the settings
/// overlay is active while it carries the `active` class. Closing and
/// history are delegated to [`PageHooks`].
#[derive(Debug, Clone)]
pub struct DomScreenNavigator {
    hooks: PageHooks,
}

impl DomScreenNavigator {
    /// Wrap the page's hook object.
    pub fn new(hooks: PageHooks) -> Self {
        Self { hooks }
    }

    fn element_has_class(id: &str, class: &str) -> Option<bool> {
        let element = document().ok()?.get_element_by_id(id)?;
        Some(element.class_list().contains(class))
    }
}

impl ScreenNavigator for DomScreenNavigator {
    fn is_modal_open(&self, modal: Modal) -> bool {
        Self::element_has_class(modal.element_id(), "hidden").map_or(false, |hidden| !hidden)
    }

    fn close_modal(&self, modal: Modal) {
        if let Err(err) = self.hooks.close_modal(modal.element_id()) {
            log_hook_failure("closeModal", err);
        }
    }

    fn is_settings_active(&self) -> bool {
        Self::element_has_class(SETTINGS_SCREEN_ID, "active").unwrap_or(false)
    }

    fn close_settings(&self) {
        if let Err(err) = self.hooks.close_settings() {
            log_hook_failure("closeSettings", err);
        }
    }

    fn has_previous_screen(&self) -> bool {
        self.hooks.has_previous_screen().unwrap_or_else(|err| {
            log_hook_failure("hasPreviousScreen", err);
            false
        })
    }

    fn go_back(&self) {
        if let Err(err) = self.hooks.go_back() {
            log_hook_failure("goBack", err);
        }
    }
}
