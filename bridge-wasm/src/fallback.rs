//! Browser affordances used without a native host

use bridge_traits::error::Result as BridgeResult;
use bridge_traits::BrowserFallback;
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

use crate::error::{document, window, WasmError, WasmResult};

/// Build the `data:` URL a client-side download points at.
pub fn data_url(content: &str, mime_type: &str) -> String {
    let encoded = String::from(js_sys::encode_uri_component(content));
    format!("data:{mime_type};charset=utf-8,{encoded}")
}

/// [`BrowserFallback`] over `window.open` and a temporary download anchor.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowFallback;

impl WindowFallback {
    /// Create the fallback.
    pub fn new() -> Self {
        Self
    }

    fn open(&self, url: &str) -> WasmResult<()> {
        let opened = window()?
            .open_with_url_and_target(url, "_blank")
            .map_err(|err| WasmError::js("window.open", err))?;
        match opened {
            Some(_) => Ok(()),
            None => Err(WasmError::NotAvailable("popup window".to_string())),
        }
    }

    fn download(&self, file_name: &str, content: &str, mime_type: &str) -> WasmResult<()> {
        let document = document()?;
        let body = document
            .body()
            .ok_or_else(|| WasmError::NotAvailable("document.body".to_string()))?;

        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|err| WasmError::js("createElement", err))?
            .dyn_into()
            .map_err(|_| WasmError::JavaScript("<a> is not an anchor element".to_string()))?;
        anchor.set_href(&data_url(content, mime_type));
        anchor.set_download(file_name);

        body.append_child(&anchor)
            .map_err(|err| WasmError::js("appendChild", err))?;
        anchor.click();
        body.remove_child(&anchor)
            .map_err(|err| WasmError::js("removeChild", err))?;
        Ok(())
    }
}

impl BrowserFallback for WindowFallback {
    fn open_url(&self, url: &str) -> BridgeResult<()> {
        Ok(self.open(url)?)
    }

    fn download_file(&self, file_name: &str, content: &str, mime_type: &str) -> BridgeResult<()> {
        Ok(self.download(file_name, content, mime_type)?)
    }
}
