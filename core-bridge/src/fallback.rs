//! Behavior when no native host is present
//!
//! | Operation | Fallback |
//! |-----------|----------|
//! | record GET/SAVE/DELETE, data and reminder ops | absent result |
//! | `OPEN_EXTERNAL` | open in a new browsing context |
//! | `SAVE_FILE` | client-side download, `{ success: true }` |
//! | `PICK_FILE` | `{ success: false }` |
//! | `EXIT_APP` | nothing |
//!
//! Browser failures never surface as errors; they are logged and reported
//! through the operation result where one exists.

use bridge_traits::BrowserFallback;
use core_runtime::logging::strip_path;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::models::{FileSave, OperationResult};

pub struct FallbackStrategies {
    browser: Arc<dyn BrowserFallback>,
    default_mime_type: String,
}

impl FallbackStrategies {
    pub fn new(browser: Arc<dyn BrowserFallback>, default_mime_type: impl Into<String>) -> Self {
        Self {
            browser,
            default_mime_type: default_mime_type.into(),
        }
    }

    pub fn open_external(&self, url: &str) {
        if let Err(err) = self.browser.open_url(url) {
            warn!(error = %err, "Browser refused to open external link");
        }
    }

    pub fn save_file(&self, file: &FileSave) -> OperationResult {
        let mime_type = file
            .mime_type
            .as_deref()
            .unwrap_or(&self.default_mime_type);

        match self
            .browser
            .download_file(&file.file_name, &file.content, mime_type)
        {
            Ok(()) => {
                debug!(file = %strip_path(&file.file_name), mime_type, "Started browser download");
                OperationResult::succeeded()
            }
            Err(err) => {
                warn!(file = %strip_path(&file.file_name), error = %err, "Browser download failed");
                OperationResult::failed()
            }
        }
    }

    pub fn pick_file(&self) -> OperationResult {
        debug!("File picking needs a native host");
        OperationResult::failed()
    }
}

impl std::fmt::Debug for FallbackStrategies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackStrategies")
            .field("default_mime_type", &self.default_mime_type)
            .finish_non_exhaustive()
    }
}
