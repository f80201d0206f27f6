//! Hardware back handling
//!
//! A `GO_BACK` notification unwinds exactly one level of UI, in this order:
//!
//! 1. the topmost open modal ([`Modal::BACK_ORDER`]: confirmation, then the
//!    transaction editor, then quick-add)
//! 2. the settings screen, if active
//! 3. the previous screen, if there is history
//! 4. otherwise ask the native host to exit the app
//!
//! Step 4 is only taken with a native host present; in a plain browser the
//! press does nothing.

use bridge_traits::{Modal, ScreenNavigator};
use std::sync::Arc;
use tracing::debug;

use crate::bridge::NativeBridge;

/// Which step of the back chain ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    ClosedModal(Modal),
    ClosedSettings,
    NavigatedBack,
    /// `EXIT_APP` was sent to the host.
    ExitRequested,
    /// Nothing to unwind and no host to exit.
    Unhandled,
}

pub struct BackNavigator {
    screens: Arc<dyn ScreenNavigator>,
    bridge: Arc<NativeBridge>,
}

impl BackNavigator {
    pub fn new(screens: Arc<dyn ScreenNavigator>, bridge: Arc<NativeBridge>) -> Self {
        Self { screens, bridge }
    }

    pub fn handle_back(&self) -> BackAction {
        let action = self.unwind();
        debug!(?action, "Handled back press");
        action
    }

    fn unwind(&self) -> BackAction {
        if let Some(modal) = Modal::BACK_ORDER
            .into_iter()
            .find(|modal| self.screens.is_modal_open(*modal))
        {
            self.screens.close_modal(modal);
            return BackAction::ClosedModal(modal);
        }

        if self.screens.is_settings_active() {
            self.screens.close_settings();
            return BackAction::ClosedSettings;
        }

        if self.screens.has_previous_screen() {
            self.screens.go_back();
            return BackAction::NavigatedBack;
        }

        if self.bridge.is_native_host_available() {
            self.bridge.exit_app();
            BackAction::ExitRequested
        } else {
            BackAction::Unhandled
        }
    }
}

impl std::fmt::Debug for BackNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackNavigator").finish_non_exhaustive()
    }
}
