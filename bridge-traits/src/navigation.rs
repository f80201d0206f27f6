//! Screen and modal state of the surrounding application.
//!
//! The back handler walks a fixed priority chain over this state. The
//! application's rendering layer implements the trait; the bridge only asks
//! questions and requests closes.

use crate::platform::PlatformSendSync;

/// Modals that participate in back navigation, in closing priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modal {
    /// Confirmation dialog
    Confirm,
    /// Transaction editor
    TransactionEditor,
    /// Quick-add sheet
    QuickAdd,
}

impl Modal {
    /// Priority order used by back navigation, topmost first.
    pub const BACK_ORDER: [Modal; 3] = [Modal::Confirm, Modal::TransactionEditor, Modal::QuickAdd];

    /// DOM-facing name of the modal container.
    pub fn element_id(&self) -> &'static str {
        match self {
            Modal::Confirm => "confirm-modal",
            Modal::TransactionEditor => "transaction-modal",
            Modal::QuickAdd => "quick-add",
        }
    }
}

/// Accessor and actions over the application's screen/modal state.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::navigation::{Modal, ScreenNavigator};
///
/// fn dismiss_confirm(screens: &dyn ScreenNavigator) {
///     if screens.is_modal_open(Modal::Confirm) {
///         screens.close_modal(Modal::Confirm);
///     }
/// }
/// ```
pub trait ScreenNavigator: PlatformSendSync {
    /// Whether the given modal is currently visible.
    fn is_modal_open(&self, modal: Modal) -> bool;

    /// Close the given modal.
    fn close_modal(&self, modal: Modal);

    /// Whether the settings screen is the active screen.
    fn is_settings_active(&self) -> bool;

    /// Close the settings screen.
    fn close_settings(&self);

    /// Whether a previous (non-home) screen exists in the history.
    fn has_previous_screen(&self) -> bool;

    /// Navigate to the previous screen.
    fn go_back(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_order_is_topmost_first() {
        assert_eq!(Modal::BACK_ORDER[0], Modal::Confirm);
        assert_eq!(Modal::BACK_ORDER[1], Modal::TransactionEditor);
        assert_eq!(Modal::BACK_ORDER[2], Modal::QuickAdd);
    }

    #[test]
    fn test_element_ids() {
        assert_eq!(Modal::Confirm.element_id(), "confirm-modal");
        assert_eq!(Modal::TransactionEditor.element_id(), "transaction-modal");
        assert_eq!(Modal::QuickAdd.element_id(), "quick-add");
    }
}
