//! Screen-local presentation of the purchase flow

use std::fmt::Debug;

use shop_common::KeyWalletsRow;

/// Title of every purchase error notification
pub const ERROR_TITLE: &str = "Error";

/// Single action offered by an error notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    /// Reopen wallet selection; the view calls [`crate::PurchaseFlow::retry`]
    Retry,
}

/// Dismissible notification describing a failed step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotification {
    /// Notification title
    pub title: String,
    /// Resolved user-facing message
    pub message: String,
    /// Action bound to the notification button
    pub action: NotificationAction,
}

impl ErrorNotification {
    /// Error notification with a retry action
    pub fn retry(message: impl Into<String>) -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            message: message.into(),
            action: NotificationAction::Retry,
        }
    }
}

/// Modals and notifications owned by the confirmation screen
pub trait PurchaseView: Debug + Send + Sync {
    /// Present the wallet selector grouped by key
    fn show_wallet_selector(&self, rows: &[KeyWalletsRow]);

    /// Close the wallet selector
    fn hide_wallet_selector(&self);

    /// Tell the user there is no wallet to pay with
    fn show_no_wallets(&self);

    /// Present an error notification
    fn show_error(&self, notification: ErrorNotification);
}
