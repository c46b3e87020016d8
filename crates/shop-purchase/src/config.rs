//! Purchase flow settings

use std::time::Duration;

use serde::{Deserialize, Serialize};
use shop_common::Network;

/// Timings and environment of the purchase flow
///
/// The delays only sequence UI transitions, e.g. letting a dismissed modal
/// animate out before the next one opens. They carry no correctness
/// guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseConfig {
    /// Network of the wallets offered and of the payment URL host
    pub network: Network,
    /// Pause between closing one modal and opening the next
    pub modal_transition_ms: u64,
    /// Pause between dismissing the selector and leaving the screen
    pub backdrop_dismiss_ms: u64,
    /// Pause after redemption before the progress overlay closes
    pub redeem_settle_ms: u64,
    /// Pause before an error notification is shown
    pub error_notification_ms: u64,
    /// Background confirmation polling
    pub confirmation: ConfirmationConfig,
}

impl Default for PurchaseConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            modal_transition_ms: 400,
            backdrop_dismiss_ms: 100,
            redeem_settle_ms: 200,
            error_notification_ms: 500,
            confirmation: ConfirmationConfig::default(),
        }
    }
}

impl PurchaseConfig {
    pub(crate) fn modal_transition(&self) -> Duration {
        Duration::from_millis(self.modal_transition_ms)
    }

    pub(crate) fn backdrop_dismiss(&self) -> Duration {
        Duration::from_millis(self.backdrop_dismiss_ms)
    }

    pub(crate) fn redeem_settle(&self) -> Duration {
        Duration::from_millis(self.redeem_settle_ms)
    }

    pub(crate) fn error_notification(&self) -> Duration {
        Duration::from_millis(self.error_notification_ms)
    }
}

/// Polling of a redeemed card until it leaves `PENDING`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    /// Delay before each poll
    pub poll_interval_ms: u64,
    /// Polls before giving up
    pub max_attempts: u32,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 3_000,
            max_attempts: 20,
        }
    }
}

impl ConfirmationConfig {
    pub(crate) fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
