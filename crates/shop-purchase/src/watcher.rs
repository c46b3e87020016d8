//! Background confirmation of redeemed gift cards
//!
//! A card redeemed while its payment is still unconfirmed comes back as
//! `PENDING`. The watcher keeps asking for it until it settles, publishing
//! every status change on the shop bus.

use std::sync::Arc;

use shop_common::services::RedemptionService;
use shop_common::{task, GiftCardStatus, ShopEvents};
use tokio::task::JoinHandle;
use tracing::instrument;

use crate::config::ConfirmationConfig;

/// Polls a pending gift card until it leaves `PENDING`
#[derive(Debug, Clone)]
pub struct ConfirmationWatcher {
    redemptions: Arc<dyn RedemptionService>,
    events: ShopEvents,
    config: ConfirmationConfig,
}

impl ConfirmationWatcher {
    /// Create a watcher
    pub fn new(
        redemptions: Arc<dyn RedemptionService>,
        events: ShopEvents,
        config: ConfirmationConfig,
    ) -> Self {
        Self {
            redemptions,
            events,
            config,
        }
    }

    /// Start watching `invoice_id` in a detached task
    ///
    /// The handle resolves to the last status seen, or `None` when every
    /// poll failed.
    pub fn spawn(&self, invoice_id: String) -> JoinHandle<Option<GiftCardStatus>> {
        let watcher = self.clone();
        task::spawn(async move { watcher.wait_for_confirmation(&invoice_id).await })
    }

    /// Poll until the card settles or the attempts run out
    #[instrument(skip(self))]
    pub async fn wait_for_confirmation(&self, invoice_id: &str) -> Option<GiftCardStatus> {
        let mut last_status = self.events.gift_card_status(invoice_id);

        for attempt in 1..=self.config.max_attempts {
            tokio::time::sleep(self.config.poll_interval()).await;

            let gift_card = match self.redemptions.redeem_gift_card(invoice_id).await {
                Ok(gift_card) => gift_card,
                Err(err) => {
                    tracing::warn!(
                        "Confirmation poll {} for {} failed: {}",
                        attempt,
                        invoice_id,
                        err
                    );
                    continue;
                }
            };

            if last_status != Some(gift_card.status) {
                tracing::debug!(
                    "Gift card {} status changed to {}",
                    invoice_id,
                    gift_card.status
                );
                self.events
                    .update_gift_card_status(invoice_id, gift_card.status);
                last_status = Some(gift_card.status);
            }

            if gift_card.status.is_confirmed() {
                tracing::info!(
                    "Gift card {} confirmed as {} after {} polls",
                    invoice_id,
                    gift_card.status,
                    attempt
                );
                return last_status;
            }

            if gift_card.status != GiftCardStatus::Pending {
                tracing::warn!(
                    "Gift card {} settled unconfirmed as {} after {} polls",
                    invoice_id,
                    gift_card.status,
                    attempt
                );
                return last_status;
            }
        }

        tracing::warn!(
            "Gift card {} still pending after {} polls",
            invoice_id,
            self.config.max_attempts
        );

        last_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{gift_card, FakeRedemptions};
    use shop_common::ServiceError;

    fn config(max_attempts: u32) -> ConfirmationConfig {
        ConfirmationConfig {
            poll_interval_ms: 1_000,
            max_attempts,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_once_settled() {
        let redemptions = Arc::new(FakeRedemptions::new(vec![
            Ok(gift_card("inv1", GiftCardStatus::Pending)),
            Err(ServiceError::Custom("temporarily down".to_string())),
            Ok(gift_card("inv1", GiftCardStatus::Success)),
            Ok(gift_card("inv1", GiftCardStatus::Synced)),
        ]));
        let events = ShopEvents::new();
        events.update_gift_card_status("inv1", GiftCardStatus::Pending);

        let watcher = ConfirmationWatcher::new(redemptions.clone(), events.clone(), config(10));
        let status = watcher.spawn("inv1".to_string()).await.expect("task");

        assert_eq!(status, Some(GiftCardStatus::Success));
        assert_eq!(redemptions.calls(), 3);
        assert_eq!(
            events.gift_card_status("inv1"),
            Some(GiftCardStatus::Success)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_on_unconfirmed_outcome() {
        let redemptions = Arc::new(FakeRedemptions::new(vec![
            Ok(gift_card("inv1", GiftCardStatus::Pending)),
            Ok(gift_card("inv1", GiftCardStatus::Failure)),
        ]));
        redemptions.set_default(gift_card("inv1", GiftCardStatus::Success));
        let events = ShopEvents::new();

        let watcher = ConfirmationWatcher::new(redemptions.clone(), events.clone(), config(10));
        let status = watcher.wait_for_confirmation("inv1").await;

        assert_eq!(status, Some(GiftCardStatus::Failure));
        assert!(status.is_some_and(|s| !s.is_confirmed()));
        assert_eq!(redemptions.calls(), 2);
        assert_eq!(
            events.gift_card_status("inv1"),
            Some(GiftCardStatus::Failure)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let redemptions = Arc::new(FakeRedemptions::new(vec![]));
        redemptions.set_default(gift_card("inv1", GiftCardStatus::Pending));
        let events = ShopEvents::new();
        let mut rx = events.subscribe();

        let watcher = ConfirmationWatcher::new(redemptions.clone(), events, config(3));
        let status = watcher.wait_for_confirmation("inv1").await;

        assert_eq!(status, Some(GiftCardStatus::Pending));
        assert_eq!(redemptions.calls(), 3);

        // Only the first observation is a change
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }
}
