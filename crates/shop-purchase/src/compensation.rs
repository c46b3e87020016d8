//! Compensating actions of a failed submission
//!
//! Registered as submission steps complete and executed in reverse order
//! (LIFO) when a later step fails. Each action is best effort: a failing
//! compensation is logged and the remaining ones still run.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use shop_common::services::{RedemptionService, TxProposalService};
use shop_common::{GiftCardStatus, ServiceError, ShopEvents, TransactionProposal, Wallet};
use tracing::instrument;

/// Undo action for a completed submission step
#[async_trait]
pub trait CompensatingAction: Send + Sync {
    /// Run the action
    async fn execute(&self) -> Result<(), ServiceError>;

    /// Name used in logs
    fn name(&self) -> &'static str;
}

/// Pending compensations, most recent first
pub type Compensations = VecDeque<Box<dyn CompensatingAction>>;

/// Register a compensation so it runs before the ones registered earlier
pub fn add_compensation(compensations: &mut Compensations, action: Box<dyn CompensatingAction>) {
    compensations.push_front(action);
}

/// Run and drain all compensations
pub async fn compensate_all(compensations: &mut Compensations) {
    if compensations.is_empty() {
        return;
    }

    tracing::warn!("Running {} compensating actions", compensations.len());

    while let Some(compensation) = compensations.pop_front() {
        tracing::debug!("Running compensation: {}", compensation.name());
        if let Err(e) = compensation.execute().await {
            tracing::error!(
                "Compensation {} failed: {}. Continuing...",
                compensation.name(),
                e
            );
        }
    }
}

/// Revert a gift card marked `PENDING` back to `UNREDEEMED`
#[derive(Debug)]
pub struct MarkGiftCardUnredeemed {
    /// Bus observers track statuses through
    pub events: ShopEvents,
    /// Invoice of the card
    pub invoice_id: String,
}

#[async_trait]
impl CompensatingAction for MarkGiftCardUnredeemed {
    #[instrument(skip_all)]
    async fn execute(&self) -> Result<(), ServiceError> {
        tracing::info!(
            "Compensation: Marking gift card {} as unredeemed",
            self.invoice_id
        );

        self.events
            .update_gift_card_status(&self.invoice_id, GiftCardStatus::Unredeemed);

        Ok(())
    }

    fn name(&self) -> &'static str {
        "MarkGiftCardUnredeemed"
    }
}

/// Delete a transaction proposal that will never be sent
#[derive(Debug)]
pub struct RemoveTxProposal {
    /// Proposal service
    pub proposals: Arc<dyn TxProposalService>,
    /// Wallet owning the proposal
    pub wallet: Wallet,
    /// Orphaned proposal
    pub txp: TransactionProposal,
}

#[async_trait]
impl CompensatingAction for RemoveTxProposal {
    #[instrument(skip_all)]
    async fn execute(&self) -> Result<(), ServiceError> {
        tracing::info!(
            "Compensation: Removing transaction proposal {} of wallet {}",
            self.txp.id,
            self.wallet.id
        );

        self.proposals
            .remove_tx_proposal(&self.wallet, &self.txp)
            .await
    }

    fn name(&self) -> &'static str {
        "RemoveTxProposal"
    }
}

/// Release what the redemption service keeps about an abandoned purchase
#[derive(Debug)]
pub struct ForgetGiftCardPurchase {
    /// Redemption service holding the purchase
    pub redemptions: Arc<dyn RedemptionService>,
    /// Invoice of the purchase
    pub invoice_id: String,
}

#[async_trait]
impl CompensatingAction for ForgetGiftCardPurchase {
    #[instrument(skip_all)]
    async fn execute(&self) -> Result<(), ServiceError> {
        tracing::info!(
            "Compensation: Forgetting gift card purchase {}",
            self.invoice_id
        );

        self.redemptions.forget_gift_card(&self.invoice_id).await;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "ForgetGiftCardPurchase"
    }
}
