//! Gift card purchase confirmation flow
//!
//! Drives one purchase attempt from wallet selection to the gift card
//! details screen.
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | Wallet selection | Wallets of the configured network, grouped by key |
//! | Proposal creation | Gift card invoice, then a pay-protocol transaction proposal |
//! | Confirmation | Summary shown until the user swipes to send |
//! | Submission | Card marked `PENDING`, payment sent, card redeemed |
//! | Completion | Navigation reset to the card; pending cards watched in the background |
//!
//! A failed submission is rolled back through compensating actions: the
//! card goes back to `UNREDEEMED`, the orphaned proposal is removed and the
//! redemption service forgets the purchase. A completed or cancelled flow
//! rejects further operations with [`Error::Finished`].

use std::sync::Arc;

use shop_common::services::{
    InvoiceService, KeyStore, Navigator, PaymentService, RedemptionService, TxProposalService,
};
use shop_common::util::format_fiat_amount;
use shop_common::{
    CardConfig, GiftCard, GiftCardDiscount, GiftCardInvoiceParams, GiftCardStatus,
    KeyWalletsRow, PayProTxProposal, PayProTxProposalRequest, ProcessMessage, Recipient, Route,
    ServiceError, ShopEvent, ShopEvents, TxProposalCustomData, Wallet,
};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::instrument;
use uuid::Uuid;

use crate::compensation::{
    add_compensation, compensate_all, Compensations, ForgetGiftCardPurchase,
    MarkGiftCardUnredeemed, RemoveTxProposal,
};
use crate::config::PurchaseConfig;
use crate::error::{
    proposal_error_fallback, resolve_error_message, Error, Result, SEND_FAILED_MESSAGE,
};
use crate::in_flight::InFlightPurchases;
use crate::state::{FlowState, PurchaseSummary, ReadyProposal, ResumeState};
use crate::view::{ErrorNotification, PurchaseView};
use crate::watcher::ConfirmationWatcher;


/// Custom data service tag of gift card proposals
const GIFT_CARD_SERVICE: &str = "giftcards";

/// What is being bought
#[derive(Debug, Clone)]
pub struct PurchaseRequest {
    /// Face value in `card_config.currency`
    pub amount: f64,
    /// Product
    pub card_config: CardConfig,
    /// Discounts to apply
    pub discounts: Vec<GiftCardDiscount>,
    /// Selection carried over from an earlier visit
    pub resume: ResumeState,
}

/// Collaborators of a purchase flow
#[derive(Debug, Clone)]
pub struct FlowServices {
    /// Keys and wallets of the user
    pub key_store: Arc<dyn KeyStore>,
    /// Gift card invoices
    pub invoices: Arc<dyn InvoiceService>,
    /// Pay-protocol proposals
    pub proposals: Arc<dyn TxProposalService>,
    /// Payment submission
    pub payments: Arc<dyn PaymentService>,
    /// Gift card redemption
    pub redemptions: Arc<dyn RedemptionService>,
    /// Screen navigation
    pub navigator: Arc<dyn Navigator>,
    /// Confirmation screen modals
    pub view: Arc<dyn PurchaseView>,
    /// Shop state bus
    pub events: ShopEvents,
    /// Invoices being submitted by any flow
    pub in_flight: InFlightPurchases,
}

/// One gift card purchase attempt
///
/// Every operation takes `&mut self`; the flow has a single driver.
#[derive(Debug)]
pub struct PurchaseFlow {
    id: Uuid,
    request: PurchaseRequest,
    services: FlowServices,
    config: PurchaseConfig,
    state: FlowState,
    selector_visible: bool,
    confirmation: Option<JoinHandle<Option<GiftCardStatus>>>,
}

impl PurchaseFlow {
    /// Create a flow; nothing happens until [`PurchaseFlow::start`]
    pub fn new(request: PurchaseRequest, services: FlowServices, config: PurchaseConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
            services,
            config,
            state: FlowState::Unselected,
            selector_visible: false,
            confirmation: None,
        }
    }

    /// Current state
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Whether the wallet selector is open
    pub fn is_selector_visible(&self) -> bool {
        self.selector_visible
    }

    /// Handle of the background confirmation started by the last purchase
    pub fn take_confirmation_task(&mut self) -> Option<JoinHandle<Option<GiftCardStatus>>> {
        self.confirmation.take()
    }

    /// Resume a complete earlier selection or ask for a wallet
    #[instrument(skip(self), fields(operation_id = %self.id))]
    pub fn start(&mut self) -> Result<()> {
        match self.resumed_proposal() {
            Some(ready) => {
                tracing::debug!(
                    "Resuming proposal {} for invoice {}",
                    ready.txp.id,
                    ready.invoice_id
                );
                self.state = FlowState::Ready(Box::new(ready));
                Ok(())
            }
            None => self.open_wallet_selector(),
        }
    }

    /// Open the wallet selector, unless it is already open
    pub fn open_wallet_selector(&mut self) -> Result<()> {
        self.ensure_not_finished()?;

        let rows = self.key_wallet_rows();

        if rows.is_empty() {
            tracing::info!("No {} wallets to pay with", self.config.network);
            self.services.view.show_no_wallets();
            return Err(Error::NoWallets);
        }

        if self.selector_visible {
            return Ok(());
        }

        self.selector_visible = true;
        self.services.view.show_wallet_selector(&rows);

        Ok(())
    }

    /// Reopen wallet selection after an error notification
    pub async fn retry(&mut self) -> Result<()> {
        self.ensure_not_finished()?;
        sleep(self.config.modal_transition()).await;
        self.open_wallet_selector()
    }

    /// Close the selector; leaves the screen when nothing was quoted yet
    pub async fn dismiss_wallet_selector(&mut self) {
        self.hide_wallet_selector();

        if !matches!(self.state, FlowState::Unselected | FlowState::Failed { .. }) {
            return;
        }

        sleep(self.config.backdrop_dismiss()).await;
        self.services.navigator.go_back();
        self.state = FlowState::Cancelled;

        tracing::debug!("Gift card purchase {} cancelled", self.id);
    }

    /// Create an invoice and a transaction proposal paid from `wallet`
    ///
    /// Selecting again after a proposal exists replaces it. On failure the
    /// flow reverts to [`FlowState::Unselected`] and a retry notification
    /// is shown.
    #[instrument(skip_all, fields(operation_id = %self.id, wallet_id = %wallet.id))]
    pub async fn select_wallet(&mut self, wallet: Wallet) -> Result<()> {
        self.ensure_not_finished()?;

        if let FlowState::Submitting { invoice_id } = &self.state {
            return Err(Error::PurchaseInProgress(invoice_id.clone()));
        }

        self.hide_wallet_selector();
        sleep(self.config.modal_transition()).await;
        self.services
            .events
            .show_progress(ProcessMessage::FetchingPaymentInfo);

        let replaces_proposal = self.state.has_proposal();
        self.state = FlowState::ProposalPending {
            wallet: wallet.clone(),
        };
        if replaces_proposal {
            self.services.events.publish(ShopEvent::UnsoldGiftCardsDeleted);
        }

        let result = self.create_proposal(&wallet).await;

        sleep(self.config.modal_transition()).await;
        self.services.events.dismiss_progress();

        match result {
            Ok(ready) => {
                tracing::info!(
                    "Created proposal {} for invoice {}",
                    ready.txp.id,
                    ready.invoice_id
                );
                self.state = FlowState::Ready(Box::new(ready));
                Ok(())
            }
            Err(err) => {
                tracing::error!("Could not create gift card proposal: {}", err);

                let message = match &err {
                    Error::ProposalCreation(source) => {
                        resolve_error_message(source, proposal_error_fallback(source))
                    }
                    other => other.to_string(),
                };

                self.state = FlowState::Unselected;
                sleep(self.config.error_notification()).await;
                self.services
                    .view
                    .show_error(ErrorNotification::retry(message));

                Err(err)
            }
        }
    }

    /// Summary of the proposal awaiting confirmation
    pub fn summary(&self) -> Option<PurchaseSummary> {
        let ready = self.state.ready()?;
        let currency = &self.request.card_config.currency;

        Some(PurchaseSummary {
            sending_from: ready.tx_details.sending_from.clone(),
            discount: ready
                .total_discount
                .filter(|discount| *discount > 0.0)
                .map(|discount| format!("- {}", format_fiat_amount(discount, currency))),
            network_cost: ready.tx_details.network_cost.clone(),
            miner_fee: ready.tx_details.fee.clone(),
            total: ready.tx_details.total.clone(),
            terms: self.request.card_config.terms.clone(),
        })
    }

    /// Send the payment and redeem the gift card
    ///
    /// On success the navigation is reset to the card details. A card that
    /// is still `PENDING` is watched in the background; see
    /// [`PurchaseFlow::take_confirmation_task`].
    #[instrument(skip(self), fields(operation_id = %self.id))]
    pub async fn confirm(&mut self) -> Result<GiftCard> {
        self.ensure_not_finished()?;

        let ready = match &self.state {
            FlowState::Ready(ready) => ready.as_ref().clone(),
            _ => return Err(Error::NotReady),
        };

        let _guard = self
            .services
            .in_flight
            .claim(&ready.invoice_id)
            .ok_or_else(|| Error::PurchaseInProgress(ready.invoice_id.clone()))?;

        self.state = FlowState::Submitting {
            invoice_id: ready.invoice_id.clone(),
        };

        let mut compensations = Compensations::new();

        match self.submit(&ready, &mut compensations).await {
            Ok(gift_card) => Ok(self.complete(gift_card)),
            Err(err) => {
                tracing::error!(
                    "Gift card purchase for invoice {} failed: {}",
                    ready.invoice_id,
                    err
                );

                compensate_all(&mut compensations).await;

                self.services.events.dismiss_progress();
                sleep(self.config.modal_transition()).await;

                let message = resolve_error_message(&err, SEND_FAILED_MESSAGE);
                self.state = FlowState::Failed {
                    reason: message.clone(),
                };
                self.services
                    .view
                    .show_error(ErrorNotification::retry(message.clone()));

                Err(Error::PaymentFailed {
                    message,
                    source: err,
                })
            }
        }
    }

    async fn submit(
        &self,
        ready: &ReadyProposal,
        compensations: &mut Compensations,
    ) -> std::result::Result<GiftCard, ServiceError> {
        let events = &self.services.events;

        add_compensation(
            compensations,
            Box::new(ForgetGiftCardPurchase {
                redemptions: Arc::clone(&self.services.redemptions),
                invoice_id: ready.invoice_id.clone(),
            }),
        );
        add_compensation(
            compensations,
            Box::new(RemoveTxProposal {
                proposals: Arc::clone(&self.services.proposals),
                wallet: ready.wallet.clone(),
                txp: ready.txp.clone(),
            }),
        );

        events.show_progress(ProcessMessage::SendingPayment);
        sleep(self.config.modal_transition()).await;

        events.update_gift_card_status(&ready.invoice_id, GiftCardStatus::Pending);
        add_compensation(
            compensations,
            Box::new(MarkGiftCardUnredeemed {
                events: events.clone(),
                invoice_id: ready.invoice_id.clone(),
            }),
        );

        self.services
            .payments
            .send_payment(&ready.txp, &ready.key, &ready.wallet, &ready.recipient)
            .await?;

        tracing::debug!("Payment for invoice {} sent", ready.invoice_id);

        events.show_progress(ProcessMessage::GeneratingGiftCard);
        let gift_card = self
            .services
            .redemptions
            .redeem_gift_card(&ready.invoice_id)
            .await?;

        sleep(self.config.redeem_settle()).await;
        events.dismiss_progress();
        sleep(self.config.modal_transition()).await;

        Ok(gift_card)
    }

    fn complete(&mut self, gift_card: GiftCard) -> GiftCard {
        tracing::info!(
            "Gift card {} redeemed with status {}",
            gift_card.invoice_id,
            gift_card.status
        );

        if gift_card.status == GiftCardStatus::Pending {
            let watcher = ConfirmationWatcher::new(
                Arc::clone(&self.services.redemptions),
                self.services.events.clone(),
                self.config.confirmation.clone(),
            );
            self.confirmation = Some(watcher.spawn(gift_card.invoice_id.clone()));
        } else {
            self.services
                .events
                .update_gift_card_status(&gift_card.invoice_id, gift_card.status);
        }

        self.services.navigator.reset(vec![
            Route::Shop,
            Route::GiftCardDetails {
                gift_card: gift_card.clone(),
                card_config: self.request.card_config.clone(),
            },
        ]);

        self.state = FlowState::Completed {
            gift_card: gift_card.clone(),
        };

        gift_card
    }

    async fn create_proposal(&self, wallet: &Wallet) -> Result<ReadyProposal> {
        let key = self
            .services
            .key_store
            .key(&wallet.key_id)
            .ok_or_else(|| Error::KeyNotFound(wallet.key_id.clone()))?;

        let PurchaseRequest {
            amount,
            card_config,
            discounts,
            ..
        } = &self.request;

        let params = GiftCardInvoiceParams {
            amount: *amount,
            brand: card_config.name.clone(),
            currency: card_config.currency.clone(),
            client_id: wallet.id.clone(),
            discounts: discounts.iter().map(|d| d.code.clone()).collect(),
            transaction_currency: wallet.currency_abbreviation.to_uppercase(),
        };

        let created = self
            .services
            .invoices
            .create_gift_card_invoice(card_config, params)
            .await
            .map_err(Error::ProposalCreation)?;

        let payment_url = format!(
            "{}/i/{}",
            self.config.network.base_url(),
            created.invoice_id
        );

        let request = PayProTxProposalRequest {
            wallet: wallet.clone(),
            payment_url,
            invoice: created.invoice,
            invoice_id: created.invoice_id.clone(),
            message: format!(
                "{} Gift Card",
                format_fiat_amount(*amount, &card_config.currency)
            ),
            custom_data: TxProposalCustomData {
                gift_card_name: card_config.name.clone(),
                service: GIFT_CARD_SERVICE.to_string(),
            },
        };

        let PayProTxProposal { tx_details, txp } = self
            .services
            .proposals
            .create_pay_pro_tx_proposal(request)
            .await
            .map_err(Error::ProposalCreation)?;

        Ok(ReadyProposal {
            wallet: wallet.clone(),
            key,
            invoice_id: created.invoice_id,
            recipient: Recipient::from(&tx_details),
            txp,
            tx_details,
            total_discount: created.total_discount,
        })
    }

    /// Proposal rebuilt from the resume payload when nothing is missing
    fn resumed_proposal(&self) -> Option<ReadyProposal> {
        let ResumeState {
            wallet,
            recipient,
            txp,
            tx_details,
        } = self.request.resume.clone();

        let (wallet, recipient, txp, tx_details) = (wallet?, recipient?, txp?, tx_details?);
        let invoice_id = txp.invoice_id.clone()?;
        let key = self.services.key_store.key(&wallet.key_id)?;

        Some(ReadyProposal {
            wallet,
            key,
            invoice_id,
            txp,
            tx_details,
            recipient,
            total_discount: None,
        })
    }

    fn key_wallet_rows(&self) -> Vec<KeyWalletsRow> {
        self.services
            .key_store
            .keys()
            .into_iter()
            .filter_map(|key| {
                let wallets: Vec<Wallet> = key
                    .wallets
                    .into_iter()
                    .filter(|w| w.network == self.config.network && !w.hide_wallet)
                    .collect();

                (!wallets.is_empty()).then(|| KeyWalletsRow {
                    key_id: key.id,
                    key_name: key.key_name,
                    wallets,
                })
            })
            .collect()
    }

    /// A completed or cancelled flow never starts another purchase
    fn ensure_not_finished(&self) -> Result<()> {
        if self.state.is_terminal() {
            tracing::warn!("Purchase flow {} has already finished", self.id);
            return Err(Error::Finished);
        }
        Ok(())
    }

    fn hide_wallet_selector(&mut self) {
        if self.selector_visible {
            self.selector_visible = false;
            self.services.view.hide_wallet_selector();
        }
    }
}

impl Drop for PurchaseFlow {
    fn drop(&mut self) {
        self.services.events.publish(ShopEvent::UnsoldGiftCardsDeleted);
    }
}
