//! Interfaces of the external subsystems the shop talks to
//!
//! Wallet management, transaction signing and navigation live outside this
//! workspace. The purchase flow only sees them through these traits.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::types::{
    CardConfig, CreatedInvoice, GiftCard, GiftCardInvoiceParams, Key, PayProTxProposal,
    PayProTxProposalRequest, Recipient, Route, TransactionProposal, Wallet,
};

/// Creates gift card invoices
#[async_trait]
pub trait InvoiceService: Debug + Send + Sync {
    /// Create an invoice for a gift card purchase
    async fn create_gift_card_invoice(
        &self,
        card_config: &CardConfig,
        params: GiftCardInvoiceParams,
    ) -> Result<CreatedInvoice, ServiceError>;
}

/// Redeems purchased gift cards
#[async_trait]
pub trait RedemptionService: Debug + Send + Sync {
    /// Redeem the gift card paid by `invoice_id`; may report `PENDING`
    async fn redeem_gift_card(&self, invoice_id: &str) -> Result<GiftCard, ServiceError>;

    /// Drop what is kept about a purchase that will never be redeemed
    async fn forget_gift_card(&self, invoice_id: &str);
}

/// Builds and discards pay-protocol transaction proposals
#[async_trait]
pub trait TxProposalService: Debug + Send + Sync {
    /// Build a proposal paying the invoice behind `request.payment_url`
    async fn create_pay_pro_tx_proposal(
        &self,
        request: PayProTxProposalRequest,
    ) -> Result<PayProTxProposal, ServiceError>;

    /// Delete a proposal that will never be broadcast
    async fn remove_tx_proposal(
        &self,
        wallet: &Wallet,
        txp: &TransactionProposal,
    ) -> Result<(), ServiceError>;
}

/// Signs and broadcasts transaction proposals
#[async_trait]
pub trait PaymentService: Debug + Send + Sync {
    /// Sign, publish and broadcast `txp`
    async fn send_payment(
        &self,
        txp: &TransactionProposal,
        key: &Key,
        wallet: &Wallet,
        recipient: &Recipient,
    ) -> Result<(), ServiceError>;
}

/// Read access to the keys and wallets of the user
pub trait KeyStore: Debug + Send + Sync {
    /// All keys with their wallets
    fn keys(&self) -> Vec<Key>;

    /// Key by identifier
    fn key(&self, key_id: &str) -> Option<Key> {
        self.keys().into_iter().find(|key| key.id == key_id)
    }
}

/// Screen navigation
pub trait Navigator: Debug + Send + Sync {
    /// Replace the navigation history with `routes`, the last one focused
    fn reset(&self, routes: Vec<Route>);

    /// Leave the current screen
    fn go_back(&self);
}
