//! Recording fakes of the flow collaborators

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shop_common::services::{
    InvoiceService, KeyStore, Navigator, PaymentService, RedemptionService, TxProposalService,
};
use shop_common::{
    CardConfig, CreatedInvoice, DisplayAmount, GiftCard, GiftCardInvoiceParams, GiftCardStatus,
    Invoice, Key, KeyWalletsRow, Network, PayProTxProposal, PayProTxProposalRequest, Recipient,
    Route, SendingFrom, SendingTo, ServiceError, ShopEvents, TransactionProposal, TxDetails,
    Wallet, WalletBalance,
};

use crate::in_flight::InFlightPurchases;
use crate::view::{ErrorNotification, PurchaseView};
use crate::FlowServices;

pub const RECIPIENT_ADDRESS: &str = "bc1qshoprecipient";

pub fn wallet(id: &str, key_id: &str, network: Network) -> Wallet {
    Wallet {
        id: id.to_string(),
        key_id: key_id.to_string(),
        currency_abbreviation: "btc".to_string(),
        wallet_name: format!("Wallet {id}"),
        network,
        balance: WalletBalance {
            sat: 1_000_000,
            crypto: "0.01".to_string(),
            fiat: 600.0,
        },
        hide_wallet: false,
    }
}

pub fn key(id: &str, wallets: Vec<Wallet>) -> Key {
    Key {
        id: id.to_string(),
        key_name: format!("Key {id}"),
        wallets,
    }
}

pub fn card_config() -> CardConfig {
    CardConfig {
        name: "amazon".to_string(),
        display_name: "Amazon.com".to_string(),
        currency: "USD".to_string(),
        icon: "https://example.com/amazon.png".to_string(),
        terms: "Redeemable on amazon.com only".to_string(),
    }
}

pub fn gift_card(invoice_id: &str, status: GiftCardStatus) -> GiftCard {
    GiftCard {
        invoice_id: invoice_id.to_string(),
        brand: "amazon".to_string(),
        amount: 25.0,
        currency: "USD".to_string(),
        status,
        claim_code: None,
        pin: None,
        total_discount: None,
        date: "2024-01-01T00:00:00.000Z".to_string(),
    }
}

fn display(crypto: &str, fiat: &str) -> DisplayAmount {
    DisplayAmount {
        crypto_amount: crypto.to_string(),
        fiat_amount: fiat.to_string(),
    }
}

pub fn tx_details(wallet: &Wallet) -> TxDetails {
    TxDetails {
        fee: display("0.00001 BTC", "$0.60"),
        network_cost: Some(display("0.000005 BTC", "$0.30")),
        sending_from: SendingFrom {
            wallet_name: wallet.wallet_name.clone(),
            currency_abbreviation: wallet.currency_abbreviation.clone(),
        },
        sending_to: SendingTo {
            recipient_address: RECIPIENT_ADDRESS.to_string(),
        },
        total: display("0.00043 BTC", "$25.90"),
    }
}

pub fn txp(id: &str, wallet: &Wallet, invoice_id: &str) -> TransactionProposal {
    TransactionProposal {
        id: id.to_string(),
        wallet_id: wallet.id.clone(),
        amount: 42_000,
        fee: 1_000,
        invoice_id: Some(invoice_id.to_string()),
        pay_pro_url: None,
        message: "$25.00 Gift Card".to_string(),
        custom_data: None,
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().expect("fake lock")
}

#[derive(Debug, Default)]
pub struct FakeKeyStore {
    pub keys: Vec<Key>,
}

impl KeyStore for FakeKeyStore {
    fn keys(&self) -> Vec<Key> {
        self.keys.clone()
    }
}

#[derive(Debug, Default)]
pub struct FakeInvoices {
    pub calls: Mutex<Vec<GiftCardInvoiceParams>>,
    pub failure: Mutex<Option<ServiceError>>,
    pub total_discount: Option<f64>,
}

impl FakeInvoices {
    pub fn fail_next(&self, err: ServiceError) {
        *lock(&self.failure) = Some(err);
    }

    pub fn calls(&self) -> Vec<GiftCardInvoiceParams> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl InvoiceService for FakeInvoices {
    async fn create_gift_card_invoice(
        &self,
        _card_config: &CardConfig,
        params: GiftCardInvoiceParams,
    ) -> Result<CreatedInvoice, ServiceError> {
        let mut calls = lock(&self.calls);
        calls.push(params);

        if let Some(err) = lock(&self.failure).take() {
            return Err(err);
        }

        let invoice_id = format!("inv{}", calls.len());
        Ok(CreatedInvoice {
            invoice: Invoice {
                id: invoice_id.clone(),
                url: None,
                status: Some("new".to_string()),
                price: Some(25.0),
                currency: Some("USD".to_string()),
                extra: Default::default(),
            },
            invoice_id,
            total_discount: self.total_discount,
        })
    }
}

#[derive(Debug, Default)]
pub struct FakeProposals {
    pub requests: Mutex<Vec<PayProTxProposalRequest>>,
    pub removed: Mutex<Vec<String>>,
    pub create_failure: Mutex<Option<ServiceError>>,
    pub fail_removal: bool,
}

impl FakeProposals {
    pub fn requests(&self) -> Vec<PayProTxProposalRequest> {
        lock(&self.requests).clone()
    }

    pub fn removed(&self) -> Vec<String> {
        lock(&self.removed).clone()
    }
}

#[async_trait]
impl TxProposalService for FakeProposals {
    async fn create_pay_pro_tx_proposal(
        &self,
        request: PayProTxProposalRequest,
    ) -> Result<PayProTxProposal, ServiceError> {
        lock(&self.requests).push(request.clone());

        if let Some(err) = lock(&self.create_failure).take() {
            return Err(err);
        }

        Ok(PayProTxProposal {
            tx_details: tx_details(&request.wallet),
            txp: txp(
                &format!("txp-{}", request.invoice_id),
                &request.wallet,
                &request.invoice_id,
            ),
        })
    }

    async fn remove_tx_proposal(
        &self,
        _wallet: &Wallet,
        txp: &TransactionProposal,
    ) -> Result<(), ServiceError> {
        lock(&self.removed).push(txp.id.clone());

        if self.fail_removal {
            Err(ServiceError::Custom("proposal already removed".to_string()))
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Default)]
pub struct FakePayments {
    pub sent: Mutex<Vec<(String, Recipient)>>,
    pub failure: Mutex<Option<ServiceError>>,
}

impl FakePayments {
    pub fn fail_next(&self, err: ServiceError) {
        *lock(&self.failure) = Some(err);
    }

    pub fn sent(&self) -> Vec<(String, Recipient)> {
        lock(&self.sent).clone()
    }
}

#[async_trait]
impl PaymentService for FakePayments {
    async fn send_payment(
        &self,
        txp: &TransactionProposal,
        _key: &Key,
        _wallet: &Wallet,
        recipient: &Recipient,
    ) -> Result<(), ServiceError> {
        lock(&self.sent).push((txp.id.clone(), recipient.clone()));

        match lock(&self.failure).take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Answers queued responses, then the default card
#[derive(Debug, Default)]
pub struct FakeRedemptions {
    responses: Mutex<VecDeque<Result<GiftCard, ServiceError>>>,
    default: Mutex<Option<GiftCard>>,
    calls: AtomicUsize,
    forgotten: Mutex<Vec<String>>,
}

impl FakeRedemptions {
    pub fn new(responses: Vec<Result<GiftCard, ServiceError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Default::default()
        }
    }

    pub fn push(&self, response: Result<GiftCard, ServiceError>) {
        lock(&self.responses).push_back(response);
    }

    pub fn set_default(&self, gift_card: GiftCard) {
        *lock(&self.default) = Some(gift_card);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn forgotten(&self) -> Vec<String> {
        lock(&self.forgotten).clone()
    }
}

#[async_trait]
impl RedemptionService for FakeRedemptions {
    async fn redeem_gift_card(&self, invoice_id: &str) -> Result<GiftCard, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(response) = lock(&self.responses).pop_front() {
            return response;
        }

        lock(&self.default)
            .clone()
            .ok_or_else(|| ServiceError::UnknownInvoice(invoice_id.to_string()))
    }

    async fn forget_gift_card(&self, invoice_id: &str) {
        lock(&self.forgotten).push(invoice_id.to_string());
    }
}

#[derive(Debug, Default)]
pub struct FakeNavigator {
    pub resets: Mutex<Vec<Vec<Route>>>,
    pub backs: AtomicUsize,
}

impl FakeNavigator {
    pub fn resets(&self) -> Vec<Vec<Route>> {
        lock(&self.resets).clone()
    }

    pub fn backs(&self) -> usize {
        self.backs.load(Ordering::SeqCst)
    }
}

impl Navigator for FakeNavigator {
    fn reset(&self, routes: Vec<Route>) {
        lock(&self.resets).push(routes);
    }

    fn go_back(&self) {
        self.backs.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    ShowSelector(Vec<KeyWalletsRow>),
    HideSelector,
    NoWallets,
    Error(ErrorNotification),
}

#[derive(Debug, Default)]
pub struct FakeView {
    pub calls: Mutex<Vec<ViewCall>>,
}

impl FakeView {
    pub fn calls(&self) -> Vec<ViewCall> {
        lock(&self.calls).clone()
    }

    pub fn errors(&self) -> Vec<ErrorNotification> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ViewCall::Error(notification) => Some(notification),
                _ => None,
            })
            .collect()
    }

    pub fn selector_openings(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, ViewCall::ShowSelector(_)))
            .count()
    }
}

impl PurchaseView for FakeView {
    fn show_wallet_selector(&self, rows: &[KeyWalletsRow]) {
        lock(&self.calls).push(ViewCall::ShowSelector(rows.to_vec()));
    }

    fn hide_wallet_selector(&self) {
        lock(&self.calls).push(ViewCall::HideSelector);
    }

    fn show_no_wallets(&self) {
        lock(&self.calls).push(ViewCall::NoWallets);
    }

    fn show_error(&self, notification: ErrorNotification) {
        lock(&self.calls).push(ViewCall::Error(notification));
    }
}

/// Every fake wired into one set of flow services
#[derive(Debug, Clone)]
pub struct Harness {
    pub key_store: Arc<FakeKeyStore>,
    pub invoices: Arc<FakeInvoices>,
    pub proposals: Arc<FakeProposals>,
    pub payments: Arc<FakePayments>,
    pub redemptions: Arc<FakeRedemptions>,
    pub navigator: Arc<FakeNavigator>,
    pub view: Arc<FakeView>,
    pub events: ShopEvents,
    pub in_flight: InFlightPurchases,
}

impl Harness {
    pub fn new(keys: Vec<Key>) -> Self {
        Self::with_proposals(keys, FakeProposals::default())
    }

    pub fn with_proposals(keys: Vec<Key>, proposals: FakeProposals) -> Self {
        Self {
            key_store: Arc::new(FakeKeyStore { keys }),
            invoices: Arc::new(FakeInvoices::default()),
            proposals: Arc::new(proposals),
            payments: Arc::new(FakePayments::default()),
            redemptions: Arc::new(FakeRedemptions::default()),
            navigator: Arc::new(FakeNavigator::default()),
            view: Arc::new(FakeView::default()),
            events: ShopEvents::new(),
            in_flight: InFlightPurchases::new(),
        }
    }

    pub fn services(&self) -> FlowServices {
        FlowServices {
            key_store: self.key_store.clone(),
            invoices: self.invoices.clone(),
            proposals: self.proposals.clone(),
            payments: self.payments.clone(),
            redemptions: self.redemptions.clone(),
            navigator: self.navigator.clone(),
            view: self.view.clone(),
            events: self.events.clone(),
            in_flight: self.in_flight.clone(),
        }
    }
}
