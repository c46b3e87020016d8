//! Shop domain types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::network::Network;

/// Gift card product metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardConfig {
    /// Brand identifier used by the shop API
    pub name: String,
    /// Human readable brand name
    pub display_name: String,
    /// Fiat currency the card is denominated in
    pub currency: String,
    /// Brand icon URI
    #[serde(default)]
    pub icon: String,
    /// Terms and conditions text
    #[serde(default)]
    pub terms: String,
}

/// Discount applicable to a gift card purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCardDiscount {
    /// Discount code sent with the invoice request
    pub code: String,
    /// Discount value
    pub amount: f64,
    /// `percentage` or `flatrate`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<String>,
}

/// Balance snapshot of a wallet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    /// Balance in the smallest crypto unit
    pub sat: u64,
    /// Formatted crypto balance
    #[serde(default)]
    pub crypto: String,
    /// Fiat value of the balance
    #[serde(default)]
    pub fiat: f64,
}

/// Account able to hold a currency and build transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// Wallet identifier
    pub id: String,
    /// Identifier of the owning key
    pub key_id: String,
    /// Currency ticker, e.g. `btc`
    pub currency_abbreviation: String,
    /// Display name
    pub wallet_name: String,
    /// Network the wallet lives on
    pub network: Network,
    /// Current balance
    #[serde(default)]
    pub balance: WalletBalance,
    /// Hidden wallets are never offered for selection
    #[serde(default)]
    pub hide_wallet: bool,
}

/// Credential set owning one or more wallets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Key {
    /// Key identifier
    pub id: String,
    /// Display name
    pub key_name: String,
    /// Wallets derived from this key
    pub wallets: Vec<Wallet>,
}

/// One group in the wallet selector
#[derive(Debug, Clone, PartialEq)]
pub struct KeyWalletsRow {
    /// Owning key identifier
    pub key_id: String,
    /// Owning key name
    pub key_name: String,
    /// Selectable wallets of this key
    pub wallets: Vec<Wallet>,
}

/// Arbitrary metadata attached to a transaction proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxProposalCustomData {
    /// Brand of the gift card being bought
    pub gift_card_name: String,
    /// Originating service, `giftcards` for this flow
    pub service: String,
}

/// Unsigned or unsent transfer built against a wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionProposal {
    /// Proposal identifier
    pub id: String,
    /// Wallet the proposal was built for
    pub wallet_id: String,
    /// Amount in the smallest crypto unit
    pub amount: u64,
    /// Miner fee in the smallest crypto unit
    pub fee: u64,
    /// Invoice the proposal pays, once associated with a purchase
    #[serde(rename = "invoiceID", default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    /// Pay-protocol URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_pro_url: Option<String>,
    /// Note shown in the wallet history
    #[serde(default)]
    pub message: String,
    /// Service metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<TxProposalCustomData>,
}

/// Amount rendered in both crypto and fiat
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayAmount {
    /// Formatted crypto value
    pub crypto_amount: String,
    /// Formatted fiat value
    pub fiat_amount: String,
}

/// Sender label shown in the summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendingFrom {
    /// Wallet display name
    pub wallet_name: String,
    /// Currency ticker
    pub currency_abbreviation: String,
}

/// Destination of a transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendingTo {
    /// Address funds are sent to
    pub recipient_address: String,
}

/// Display breakdown derived from a transaction proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxDetails {
    /// Miner fee
    pub fee: DisplayAmount,
    /// Network cost charged by the invoice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_cost: Option<DisplayAmount>,
    /// Sending wallet
    pub sending_from: SendingFrom,
    /// Destination
    pub sending_to: SendingTo,
    /// Total to be sent
    pub total: DisplayAmount,
}

/// Destination address of a payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    /// Address
    pub address: String,
}

impl From<&TxDetails> for Recipient {
    fn from(details: &TxDetails) -> Self {
        Self {
            address: details.sending_to.recipient_address.clone(),
        }
    }
}

/// Redemption state of a gift card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GiftCardStatus {
    /// Paid, awaiting confirmation
    Pending,
    /// Payment was not completed
    Unredeemed,
    /// Redeemed
    Success,
    /// Redemption failed at the provider
    Failure,
    /// Redeemed and synced with the account
    Synced,
}

impl GiftCardStatus {
    /// Whether the card reached a confirmed state
    pub fn is_confirmed(&self) -> bool {
        matches!(self, GiftCardStatus::Success | GiftCardStatus::Synced)
    }
}

impl fmt::Display for GiftCardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GiftCardStatus::Pending => "PENDING",
            GiftCardStatus::Unredeemed => "UNREDEEMED",
            GiftCardStatus::Success => "SUCCESS",
            GiftCardStatus::Failure => "FAILURE",
            GiftCardStatus::Synced => "SYNCED",
        };
        write!(f, "{}", s)
    }
}

/// Redeemed gift card record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCard {
    /// Invoice the card was bought with
    pub invoice_id: String,
    /// Brand identifier
    pub brand: String,
    /// Face value
    pub amount: f64,
    /// Fiat currency
    pub currency: String,
    /// Redemption state
    pub status: GiftCardStatus,
    /// Claim code, once redeemed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_code: Option<String>,
    /// PIN, for brands that issue one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    /// Discount applied to the purchase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_discount: Option<f64>,
    /// Purchase date (ISO 8601)
    #[serde(default)]
    pub date: String,
}

/// Pay-protocol invoice payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Invoice identifier
    pub id: String,
    /// Invoice page URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Invoice status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Fiat price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Fiat currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Remaining invoice fields, passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Parameters of a gift card invoice request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCardInvoiceParams {
    /// Face value
    pub amount: f64,
    /// Brand identifier
    pub brand: String,
    /// Fiat currency
    pub currency: String,
    /// Wallet identifier used as client id
    pub client_id: String,
    /// Discount codes
    pub discounts: Vec<String>,
    /// Upper-cased ticker of the paying wallet
    pub transaction_currency: String,
}

/// Result of a gift card invoice request
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedInvoice {
    /// Invoice payload
    pub invoice: Invoice,
    /// Invoice identifier
    pub invoice_id: String,
    /// Discount applied by the shop
    pub total_discount: Option<f64>,
}

/// Request for a pay-protocol transaction proposal
#[derive(Debug, Clone, PartialEq)]
pub struct PayProTxProposalRequest {
    /// Paying wallet
    pub wallet: Wallet,
    /// `{base_url}/i/{invoice_id}`
    pub payment_url: String,
    /// Invoice payload
    pub invoice: Invoice,
    /// Invoice identifier
    pub invoice_id: String,
    /// Note attached to the proposal
    pub message: String,
    /// Service metadata
    pub custom_data: TxProposalCustomData,
}

/// A transaction proposal with its display breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct PayProTxProposal {
    /// Display breakdown
    pub tx_details: TxDetails,
    /// The proposal
    pub txp: TransactionProposal,
}

/// Navigation destinations used by the shop
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Shop tab root
    Shop,
    /// Gift card details screen
    GiftCardDetails {
        /// Redeemed card
        gift_card: GiftCard,
        /// Product metadata
        card_config: CardConfig,
    },
}
