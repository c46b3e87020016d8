//! Gift card shop API
//!
//! Creating an invoice hands back an access key that the redemption call
//! needs later. The client keeps those credentials per invoice, so callers
//! only ever deal in invoice identifiers.

use std::collections::HashMap;

use async_trait::async_trait;
use shop_common::services::{InvoiceService, RedemptionService};
use shop_common::{
    CardConfig, CreatedInvoice, GiftCard, GiftCardInvoiceParams, GiftCardStatus, Network,
    ServiceError,
};
use shop_http_client::HttpClient;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::types::{GiftCardInvoiceResponse, RedeemGiftCardRequest, RedeemGiftCardResponse};

const PAY_PATH: &str = "/gift-cards/pay";
const REDEEM_PATH: &str = "/gift-cards/redeem";

/// What redemption needs to remember about a purchase
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRecord {
    /// Access key returned with the invoice
    pub access_key: String,
    /// Client that created the invoice
    pub client_id: String,
    /// Brand identifier
    pub brand: String,
    /// Face value
    pub amount: f64,
    /// Fiat currency
    pub currency: String,
    /// Discount applied by the shop
    pub total_discount: Option<f64>,
}

/// Client for the gift card shop endpoints
#[derive(Debug)]
pub struct GiftCardApi {
    base_url: String,
    http_client: HttpClient,
    purchases: RwLock<HashMap<String, PurchaseRecord>>,
}

impl GiftCardApi {
    /// Create a client for the API host of `network`
    pub fn new(network: Network) -> Self {
        Self::with_base_url(network.base_url())
    }

    /// Create a client for an explicit API host
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: HttpClient::new(),
            purchases: RwLock::new(HashMap::new()),
        }
    }

    /// Use a preconfigured HTTP client
    pub fn with_http_client(mut self, http_client: HttpClient) -> Self {
        self.http_client = http_client;
        self
    }

    /// Invoices created through this client and not yet forgotten
    pub async fn known_invoices(&self) -> Vec<String> {
        self.purchases.read().await.keys().cloned().collect()
    }

    /// Store credentials of an invoice created elsewhere
    pub async fn remember(&self, invoice_id: impl Into<String>, record: PurchaseRecord) {
        self.purchases.write().await.insert(invoice_id.into(), record);
    }

    /// Drop the stored credentials of an invoice
    pub async fn forget(&self, invoice_id: &str) {
        self.purchases.write().await.remove(invoice_id);
    }
}

#[async_trait]
impl InvoiceService for GiftCardApi {
    #[instrument(skip(self, card_config, params), fields(brand = %params.brand))]
    async fn create_gift_card_invoice(
        &self,
        card_config: &CardConfig,
        params: GiftCardInvoiceParams,
    ) -> Result<CreatedInvoice, ServiceError> {
        let url = format!("{}{}", self.base_url, PAY_PATH);

        let response: GiftCardInvoiceResponse = self
            .http_client
            .post_json(&url, &params)
            .await
            .map_err(ServiceError::from_http)?;

        tracing::info!(
            "Created {} gift card invoice {}",
            card_config.display_name,
            response.invoice_id
        );

        self.purchases.write().await.insert(
            response.invoice_id.clone(),
            PurchaseRecord {
                access_key: response.access_key,
                client_id: params.client_id,
                brand: params.brand,
                amount: params.amount,
                currency: params.currency,
                total_discount: response.total_discount,
            },
        );

        Ok(CreatedInvoice {
            invoice: response.invoice,
            invoice_id: response.invoice_id,
            total_discount: response.total_discount,
        })
    }
}

#[async_trait]
impl RedemptionService for GiftCardApi {
    #[instrument(skip(self))]
    async fn redeem_gift_card(&self, invoice_id: &str) -> Result<GiftCard, ServiceError> {
        let record = self
            .purchases
            .read()
            .await
            .get(invoice_id)
            .cloned()
            .ok_or_else(|| ServiceError::UnknownInvoice(invoice_id.to_string()))?;

        let url = format!("{}{}", self.base_url, REDEEM_PATH);
        let body = RedeemGiftCardRequest {
            invoice_id,
            access_key: &record.access_key,
            client_id: &record.client_id,
        };

        let response: RedeemGiftCardResponse = self
            .http_client
            .post_json(&url, &body)
            .await
            .map_err(ServiceError::from_http)?;

        tracing::debug!("Gift card {} is {}", invoice_id, response.status);

        // Settled cards are never polled again
        if response.status != GiftCardStatus::Pending {
            self.forget(invoice_id).await;
        }

        Ok(GiftCard {
            invoice_id: invoice_id.to_string(),
            brand: record.brand,
            amount: record.amount,
            currency: record.currency,
            status: response.status,
            claim_code: response.claim_code,
            pin: response.pin,
            total_discount: record.total_discount,
            date: response.date.unwrap_or_default(),
        })
    }

    async fn forget_gift_card(&self, invoice_id: &str) {
        tracing::debug!("Forgetting gift card purchase {}", invoice_id);
        self.forget(invoice_id).await;
    }
}
