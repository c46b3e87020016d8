use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use shop_api::{GiftCardApi, PurchaseRecord};
use shop_common::services::RedemptionService;
use shop_common::{GiftCard, GiftCardStatus, ShopEvents};
use shop_purchase::ConfirmationWatcher;

use crate::config::Settings;

#[derive(Subcommand)]
pub enum GiftCardSubCommand {
    /// Redeem a paid gift card
    Redeem {
        /// Invoice the card was paid with
        #[arg(long)]
        invoice_id: String,
        /// Access key returned with the invoice
        #[arg(long)]
        access_key: String,
        /// Wallet that created the invoice
        #[arg(long)]
        client_id: String,
        /// Brand identifier
        #[arg(long)]
        brand: String,
        /// Face value
        #[arg(long)]
        amount: f64,
        /// Fiat currency
        #[arg(long, default_value = "USD")]
        currency: String,
        /// Keep polling while the card is pending
        #[arg(long)]
        wait: bool,
    },
}

pub async fn gift_card(
    shop: Arc<GiftCardApi>,
    settings: &Settings,
    sub_command: &GiftCardSubCommand,
) -> Result<()> {
    match sub_command {
        GiftCardSubCommand::Redeem {
            invoice_id,
            access_key,
            client_id,
            brand,
            amount,
            currency,
            wait,
        } => {
            shop.remember(
                invoice_id.clone(),
                PurchaseRecord {
                    access_key: access_key.clone(),
                    client_id: client_id.clone(),
                    brand: brand.clone(),
                    amount: *amount,
                    currency: currency.clone(),
                    total_discount: None,
                },
            )
            .await;

            let gift_card = shop.redeem_gift_card(invoice_id).await?;
            print_gift_card(&gift_card);

            if *wait && gift_card.status == GiftCardStatus::Pending {
                let events = ShopEvents::new();
                events.update_gift_card_status(invoice_id, gift_card.status);

                let watcher =
                    ConfirmationWatcher::new(shop, events, settings.purchase.confirmation.clone());
                match watcher.wait_for_confirmation(invoice_id).await {
                    Some(status) => println!("Final status: {}", status),
                    None => println!("Status unknown"),
                }
            }

            Ok(())
        }
    }
}

fn print_gift_card(gift_card: &GiftCard) {
    println!("Invoice: {}", gift_card.invoice_id);
    println!("Brand: {}", gift_card.brand);
    println!("Amount: {} {}", gift_card.amount, gift_card.currency);
    println!("Status: {}", gift_card.status);
    if let Some(claim_code) = &gift_card.claim_code {
        println!("Claim code: {}", claim_code);
    }
    if let Some(pin) = &gift_card.pin {
        println!("PIN: {}", pin);
    }
}
