//! Shop state change notifications
//!
//! The purchase flow never mutates shared state directly. It publishes
//! [`ShopEvent`]s on a broadcast bus; screens listing gift cards, progress
//! overlays and tests subscribe to it. The bus also remembers the latest
//! status of each gift card so late observers can catch up.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast;

use crate::types::GiftCardStatus;

/// Default capacity of the broadcast channel
const DEFAULT_CAPACITY: usize = 64;

/// Stage-specific message of the blocking progress overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessMessage {
    /// Invoice and proposal are being created
    FetchingPaymentInfo,
    /// Signed transaction is being submitted
    SendingPayment,
    /// Gift card is being redeemed
    GeneratingGiftCard,
}

impl fmt::Display for ProcessMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProcessMessage::FetchingPaymentInfo => "Fetching payment information...",
            ProcessMessage::SendingPayment => "Sending Payment...",
            ProcessMessage::GeneratingGiftCard => "Generating Gift Card...",
        };
        write!(f, "{}", s)
    }
}

/// Event published on the shop bus
#[derive(Debug, Clone, PartialEq)]
pub enum ShopEvent {
    /// Progress overlay shown with a message
    ProgressShown(ProcessMessage),
    /// Progress overlay dismissed
    ProgressDismissed,
    /// Gift card status updated
    GiftCardStatusChanged {
        /// Invoice the card belongs to
        invoice_id: String,
        /// New status
        status: GiftCardStatus,
    },
    /// Gift cards created but never paid should be discarded
    UnsoldGiftCardsDeleted,
}

/// Broadcast bus for [`ShopEvent`]s
#[derive(Debug, Clone)]
pub struct ShopEvents {
    sender: broadcast::Sender<ShopEvent>,
    statuses: Arc<Mutex<HashMap<String, GiftCardStatus>>>,
}

impl Default for ShopEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl ShopEvents {
    /// Create a bus with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a bus; slow subscribers lag once `capacity` events are buffered
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            statuses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<ShopEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to every subscriber
    pub fn publish(&self, event: ShopEvent) {
        if let ShopEvent::GiftCardStatusChanged { invoice_id, status } = &event {
            self.statuses
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(invoice_id.clone(), *status);
        }

        tracing::trace!("Publishing shop event {:?}", event);

        // No subscribers is not an error
        let _ = self.sender.send(event);
    }

    /// Record and publish a gift card status change
    pub fn update_gift_card_status(&self, invoice_id: &str, status: GiftCardStatus) {
        self.publish(ShopEvent::GiftCardStatusChanged {
            invoice_id: invoice_id.to_string(),
            status,
        });
    }

    /// Show the progress overlay
    pub fn show_progress(&self, message: ProcessMessage) {
        self.publish(ShopEvent::ProgressShown(message));
    }

    /// Dismiss the progress overlay
    pub fn dismiss_progress(&self) {
        self.publish(ShopEvent::ProgressDismissed);
    }

    /// Latest known status of a gift card
    pub fn gift_card_status(&self, invoice_id: &str) -> Option<GiftCardStatus> {
        self.statuses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(invoice_id)
            .copied()
    }
}
