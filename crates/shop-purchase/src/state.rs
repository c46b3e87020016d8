//! Purchase flow states
//!
//! ```text
//! Unselected ──select_wallet──► ProposalPending ──ok──► Ready ──confirm──► Submitting
//!     ▲                               │                   │                  │
//!     └────────── error ◄─────────────┘                   │                  ├─ ok ──► Completed
//!     │                                                   │                  └─ err ─► Failed
//!     └─ dismiss selector ─► Cancelled                    └─ select_wallet (re-quote)
//! ```
//!
//! A proposal, its details and its recipient only exist inside
//! [`FlowState::Ready`], so they are always present or absent together.

use shop_common::{
    DisplayAmount, GiftCard, Key, Recipient, SendingFrom, TransactionProposal, TxDetails, Wallet,
};

/// Current step of a purchase attempt
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    /// No wallet chosen; the selector may be open
    Unselected,
    /// Invoice and proposal are being created for `wallet`
    ProposalPending {
        /// Wallet being quoted
        wallet: Wallet,
    },
    /// Proposal created, waiting for the user to confirm
    Ready(Box<ReadyProposal>),
    /// Payment is being sent and the card redeemed
    Submitting {
        /// Invoice being paid
        invoice_id: String,
    },
    /// Card redeemed
    Completed {
        /// Redeemed card as reported by the redemption call
        gift_card: GiftCard,
    },
    /// Submission failed and was rolled back
    Failed {
        /// User-facing reason
        reason: String,
    },
    /// The user left before a proposal existed
    Cancelled,
}

impl FlowState {
    /// Proposal awaiting confirmation, if any
    pub fn ready(&self) -> Option<&ReadyProposal> {
        match self {
            FlowState::Ready(ready) => Some(ready),
            _ => None,
        }
    }

    /// Whether a transaction proposal currently exists
    pub fn has_proposal(&self) -> bool {
        matches!(self, FlowState::Ready(_))
    }

    /// Whether the flow reached an end state
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowState::Completed { .. } | FlowState::Cancelled)
    }
}

/// Everything needed to submit a purchase
#[derive(Debug, Clone, PartialEq)]
pub struct ReadyProposal {
    /// Paying wallet
    pub wallet: Wallet,
    /// Key owning the wallet
    pub key: Key,
    /// Invoice being paid
    pub invoice_id: String,
    /// The proposal
    pub txp: TransactionProposal,
    /// Display breakdown of the proposal
    pub tx_details: TxDetails,
    /// Destination derived from the details
    pub recipient: Recipient,
    /// Discount applied by the shop
    pub total_discount: Option<f64>,
}

/// Pre-seeded selection when returning to an existing proposal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumeState {
    /// Previously selected wallet
    pub wallet: Option<Wallet>,
    /// Previously derived recipient
    pub recipient: Option<Recipient>,
    /// Previously created proposal
    pub txp: Option<TransactionProposal>,
    /// Previously computed details
    pub tx_details: Option<TxDetails>,
}

/// Summary lines shown once a proposal is ready
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseSummary {
    /// Paying wallet
    pub sending_from: SendingFrom,
    /// Formatted discount, when one applies
    pub discount: Option<String>,
    /// Network cost charged by the invoice
    pub network_cost: Option<DisplayAmount>,
    /// Miner fee
    pub miner_fee: DisplayAmount,
    /// Total sent
    pub total: DisplayAmount,
    /// Card terms
    pub terms: String,
}
