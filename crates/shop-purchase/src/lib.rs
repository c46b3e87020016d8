//! Gift card purchase confirmation flow
//!
//! [`PurchaseFlow`] walks a purchase through wallet selection, invoice and
//! transaction proposal creation, confirmation, payment submission and
//! redemption. External subsystems are reached through the traits of
//! [`shop_common::services`] and [`PurchaseView`]; state changes other
//! screens care about are published on [`shop_common::ShopEvents`].
//!
//! # States
//!
//! | State | Description |
//! |-------|-------------|
//! | `Unselected` | No wallet chosen, the selector may be open |
//! | `ProposalPending` | Invoice and proposal being created |
//! | `Ready` | Proposal created, summary shown |
//! | `Submitting` | Payment being sent and the card redeemed |
//! | `Completed` | Card redeemed, navigation reset to its details |
//! | `Failed` | Submission rolled back, retry offered |
//! | `Cancelled` | Selector dismissed before any proposal existed |

pub mod compensation;
pub mod config;
pub mod error;
pub mod flow;
pub mod in_flight;
pub mod state;
pub mod view;
pub mod watcher;

#[cfg(test)]
mod test_utils;

pub use config::{ConfirmationConfig, PurchaseConfig};
pub use error::{Error, Result};
pub use flow::{FlowServices, PurchaseFlow, PurchaseRequest};
pub use in_flight::{InFlightGuard, InFlightPurchases};
pub use state::{FlowState, PurchaseSummary, ReadyProposal, ResumeState};
pub use view::{ErrorNotification, NotificationAction, PurchaseView};
pub use watcher::ConfirmationWatcher;
