//! Wallet shop common types, collaborator traits and events
//!
//! Everything the purchase flow and the API clients share: the domain model
//! for wallets, transaction proposals and gift cards, the traits through
//! which external subsystems are reached, and the broadcast bus that carries
//! shop state changes to observers.

pub mod error;
pub mod events;
pub mod network;
pub mod services;
pub mod task;
pub mod types;
pub mod util;

pub use error::ServiceError;
pub use events::{ProcessMessage, ShopEvent, ShopEvents};
pub use network::Network;
pub use types::*;
