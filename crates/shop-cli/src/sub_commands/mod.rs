pub mod gift_card;
pub mod login;
pub mod pair;
pub mod session;
