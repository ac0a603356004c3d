pub mod actions;
pub mod models;

pub use actions::purchase_credits;
pub use models::{CreditTransaction, ProviderCredits};
