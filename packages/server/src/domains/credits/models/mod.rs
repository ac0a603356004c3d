pub mod balance;
pub mod transaction;

pub use balance::ProviderCredits;
pub use transaction::CreditTransaction;
