pub mod actions;
pub mod models;

pub use actions::{unlock_contact, UNLOCK_COST};
pub use models::{ContactUnlock, UnlockedContact};
