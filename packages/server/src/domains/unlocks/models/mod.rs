pub mod contact_unlock;

pub use contact_unlock::{ContactUnlock, UnlockedContact};
