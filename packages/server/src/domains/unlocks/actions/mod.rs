pub mod unlock_contact;

pub use unlock_contact::{unlock_contact, UNLOCK_COST};
