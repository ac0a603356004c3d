pub mod admin;
pub mod auth;
pub mod categories;
pub mod credits;
pub mod health;
pub mod marketplace;
pub mod portfolio;
pub mod profiles;
pub mod requests;

pub use admin::*;
pub use auth::*;
pub use categories::*;
pub use credits::*;
pub use health::*;
pub use marketplace::*;
pub use portfolio::*;
pub use profiles::*;
pub use requests::*;
