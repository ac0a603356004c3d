// Domain modules: models own the sqlx data layer, actions own the
// multi-step operations that span models.

pub mod auth;
pub mod categories;
pub mod credits;
pub mod portfolio;
pub mod profiles;
pub mod requests;
pub mod unlocks;
