pub mod models;

pub use models::{CreateCategory, ServiceCategory, UpdateCategory};
