pub mod models;

pub use models::{CreatePortfolioItem, PortfolioItem, UpdatePortfolioItem};
