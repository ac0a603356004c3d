pub mod portfolio_item;

pub use portfolio_item::{CreatePortfolioItem, PortfolioItem, UpdatePortfolioItem};
