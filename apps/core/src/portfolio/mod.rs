//! Portfolio data: models, the loaded store and search.

pub mod models;
pub mod search;
pub mod store;

pub use models::PortfolioData;
pub use search::SearchHit;
pub use store::PortfolioStore;
