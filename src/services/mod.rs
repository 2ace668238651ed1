//! External collaborators of the performance engine.

pub mod market_data;

pub use market_data::{InMemoryTickerRepository, RepositoryError, TickerRepository};
