//! Price-history persistence.

pub mod model;
pub mod repository;

pub use model::PricePointDB;
pub use repository::PriceHistoryRepository;
