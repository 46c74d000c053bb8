//! SQLite storage implementation for berza.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the storage traits defined in `berza-core`
//! and contains:
//! - Connection pooling and embedded migrations
//! - The price-history repository
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies
//! exist. The core crate is database-agnostic and works with traits.
//!
//! ```text
//! core (domain)
//!       │
//!       ▼
//! storage-sqlite (this crate)
//!       │
//!       ▼
//!   SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod price_history;
pub mod schema;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export the repository
pub use price_history::PriceHistoryRepository;

// Re-export from berza-core for convenience
pub use berza_core::errors::{DatabaseError, Error, Result};
