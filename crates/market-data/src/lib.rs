//! Remote market data access for berza.
//!
//! This crate owns everything that talks to the exchange website:
//!
//! - [`models`] - Typed daily rows ([`PricePoint`]) and date windows ([`Window`])
//! - [`provider`] - The [`HistoryProvider`] trait and the MSE implementation
//! - [`discovery`] - Symbol discovery strategies and the digit filter
//! - [`errors`] - The [`MarketDataError`] taxonomy
//!
//! The crate is storage-agnostic: it produces typed rows and leaves
//! persistence to the caller.

pub mod discovery;
pub mod errors;
pub mod models;
pub mod provider;

pub use discovery::{DropdownDirectory, SymbolDirectory, SymbolExtractor, TableDirectory};
pub use errors::MarketDataError;
pub use models::{PricePoint, Window};
pub use provider::{HistoryProvider, MseProvider};
