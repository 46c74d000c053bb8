//! Domain models for remote market data.
//!
//! - [`price_point`] - One daily trading record for a security
//! - [`window`] - Bounded date sub-ranges for paginated fetching

pub mod price_point;
pub mod window;

pub use price_point::PricePoint;
pub use window::{Window, MAX_WINDOW_DAYS};
