//! Core domain logic for berza.
//!
//! This crate is database-agnostic and network-agnostic: it plans which
//! securities need fresh history, drives a bounded pool of concurrent
//! fetches, and hands rows to a storage seam. Concrete I/O lives in
//! `berza-market-data` (remote source) and `berza-storage-sqlite`
//! (persistence).
//!
//! ```text
//! IngestService
//!       │
//!       ├─► Clock (what "today" means)
//!       ├─► HistoryProvider (berza-market-data)
//!       └─► PriceHistoryStore (implemented by the storage crate)
//! ```

pub mod clock;
pub mod errors;
pub mod ingest;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{DatabaseError, Error, Result};
pub use ingest::{BatchReport, FetchError, IngestService, IngestServiceTrait, PriceHistoryStore, WorkItem};
