//! Ingestion pipeline.
//!
//! - [`ingest_model`] - Work items, per-security errors, the batch report
//! - [`ingest_traits`] - Storage seam and the service trait
//! - [`ingest_service`] - Planning + bounded-concurrency batch runner
//! - [`ingest_constants`] - Tunables
//!
//! The flow for one `update` call:
//!
//! ```text
//! work_items (latest stored date per security, via PriceHistoryStore)
//!     │
//!     ▼
//! run_batch (worker pool, min(cap, n) workers over one shared queue)
//!     │            per item: fetch [start, today] ─► append to store
//!     ▼
//! BatchReport (every failure observed exactly once, batch never aborts)
//! ```

pub mod ingest_constants;
pub mod ingest_model;
pub mod ingest_service;
pub mod ingest_traits;


pub use ingest_constants::{DEFAULT_CONCURRENCY, DEFAULT_LOOKBACK_DAYS};
pub use ingest_model::{BatchReport, FetchError, WorkItem};
pub use ingest_service::IngestService;
pub use ingest_traits::{IngestServiceTrait, PriceHistoryStore};
