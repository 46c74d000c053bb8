//! Ingestion service: planning and bounded-concurrency batch execution.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use futures::future::join_all;
use log::{debug, error, info, warn};
use tokio::sync::{mpsc, Mutex};

use berza_market_data::{HistoryProvider, MarketDataError};

use super::ingest_constants::DEFAULT_LOOKBACK_DAYS;
use super::ingest_model::{BatchReport, FetchError, WorkItem};
use super::ingest_traits::{IngestServiceTrait, PriceHistoryStore};
use crate::clock::Clock;
use crate::errors::Result;

/// Keeps stored daily history current for a set of securities.
///
/// Planning (which securities are stale, and from when) is synchronous and
/// side-effect free; execution runs a fixed pool of workers over one shared
/// queue and funnels failures through an aggregation channel, so a batch
/// always runs to completion and reports every failure exactly once.
pub struct IngestService<P, S>
where
    P: HistoryProvider + 'static,
    S: PriceHistoryStore + 'static,
{
    provider: Arc<P>,
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<P, S> IngestService<P, S>
where
    P: HistoryProvider + 'static,
    S: PriceHistoryStore + 'static,
{
    pub fn new(provider: Arc<P>, store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            provider,
            store,
            clock,
        }
    }

    /// Determine, per security, the earliest date new data is needed from.
    ///
    /// - no stored rows → full default lookback (resolved at fetch time)
    /// - last stored day before today → resume at `last + 1 day`
    /// - last stored day is today → already current, omitted
    ///
    /// No network access, no mutation. The returned map holds an entry for
    /// every security that needs any new data and no entry otherwise.
    pub fn work_items(
        &self,
        security_ids: &HashSet<String>,
    ) -> Result<HashMap<String, WorkItem>> {
        let today = self.clock.today();
        let mut items = HashMap::new();

        for security_id in security_ids {
            match self.store.latest_date(security_id)? {
                None => {
                    items.insert(
                        security_id.clone(),
                        WorkItem::full_history(security_id.clone()),
                    );
                }
                Some(last) if last < today => {
                    items.insert(
                        security_id.clone(),
                        WorkItem::resume(security_id.clone(), last + Duration::days(1)),
                    );
                }
                Some(_) => {
                    debug!("{} is already current", security_id);
                }
            }
        }

        Ok(items)
    }

    /// Drain the work items with at most `concurrency_cap` workers.
    ///
    /// Each worker repeatedly claims one unclaimed item until none remain,
    /// so every item is processed by exactly one worker regardless of cap or
    /// completion order. Failures flow through an mpsc channel that is
    /// drained after all workers have finished.
    pub async fn run_batch(
        &self,
        work_items: HashMap<String, WorkItem>,
        concurrency_cap: usize,
    ) -> BatchReport {
        let total = work_items.len();
        if total == 0 {
            return BatchReport::default();
        }

        let today = self.clock.today();
        let queue: Arc<Mutex<VecDeque<WorkItem>>> =
            Arc::new(Mutex::new(work_items.into_values().collect()));
        let (error_tx, mut error_rx) = mpsc::unbounded_channel::<FetchError>();

        let workers = concurrency_cap.max(1).min(total);
        debug!("Running batch of {} items with {} workers", total, workers);

        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let queue = Arc::clone(&queue);
                let provider = Arc::clone(&self.provider);
                let store = Arc::clone(&self.store);
                let error_tx = error_tx.clone();

                tokio::spawn(async move {
                    loop {
                        let item = { queue.lock().await.pop_front() };
                        let Some(item) = item else { break };

                        if let Err(message) =
                            process_item(provider.as_ref(), store.as_ref(), &item, today).await
                        {
                            // The receiver outlives every worker; a send can
                            // only fail if the batch was torn down entirely.
                            let _ = error_tx.send(FetchError::new(&item.security_id, message));
                        }
                    }
                })
            })
            .collect();
        drop(error_tx);

        for join_result in join_all(handles).await {
            if let Err(e) = join_result {
                error!("Ingest worker panicked: {}", e);
            }
        }

        let mut errors = Vec::new();
        while let Some(err) = error_rx.recv().await {
            errors.push(err);
        }

        BatchReport {
            processed: total,
            errors,
        }
    }
}

/// Fetch and persist one security's missing range.
///
/// Returns the failure message for the batch report on any of the three
/// per-item failure kinds (no data, fetch failure, storage failure). A
/// mid-range fetch failure discards rows already fetched for this security;
/// nothing partial reaches the store.
async fn process_item<P, S>(
    provider: &P,
    store: &S,
    item: &WorkItem,
    today: NaiveDate,
) -> std::result::Result<(), String>
where
    P: HistoryProvider,
    S: PriceHistoryStore,
{
    let start = item
        .start
        .unwrap_or_else(|| today - Duration::days(DEFAULT_LOOKBACK_DAYS));

    debug!(
        "Fetching {} from {} to {} via {}",
        item.security_id,
        start,
        today,
        provider.id()
    );

    let points = provider
        .fetch_range(&item.security_id, start, today)
        .await
        .map_err(|e| match e {
            MarketDataError::NoData { .. } => "no rows returned".to_string(),
            other => format!("fetch failed: {}", other),
        })?;

    let written = store
        .append(&item.security_id, &points)
        .await
        .map_err(|e| format!("save failed: {}", e))?;

    debug!("Saved {} rows for {}", written, item.security_id);
    Ok(())
}

#[async_trait]
impl<P, S> IngestServiceTrait for IngestService<P, S>
where
    P: HistoryProvider + 'static,
    S: PriceHistoryStore + 'static,
{
    async fn update(
        &self,
        security_ids: &HashSet<String>,
        concurrency_cap: usize,
    ) -> Result<BatchReport> {
        let items = self.work_items(security_ids)?;
        if items.is_empty() {
            info!("All {} securities are up to date", security_ids.len());
            return Ok(BatchReport::default());
        }

        info!(
            "{} of {} securities need updating",
            items.len(),
            security_ids.len()
        );

        let report = self.run_batch(items, concurrency_cap).await;

        for err in &report.errors {
            warn!("Update failed for {}", err);
        }
        info!("{}", report.summary());

        Ok(report)
    }
}
