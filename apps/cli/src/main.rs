mod config;

use std::collections::HashSet;
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use berza_core::{IngestService, IngestServiceTrait, SystemClock};
use berza_market_data::provider::mse::DEFAULT_BASE_URL;
use berza_market_data::{DropdownDirectory, MseProvider, SymbolExtractor};
use berza_storage_sqlite::{db, PriceHistoryRepository};

use config::Config;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Any symbol-history page works for discovery; its dropdown lists every symbol.
fn discovery_url() -> String {
    format!("{}/stats/symbolhistory/ADIN", DEFAULT_BASE_URL)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let config = Config::from_env();

    let pool = db::init(&config.database_url)?;
    let store = Arc::new(PriceHistoryRepository::new(pool));
    let provider = Arc::new(MseProvider::new());
    let service = IngestService::new(provider, store, Arc::new(SystemClock));

    let security_ids: HashSet<String> = match &config.symbols {
        Some(symbols) => symbols.iter().cloned().collect(),
        None => {
            tracing::info!("Discovering security symbols...");
            let directory = Arc::new(DropdownDirectory::new(discovery_url()));
            SymbolExtractor::new(directory).symbols().await?
        }
    };
    tracing::info!("Found {} valid security symbols", security_ids.len());

    let report = service.update(&security_ids, config.concurrency).await?;

    if report.is_success() {
        tracing::info!("{}", report.summary());
    } else {
        tracing::warn!("{}", report.summary());
        for error in &report.errors {
            tracing::warn!("  {}", error);
        }
    }

    Ok(())
}
