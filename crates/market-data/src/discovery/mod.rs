//! Symbol discovery strategies.
//!
//! The exchange publishes its listed symbols in more than one place; each
//! place is a [`SymbolDirectory`] strategy. [`SymbolExtractor`] wraps the
//! chosen strategy and enforces the discovery contract the rest of the
//! pipeline relies on: identifiers containing digits (bonds, rights) never
//! make it out.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::errors::MarketDataError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A source of raw symbol identifiers.
#[async_trait]
pub trait SymbolDirectory: Send + Sync {
    /// Fetch raw symbols, unfiltered, in source order.
    async fn symbols(&self) -> Result<Vec<String>, MarketDataError>;
}

/// Wraps a [`SymbolDirectory`] and applies the no-digits filter.
///
/// The strategy can be swapped at runtime; the filter cannot.
pub struct SymbolExtractor {
    directory: Arc<dyn SymbolDirectory>,
}

impl SymbolExtractor {
    pub fn new(directory: Arc<dyn SymbolDirectory>) -> Self {
        Self { directory }
    }

    /// Replace the discovery strategy.
    pub fn set_directory(&mut self, directory: Arc<dyn SymbolDirectory>) {
        self.directory = directory;
    }

    /// Fetch and filter symbols from the current strategy.
    pub async fn symbols(&self) -> Result<HashSet<String>, MarketDataError> {
        let raw = self.directory.symbols().await?;
        Ok(raw
            .into_iter()
            .filter(|code| !code.chars().any(|c| c.is_ascii_digit()))
            .collect())
    }
}

// =============================================================================
// Dropdown strategy
// =============================================================================

/// Reads symbols from the `select#Code` dropdown of a symbol-history page.
pub struct DropdownDirectory {
    client: Client,
    url: String,
}

impl DropdownDirectory {
    /// `url` is any symbol-history page; the dropdown lists every symbol.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: default_client(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl SymbolDirectory for DropdownDirectory {
    async fn symbols(&self) -> Result<Vec<String>, MarketDataError> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_dropdown(&body)
    }
}

fn parse_dropdown(html: &str) -> Result<Vec<String>, MarketDataError> {
    let document = Html::parse_document(html);
    let option_sel =
        Selector::parse("select#Code option").map_err(|e| MarketDataError::Parse {
            symbol: "discovery".to_string(),
            message: format!("invalid selector: {}", e),
        })?;

    Ok(document
        .select(&option_sel)
        .filter_map(|option| option.value().attr("value"))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect())
}

// =============================================================================
// Listing-table strategy
// =============================================================================

/// Reads first-column symbols from `table#otherlisting-table` across one or
/// more listing pages. A page that fails to load is logged and skipped so a
/// single bad page does not lose the rest.
pub struct TableDirectory {
    client: Client,
    urls: Vec<String>,
}

impl TableDirectory {
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            client: default_client(),
            urls,
        }
    }
}

#[async_trait]
impl SymbolDirectory for TableDirectory {
    async fn symbols(&self) -> Result<Vec<String>, MarketDataError> {
        let mut all = Vec::new();
        for url in &self.urls {
            let body = match self.fetch_page(url).await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Error fetching listing page {}: {}", url, e);
                    continue;
                }
            };
            all.extend(parse_listing_table(&body)?);
        }

        // Dedupe while preserving first-seen order.
        let mut seen = HashSet::new();
        all.retain(|code| seen.insert(code.clone()));
        Ok(all)
    }
}

impl TableDirectory {
    async fn fetch_page(&self, url: &str) -> Result<String, MarketDataError> {
        Ok(self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?)
    }
}

fn parse_listing_table(html: &str) -> Result<Vec<String>, MarketDataError> {
    let document = Html::parse_document(html);
    let row_sel = Selector::parse("table#otherlisting-table tr").map_err(|e| {
        MarketDataError::Parse {
            symbol: "discovery".to_string(),
            message: format!("invalid selector: {}", e),
        }
    })?;
    let cell_sel = Selector::parse("td").map_err(|e| MarketDataError::Parse {
        symbol: "discovery".to_string(),
        message: format!("invalid selector: {}", e),
    })?;

    Ok(document
        .select(&row_sel)
        .filter_map(|row| row.select(&cell_sel).next())
        .map(|td| td.text().collect::<String>().trim().to_string())
        .filter(|symbol| !symbol.is_empty())
        .collect())
}

fn default_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}
