//! Environment-driven configuration.

use berza_core::ingest::DEFAULT_CONCURRENCY;

const DEFAULT_DATABASE_URL: &str = "berza.db";

pub struct Config {
    /// SQLite database path.
    pub database_url: String,
    /// Cap on concurrently running fetch workers.
    pub concurrency: usize,
    /// Optional fixed symbol list, bypassing discovery.
    pub symbols: Option<Vec<String>>,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = std::env::var("BERZA_DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let concurrency = std::env::var("BERZA_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CONCURRENCY);

        let symbols = std::env::var("BERZA_SYMBOLS")
            .ok()
            .map(|v| parse_symbol_list(&v))
            .filter(|list| !list.is_empty());

        Self {
            database_url,
            concurrency,
            symbols,
        }
    }
}

fn parse_symbol_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbol_list() {
        assert_eq!(
            parse_symbol_list("ALK, KMB ,TEL"),
            vec!["ALK".to_string(), "KMB".to_string(), "TEL".to_string()]
        );
        assert!(parse_symbol_list(" , ,").is_empty());
    }
}
