//! HTML parsing for the symbol-history page.
//!
//! The result table has nine positional columns, of which six are kept:
//!
//! | # | column                     | kept |
//! |---|----------------------------|------|
//! | 0 | Date                       | yes  |
//! | 1 | Last Trade Price           | yes  |
//! | 2 | Max                        | yes  |
//! | 3 | Min                        | yes  |
//! | 4 | Avg. Price                 | no   |
//! | 5 | %chg.                      | no   |
//! | 6 | Volume                     | yes  |
//! | 7 | Turnover in BEST (denars)  | yes  |
//! | 8 | Total turnover (denars)    | no   |

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use scraper::{Html, Selector};

use crate::errors::MarketDataError;
use crate::models::PricePoint;

const RESULTS_TABLE_SELECTOR: &str = "table#resultsTable";
const COLUMN_COUNT: usize = 9;

/// Date renderings the site has been observed to use.
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%d.%m.%Y", "%Y-%m-%d"];

/// Coerce a table cell to a decimal value.
///
/// Accepts thousands separators and surrounding whitespace. Blank cells and
/// the literal placeholders `None`/`NULL` are absent, as is anything that
/// still fails to parse after cleaning.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "None" || trimmed == "NULL" {
        return None;
    }
    let cleaned: String = trimmed
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    Decimal::from_str(&cleaned).ok()
}

/// Coerce a table cell to a calendar date, trying the known renderings.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

fn selector(symbol: &str, css: &str) -> Result<Selector, MarketDataError> {
    Selector::parse(css).map_err(|e| MarketDataError::Parse {
        symbol: symbol.to_string(),
        message: format!("invalid selector '{}': {}", css, e),
    })
}

/// Parse the single result table out of a symbol-history page.
///
/// A page without the table means the window had no trades and yields an
/// empty vec. Rows that fail the completeness invariant (missing last trade
/// price, max or min) are dropped here; they cannot be repaired later
/// because the source does not allow re-querying a single field.
///
/// An unparsable date cell is a parse failure for the whole window: it means
/// the page layout changed and silently skipping rows would hide real gaps.
pub fn parse_history_table(
    symbol: &str,
    html: &str,
) -> Result<Vec<PricePoint>, MarketDataError> {
    let document = Html::parse_document(html);
    let table_sel = selector(symbol, RESULTS_TABLE_SELECTOR)?;
    let row_sel = selector(symbol, "tr")?;
    let cell_sel = selector(symbol, "td")?;

    let Some(table) = document.select(&table_sel).next() else {
        return Ok(Vec::new());
    };

    let mut points = Vec::new();
    for row in table.select(&row_sel) {
        let cells: Vec<String> = row
            .select(&cell_sel)
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();

        // Header and spacer rows carry no (or fewer) data cells.
        if cells.len() < COLUMN_COUNT {
            continue;
        }

        let trade_date = parse_date(&cells[0]).ok_or_else(|| MarketDataError::Parse {
            symbol: symbol.to_string(),
            message: format!("unparsable date '{}'", cells[0]),
        })?;

        let point = PricePoint {
            security_id: symbol.to_string(),
            trade_date,
            last_trade_price: parse_decimal(&cells[1]),
            max_price: parse_decimal(&cells[2]),
            min_price: parse_decimal(&cells[3]),
            volume: parse_decimal(&cells[6]),
            turnover: parse_decimal(&cells[7]),
        };

        if point.is_complete() {
            points.push(point);
        }
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn history_page(rows: &str) -> String {
        format!(
            r#"<html><body>
            <table id="resultsTable">
              <thead>
                <tr><th>Date</th><th>Last Trade Price</th><th>Max</th><th>Min</th>
                    <th>Avg. Price</th><th>%chg.</th><th>Volume</th>
                    <th>Turnover in BEST (denars)</th><th>Total turnover (denars)</th></tr>
              </thead>
              <tbody>{}</tbody>
            </table>
            </body></html>"#,
            rows
        )
    }

    #[test]
    fn test_parse_decimal_plain() {
        assert_eq!(parse_decimal("5"), Some(dec!(5)));
        assert_eq!(parse_decimal("5200.50"), Some(dec!(5200.50)));
    }

    #[test]
    fn test_parse_decimal_thousands_separators_and_whitespace() {
        assert_eq!(parse_decimal("1,234.50"), Some(dec!(1234.50)));
        assert_eq!(parse_decimal("  21,510 "), Some(dec!(21510)));
        assert_eq!(parse_decimal("1 234 567.89"), Some(dec!(1234567.89)));
    }

    #[test]
    fn test_parse_decimal_absent_values() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("   "), None);
        assert_eq!(parse_decimal("None"), None);
        assert_eq!(parse_decimal("NULL"), None);
        assert_eq!(parse_decimal("n/a"), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_date("3/15/2024"), Some(expected));
        assert_eq!(parse_date("15.03.2024"), Some(expected));
        assert_eq!(parse_date("2024-03-15"), Some(expected));
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_parse_table_retains_six_columns() {
        let html = history_page(
            "<tr><td>3/15/2024</td><td>5,200.00</td><td>5,250.00</td><td>5,100.00</td>\
             <td>5,180.00</td><td>0.52</td><td>143</td><td>744,100</td><td>744,100</td></tr>",
        );
        let points = parse_history_table("ALK", &html).unwrap();
        assert_eq!(points.len(), 1);

        let point = &points[0];
        assert_eq!(point.security_id, "ALK");
        assert_eq!(
            point.trade_date,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert_eq!(point.last_trade_price, Some(dec!(5200.00)));
        assert_eq!(point.max_price, Some(dec!(5250.00)));
        assert_eq!(point.min_price, Some(dec!(5100.00)));
        assert_eq!(point.volume, Some(dec!(143)));
        assert_eq!(point.turnover, Some(dec!(744100)));
    }

    #[test]
    fn test_parse_table_drops_incomplete_rows() {
        let html = history_page(
            "<tr><td>3/14/2024</td><td></td><td>5,250.00</td><td>5,100.00</td>\
             <td></td><td></td><td>0</td><td>0</td><td>0</td></tr>\
             <tr><td>3/15/2024</td><td>5,200.00</td><td>5,250.00</td><td>5,100.00</td>\
             <td>5,180.00</td><td>0.52</td><td>143</td><td>744,100</td><td>744,100</td></tr>",
        );
        let points = parse_history_table("ALK", &html).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(
            points[0].trade_date,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
    }

    #[test]
    fn test_parse_table_empty_cells_become_absent() {
        let html = history_page(
            "<tr><td>3/15/2024</td><td>100.00</td><td>101.00</td><td>99.00</td>\
             <td>None</td><td></td><td></td><td>NULL</td><td></td></tr>",
        );
        let points = parse_history_table("KMB", &html).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].volume, None);
        assert_eq!(points[0].turnover, None);
    }

    #[test]
    fn test_missing_table_is_empty_not_error() {
        let html = "<html><body><p>No results for this period.</p></body></html>";
        let points = parse_history_table("ALK", html).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_unparsable_date_is_a_parse_error() {
        let html = history_page(
            "<tr><td>someday</td><td>100.00</td><td>101.00</td><td>99.00</td>\
             <td></td><td></td><td>1</td><td>100</td><td>100</td></tr>",
        );
        let err = parse_history_table("ALK", &html).unwrap_err();
        assert!(matches!(err, MarketDataError::Parse { .. }));
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let html = history_page("<tr><td>3/15/2024</td><td>100.00</td></tr>");
        let points = parse_history_table("ALK", &html).unwrap();
        assert!(points.is_empty());
    }
}
