//! NASDAQ screener listing provider.
//!
//! The screener endpoint serves the full company list for an exchange as
//! CSV with a header row. The same endpoint covers NASDAQ, NYSE, and AMEX
//! listings via its `exchange` query parameter.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;

use crate::csv::{tokenize, DEFAULT_DELIMITER};
use crate::errors::MarketDataError;
use crate::models::{Exchange, SymbolRecord};
use crate::provider::ListingProvider;

const NASDAQ_SYMBOLS_URL: &str =
    "http://www.nasdaq.com/screening/companies-by-name.aspx?letter=0&exchange=nasdaq&render=download";
const NYSE_SYMBOLS_URL: &str =
    "http://www.nasdaq.com/screening/companies-by-name.aspx?letter=0&exchange=nyse&render=download";
const AMEX_SYMBOLS_URL: &str =
    "http://www.nasdaq.com/screening/companies-by-name.aspx?letter=0&exchange=amex&render=download";

const PROVIDER_ID: &str = "NASDAQ";

/// Listing provider backed by the NASDAQ company screener.
pub struct NasdaqListingProvider {
    client: Client,
}

impl Default for NasdaqListingProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl NasdaqListingProvider {
    /// Create a new screener provider with a 30s request timeout.
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    fn listing_url(exchange: Exchange) -> &'static str {
        match exchange {
            Exchange::Nasdaq => NASDAQ_SYMBOLS_URL,
            Exchange::Nyse => NYSE_SYMBOLS_URL,
            Exchange::Amex => AMEX_SYMBOLS_URL,
        }
    }
}

#[async_trait]
impl ListingProvider for NasdaqListingProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_listings(
        &self,
        exchange: Exchange,
    ) -> Result<Vec<SymbolRecord>, MarketDataError> {
        let url = Self::listing_url(exchange);
        debug!("{} listing request: {}", PROVIDER_ID, url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let text = response.text().await?;
        let records = map_listing_rows(tokenize(&text, DEFAULT_DELIMITER));
        debug!(
            "{}: fetched {} listings for {}",
            PROVIDER_ID,
            records.len(),
            exchange
        );

        Ok(records)
    }
}

/// Map tokenized listing rows into records keyed by the header row.
///
/// Empty header cells are skipped but still consume a position, so the
/// trailing comma every screener line carries does not produce an empty
/// key. A data row with more than one cell beyond the header is logged
/// as an anomaly but still processed.
pub(crate) fn map_listing_rows(rows: Vec<Vec<String>>) -> Vec<SymbolRecord> {
    let mut rows = rows.into_iter();
    let header = match rows.next() {
        Some(header) => header,
        None => return Vec::new(),
    };

    rows.map(|row| {
        if header.len() + 1 < row.len() {
            warn!(
                "listing row has extra cells: {} cells for {} header columns",
                row.len(),
                header.len()
            );
        }

        header
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.is_empty())
            .filter_map(|(i, name)| row.get(i).map(|cell| (name.clone(), cell.clone())))
            .collect()
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_row_maps_data_row() {
        let records = map_listing_rows(tokenize("Symbol,Name\nABC,Acme Corp", DEFAULT_DELIMITER));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Symbol"), Some("ABC"));
        assert_eq!(records[0].get("Name"), Some("Acme Corp"));
        assert_eq!(records[0].len(), 2);
    }

    #[test]
    fn test_empty_header_cell_skipped_but_consumes_position() {
        // Screener lines end with a trailing comma, yielding an empty
        // final header cell.
        let rows = tokenize(
            "Symbol,,Name,\nABC,ignored,Acme Corp,\n",
            DEFAULT_DELIMITER,
        );
        let records = map_listing_rows(rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 2);
        assert_eq!(records[0].get("Symbol"), Some("ABC"));
        assert_eq!(records[0].get("Name"), Some("Acme Corp"));
        assert_eq!(records[0].get(""), None);
    }

    #[test]
    fn test_short_data_row_omits_missing_columns() {
        let records = map_listing_rows(tokenize("Symbol,Name,Sector\nABC", DEFAULT_DELIMITER));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Symbol"), Some("ABC"));
        assert_eq!(records[0].get("Name"), None);
        assert_eq!(records[0].get("Sector"), None);
    }

    #[test]
    fn test_extra_cells_are_nonfatal() {
        // Two cells beyond the header triggers the diagnostic path; the
        // row must still map.
        let records =
            map_listing_rows(tokenize("Symbol\nABC,extra,extra2", DEFAULT_DELIMITER));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Symbol"), Some("ABC"));
    }

    #[test]
    fn test_no_rows_yields_no_records() {
        assert!(map_listing_rows(Vec::new()).is_empty());
        assert!(map_listing_rows(tokenize("Symbol,Name", DEFAULT_DELIMITER)).is_empty());
    }

    #[test]
    fn test_quoted_company_name_with_comma() {
        let records = map_listing_rows(tokenize(
            "Symbol,Name\nNYI,\"New York, Inc.\"",
            DEFAULT_DELIMITER,
        ));
        assert_eq!(records[0].get("Name"), Some("New York, Inc."));
    }
}
