//! Yahoo quote provider.
//!
//! Fetches `finance.yahoo.com/d/quotes.csv` with query parameters `s`
//! (a `+`-joined batch of URL-encoded symbols) and `f` (the flag string
//! selecting quote fields). The response has no header row; one row is
//! returned per symbol in the batch, and columns follow the flag order.

mod flags;

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::csv::{tokenize, DEFAULT_DELIMITER};
use crate::errors::MarketDataError;
use crate::models::QuoteRecord;
use crate::provider::QuoteProvider;

pub use flags::{flag_label, unpack_flags, QUOTE_FLAGS};

const YAHOO_QUOTES_URL: &str = "http://finance.yahoo.com/d/quotes.csv";
const PROVIDER_ID: &str = "YAHOO";

/// Quote provider backed by the Yahoo quotes CSV endpoint.
pub struct YahooQuoteProvider {
    client: Client,
}

impl Default for YahooQuoteProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooQuoteProvider {
    /// Create a new quote provider with a 30s request timeout.
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_quotes(
        &self,
        batch: &str,
        flags: &str,
    ) -> Result<Vec<QuoteRecord>, MarketDataError> {
        // The batch symbols are URL-encoded upstream and joined with
        // literal `+` separators, so the query string is assembled by hand;
        // a parameter encoder would rewrite the separators as %2B.
        let url = format!("{}?s={}&f={}", YAHOO_QUOTES_URL, batch, flags);
        debug!("{} quote request: {}", PROVIDER_ID, url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let text = response.text().await?;
        let records = map_quote_rows(tokenize(&text, DEFAULT_DELIMITER), flags)?;
        debug!("{}: fetched {} quotes", PROVIDER_ID, records.len());

        Ok(records)
    }
}

/// Map headerless quote rows into records keyed by the labels the flag
/// string resolves to.
///
/// Cell counts are not validated against the field list: a short row
/// simply omits the trailing fields and extra cells are ignored.
pub(crate) fn map_quote_rows(
    rows: Vec<Vec<String>>,
    flags: &str,
) -> Result<Vec<QuoteRecord>, MarketDataError> {
    let fields = unpack_flags(flags)?;

    let records = rows
        .into_iter()
        .map(|row| {
            fields
                .iter()
                .enumerate()
                .filter_map(|(i, code)| {
                    let label = flag_label(code)?;
                    row.get(i).map(|cell| (label.to_string(), cell.clone()))
                })
                .collect()
        })
        .collect();

    Ok(records)
}
