//! Provider trait definitions.
//!
//! The orchestration service only ever talks to these traits, so tests
//! can substitute in-memory fakes for the HTTP-backed implementations.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{Exchange, QuoteRecord, SymbolRecord};

/// Source of exchange symbol listings.
#[async_trait]
pub trait ListingProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and error messages.
    fn id(&self) -> &'static str;

    /// Fetch the full symbol listing for an exchange.
    ///
    /// Returns one record per listed symbol, keyed by the listing CSV's
    /// header cells.
    async fn fetch_listings(&self, exchange: Exchange)
        -> Result<Vec<SymbolRecord>, MarketDataError>;
}

/// Source of price quotes.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and error messages.
    fn id(&self) -> &'static str;

    /// Fetch quotes for one batch of symbols.
    ///
    /// `batch` is a `+`-joined string of URL-encoded symbols; `flags`
    /// selects the quote fields and determines the keys of the returned
    /// records. One record is returned per symbol in the batch.
    async fn fetch_quotes(
        &self,
        batch: &str,
        flags: &str,
    ) -> Result<Vec<QuoteRecord>, MarketDataError>;
}
