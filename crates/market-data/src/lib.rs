//! Quotefeed Market Data Crate
//!
//! This crate fetches exchange symbol listings and price quotes from
//! remote CSV endpoints, caches listings on disk, and maps the
//! provider-specific payloads into string-keyed records.
//!
//! # Overview
//!
//! - Listings come from the NASDAQ company screener (NASDAQ, NYSE, AMEX)
//!   as CSV with a header row, and are cached as JSON for 24 hours.
//! - Quotes come from the Yahoo quotes CSV endpoint, selected by a
//!   compact flag string and fetched in concurrent batches of up to 50
//!   symbols.
//!
//! # Architecture
//!
//! ```text
//! +--------------------+
//! | MarketDataService  |  (cache gate + batch fan-out)
//! +--------------------+
//!      |           |
//!      v           v
//! +---------+  +-----------------+
//! | Symbol  |  | Listing/Quote   |  (NASDAQ screener, Yahoo quotes)
//! | Cache   |  | Providers       |
//! +---------+  +-----------------+
//!                    |
//!                    v
//!              +-----------+
//!              | CSV rows  |  (quote-aware tokenizer, flag unpacking)
//!              +-----------+
//! ```
//!
//! # Core Types
//!
//! - [`Exchange`] - Supported listing exchanges
//! - [`SymbolRecord`] - One listed symbol, keyed by listing CSV headers
//! - [`QuoteRecord`] - One quote row, keyed by resolved flag labels
//! - [`CacheState`] - Tagged outcome of a cache lookup
//! - [`MarketDataError`] - Error type for all operations

pub mod cache;
pub mod csv;
pub mod errors;
pub mod models;
pub mod provider;
pub mod service;

pub use cache::{CacheState, SymbolCache, MAX_CACHE_AGE_HOURS};
pub use errors::MarketDataError;
pub use models::{Exchange, QuoteRecord, SymbolRecord};
pub use provider::{
    ListingProvider, NasdaqListingProvider, QuoteProvider, YahooQuoteProvider,
};
pub use service::{MarketDataService, BATCH_SIZE};
