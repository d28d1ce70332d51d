//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `ListingProvider` and `QuoteProvider` traits the service depends on
//! - Concrete HTTP-backed implementations (NASDAQ screener, Yahoo quotes)
//!
//! Providers own their payload parsing: the NASDAQ module maps header-row
//! listing CSVs, the Yahoo module owns the flag table and the flag-driven
//! quote row mapping. The shared quote-aware tokenizer lives in
//! [`crate::csv`].

mod traits;

pub mod nasdaq;
pub mod yahoo;

pub use nasdaq::NasdaqListingProvider;
pub use traits::{ListingProvider, QuoteProvider};
pub use yahoo::YahooQuoteProvider;
