//! Orchestration: cache-gated listing loads and batched quote fetches.

use std::sync::Arc;

use futures::future::try_join_all;
use log::{debug, info};
use urlencoding::encode;

use crate::cache::{CacheState, SymbolCache};
use crate::errors::MarketDataError;
use crate::models::{Exchange, QuoteRecord, SymbolRecord};
use crate::provider::{ListingProvider, QuoteProvider};

/// Maximum number of symbols combined into a single quote request.
pub const BATCH_SIZE: usize = 50;

/// Listing column holding the symbol identifier.
const SYMBOL_FIELD: &str = "Symbol";

/// Fetches listings and quotes through the provider seams, serving
/// listings from the disk cache while they are fresh.
pub struct MarketDataService {
    listings: Arc<dyn ListingProvider>,
    quotes: Arc<dyn QuoteProvider>,
    cache: SymbolCache,
}

impl MarketDataService {
    pub fn new(
        listings: Arc<dyn ListingProvider>,
        quotes: Arc<dyn QuoteProvider>,
        cache: SymbolCache,
    ) -> Self {
        Self {
            listings,
            quotes,
            cache,
        }
    }

    /// Symbol listing for an exchange, cache-gated.
    ///
    /// A fresh cache entry is served as-is. On a miss, stale entry, or
    /// corrupt entry the listing is fetched remotely and written back
    /// before being returned; a failed write-back fails the whole call
    /// even though the fetch succeeded.
    pub async fn symbols(&self, exchange: Exchange) -> Result<Vec<SymbolRecord>, MarketDataError> {
        let key = exchange.cache_key();

        match self.cache.load(&key) {
            CacheState::Hit(records) => {
                info!("{}: serving {} symbols from cache", key, records.len());
                return Ok(records);
            }
            state => debug!("{}: cache bypassed ({:?}), fetching remotely", key, state),
        }

        let records = self.listings.fetch_listings(exchange).await?;
        info!(
            "{}: fetched {} symbols from {}",
            key,
            records.len(),
            self.listings.id()
        );
        self.cache.store(&key, &records)?;

        Ok(records)
    }

    /// Fetch quotes for every listed symbol of an exchange.
    ///
    /// The listing is partitioned into ordered batches of at most
    /// [`BATCH_SIZE`] symbols, one concurrent quote fetch is dispatched
    /// per batch, and all fetches are joined. The join is all-or-nothing:
    /// the first failure fails the call, and on success the records are
    /// flattened in batch order, not completion order.
    pub async fn quote_table(
        &self,
        exchange: Exchange,
        flags: &str,
    ) -> Result<Vec<QuoteRecord>, MarketDataError> {
        let symbols = self.symbols(exchange).await?;
        let ids = symbol_ids(&symbols);
        let batches = build_batches(&ids);
        info!(
            "dispatching {} quote batches for {} symbols",
            batches.len(),
            ids.len()
        );

        let fetches = batches
            .iter()
            .map(|batch| self.quotes.fetch_quotes(batch, flags));
        let results = try_join_all(fetches).await?;

        Ok(results.into_iter().flatten().collect())
    }
}

/// Extract symbol identifiers from listing records, in listing order.
///
/// Records without a symbol column are skipped.
pub(crate) fn symbol_ids(records: &[SymbolRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.get(SYMBOL_FIELD))
        .map(str::to_string)
        .collect()
}

/// Partition symbol identifiers into request batches.
///
/// Each identifier is URL-encoded; batches hold at most [`BATCH_SIZE`]
/// identifiers joined by `+`, partitioning the input in order with no
/// overlap and no gaps.
pub(crate) fn build_batches(ids: &[String]) -> Vec<String> {
    ids.chunks(BATCH_SIZE)
        .map(|chunk| {
            chunk
                .iter()
                .map(|id| encode(id).into_owned())
                .collect::<Vec<_>>()
                .join("+")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tempfile::TempDir;

    fn listing(symbols: &[&str]) -> Vec<SymbolRecord> {
        symbols
            .iter()
            .map(|s| {
                [(SYMBOL_FIELD.to_string(), s.to_string())]
                    .into_iter()
                    .collect()
            })
            .collect()
    }

    struct FakeListings {
        records: Vec<SymbolRecord>,
        calls: AtomicUsize,
    }

    impl FakeListings {
        fn new(records: Vec<SymbolRecord>) -> Arc<Self> {
            Arc::new(Self {
                records,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ListingProvider for FakeListings {
        fn id(&self) -> &'static str {
            "FAKE_LISTINGS"
        }

        async fn fetch_listings(
            &self,
            _exchange: Exchange,
        ) -> Result<Vec<SymbolRecord>, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.records.clone())
        }
    }

    /// Echoes one record per batch carrying the batch string, optionally
    /// failing on a chosen batch.
    struct FakeQuotes {
        fail_on: Option<String>,
    }

    #[async_trait]
    impl QuoteProvider for FakeQuotes {
        fn id(&self) -> &'static str {
            "FAKE_QUOTES"
        }

        async fn fetch_quotes(
            &self,
            batch: &str,
            _flags: &str,
        ) -> Result<Vec<QuoteRecord>, MarketDataError> {
            if self.fail_on.as_deref() == Some(batch) {
                return Err(MarketDataError::ProviderError {
                    provider: "FAKE_QUOTES".to_string(),
                    message: "batch failed".to_string(),
                });
            }
            Ok(vec![[("Batch".to_string(), batch.to_string())]
                .into_iter()
                .collect()])
        }
    }

    fn service(
        listings: Arc<FakeListings>,
        quotes: FakeQuotes,
        dir: &TempDir,
    ) -> MarketDataService {
        MarketDataService::new(
            listings,
            Arc::new(quotes),
            SymbolCache::new(dir.path()).unwrap(),
        )
    }

    #[test]
    fn test_batches_partition_in_order() {
        let ids: Vec<String> = (0..120).map(|i| format!("S{:03}", i)).collect();
        let batches = build_batches(&ids);

        assert_eq!(batches.len(), 3);
        let sizes: Vec<usize> = batches
            .iter()
            .map(|b| b.split('+').count())
            .collect();
        assert_eq!(sizes, vec![50, 50, 20]);

        // No symbol duplicated or dropped, original order preserved.
        let rejoined: Vec<&str> = batches.iter().flat_map(|b| b.split('+')).collect();
        assert_eq!(rejoined, ids.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_batch_symbols_are_url_encoded() {
        let ids = vec!["BF B".to_string(), "^GSPC".to_string()];
        let batches = build_batches(&ids);
        assert_eq!(batches, vec!["BF%20B+%5EGSPC"]);
    }

    #[test]
    fn test_symbol_ids_skip_records_without_symbol() {
        let mut records = listing(&["ABC", "DEF"]);
        records.insert(
            1,
            [("Name".to_string(), "No Symbol Corp".to_string())]
                .into_iter()
                .collect(),
        );
        assert_eq!(symbol_ids(&records), vec!["ABC", "DEF"]);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_remote_fetch() {
        let dir = TempDir::new().unwrap();
        let records = listing(&["ABC", "DEF"]);

        let cache = SymbolCache::new(dir.path()).unwrap();
        cache.store(&Exchange::Nyse.cache_key(), &records).unwrap();

        let listings = FakeListings::new(Vec::new());
        let svc = service(listings.clone(), FakeQuotes { fail_on: None }, &dir);

        let symbols = svc.symbols(Exchange::Nyse).await.unwrap();
        assert_eq!(symbols, records);
        assert_eq!(listings.calls(), 0);
    }

    #[tokio::test]
    async fn test_cache_miss_fetches_and_writes_back() {
        let dir = TempDir::new().unwrap();
        let records = listing(&["ABC"]);
        let listings = FakeListings::new(records.clone());
        let svc = service(listings.clone(), FakeQuotes { fail_on: None }, &dir);

        let symbols = svc.symbols(Exchange::Amex).await.unwrap();
        assert_eq!(symbols, records);
        assert_eq!(listings.calls(), 1);

        // Second call is served from the freshly written cache entry.
        let symbols = svc.symbols(Exchange::Amex).await.unwrap();
        assert_eq!(symbols, records);
        assert_eq!(listings.calls(), 1);
    }

    #[tokio::test]
    async fn test_write_back_failure_fails_the_fetch() {
        let dir = TempDir::new().unwrap();
        let cache_dir = dir.path().join("gone");
        let cache = SymbolCache::new(&cache_dir).unwrap();
        std::fs::remove_dir_all(&cache_dir).unwrap();

        let listings = FakeListings::new(listing(&["ABC"]));
        let svc = MarketDataService::new(
            listings.clone(),
            Arc::new(FakeQuotes { fail_on: None }),
            cache,
        );

        let err = svc.symbols(Exchange::Nyse).await.unwrap_err();
        assert!(matches!(err, MarketDataError::CacheWriteFailed { .. }));
        // The remote fetch did happen; only the write-back failed.
        assert_eq!(listings.calls(), 1);
    }

    #[tokio::test]
    async fn test_quote_table_preserves_batch_order() {
        let dir = TempDir::new().unwrap();
        let symbols: Vec<String> = (0..120).map(|i| format!("S{:03}", i)).collect();
        let records = listing(&symbols.iter().map(String::as_str).collect::<Vec<_>>());
        let listings = FakeListings::new(records);
        let svc = service(listings, FakeQuotes { fail_on: None }, &dir);

        let quotes = svc.quote_table(Exchange::Nyse, "sl1rv").await.unwrap();
        assert_eq!(quotes.len(), 3);

        let expected = build_batches(&symbols);
        let got: Vec<&str> = quotes.iter().map(|q| q.get("Batch").unwrap()).collect();
        assert_eq!(got, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_quote_table_is_all_or_nothing() {
        let dir = TempDir::new().unwrap();
        let symbols: Vec<String> = (0..120).map(|i| format!("S{:03}", i)).collect();
        let records = listing(&symbols.iter().map(String::as_str).collect::<Vec<_>>());
        let listings = FakeListings::new(records);

        // Fail the middle batch; the whole join must fail.
        let fail_on = build_batches(&symbols)[1].clone();
        let svc = service(listings, FakeQuotes { fail_on: Some(fail_on) }, &dir);

        let err = svc.quote_table(Exchange::Nyse, "sl1rv").await.unwrap_err();
        assert!(matches!(err, MarketDataError::ProviderError { .. }));
    }
}
