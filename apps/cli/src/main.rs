//! Quotefeed — fetch quotes for every symbol listed on an exchange.
//!
//! Loads the exchange's symbol listing (from the 24h disk cache when
//! fresh, otherwise from the NASDAQ screener), batches the symbols into
//! quote requests against the Yahoo quotes endpoint, and prints the
//! aggregated quote records as JSON.
//!
//! ```bash
//! quotefeed --exchange nyse --flags sl1rv --cache-dir ./cache
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::info;

use quotefeed_market_data::{
    Exchange, MarketDataService, NasdaqListingProvider, SymbolCache, YahooQuoteProvider,
};

#[derive(Parser, Debug)]
#[command(name = "quotefeed", about = "Fetch exchange-wide stock quotes")]
struct Args {
    /// Exchange whose listing to quote: nasdaq, nyse, or amex.
    #[arg(long, default_value = "nyse")]
    exchange: String,

    /// Quote flag string selecting the fields to fetch.
    #[arg(long, default_value = "sl1rv")]
    flags: String,

    /// Directory holding the symbol listing cache.
    #[arg(long, default_value = "./cache")]
    cache_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    let exchange: Exchange = args.exchange.parse()?;
    let service = MarketDataService::new(
        Arc::new(NasdaqListingProvider::new()),
        Arc::new(YahooQuoteProvider::new()),
        SymbolCache::new(&args.cache_dir)?,
    );

    let quotes = service.quote_table(exchange, &args.flags).await?;
    info!("{} quotes fetched for {}", quotes.len(), exchange);

    println!("{}", serde_json::to_string(&quotes)?);
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
