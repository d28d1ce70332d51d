//! Yahoo quote flag table and flag-string unpacking.
//!
//! A quote request selects its fields through the `f` query parameter, a
//! concatenation of one- and two-character codes with no separator. The
//! table below maps each known code to the human-readable label used to
//! key the resulting quote records.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::errors::MarketDataError;

lazy_static! {
    /// Known quote flag codes and their field labels. Initialized once,
    /// never mutated.
    pub static ref QUOTE_FLAGS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("a", "Ask");
        m.insert("a2", "Average Daily Volume");
        m.insert("a5", "Ask Size");
        m.insert("b", "Bid");
        m.insert("b2", "Ask (Real-time)");
        m.insert("b3", "Bid (Real-time)");
        m.insert("b4", "Book Value");
        m.insert("b6", "Bid Size");
        m.insert("c", "Change & Percent Change");
        m.insert("c1", "Change");
        m.insert("c3", "Commission");
        m.insert("c6", "Change (Real-time)");
        m.insert("c8", "After Hours Change (Real-time)");
        m.insert("d", "Dividend/Share");
        m.insert("d1", "Last Trade Date");
        m.insert("d2", "Trade Date");
        m.insert("e", "Earnings/Share");
        m.insert("e1", "Error Indication (returned for symbol changed / invalid)");
        m.insert("e7", "EPS Estimate Current Year");
        m.insert("e8", "EPS Estimate Next Year");
        m.insert("e9", "EPS Estimate Next Quarter");
        m.insert("f6", "Float Shares");
        m.insert("g", "Day’s Low");
        m.insert("h", "Day’s High");
        m.insert("j", "52-week Low");
        m.insert("k", "52-week High");
        m.insert("g1", "Holdings Gain Percent");
        m.insert("g3", "Annualized Gain");
        m.insert("g4", "Holdings Gain");
        m.insert("g5", "Holdings Gain Percent (Real-time)");
        m.insert("g6", "Holdings Gain (Real-time)");
        m.insert("i", "More Info");
        m.insert("i5", "Order Book (Real-time)");
        m.insert("j1", "Market Capitalization");
        m.insert("j3", "Market Cap (Real-time)");
        m.insert("j4", "EBITDA");
        m.insert("j5", "Change From 52-week Low");
        m.insert("j6", "Percent Change From 52-week Low");
        m.insert("k1", "Last Trade (Real-time) With Time");
        m.insert("k2", "Change Percent (Real-time)");
        m.insert("k3", "Last Trade Size");
        m.insert("k4", "Change From 52-week High");
        m.insert("k5", "Percebt Change From 52-week High");
        m.insert("l", "Last Trade (With Time)");
        m.insert("l1", "Last Trade (Price Only)");
        m.insert("l2", "High Limit");
        m.insert("l3", "Low Limit");
        m.insert("m", "Day’s Range");
        m.insert("m2", "Day’s Range (Real-time)");
        m.insert("m3", "50-day Moving Average");
        m.insert("m4", "200-day Moving Average");
        m.insert("m5", "Change From 200-day Moving Average");
        m.insert("m6", "Percent Change From 200-day Moving Average");
        m.insert("m7", "Change From 50-day Moving Average");
        m.insert("m8", "Percent Change From 50-day Moving Average");
        m.insert("n", "Name");
        m.insert("n4", "Notes");
        m.insert("o", "Open");
        m.insert("p", "Previous Close");
        m.insert("p1", "Price Paid");
        m.insert("p2", "Change in Percent");
        m.insert("p5", "Price/Sales");
        m.insert("p6", "Price/Book");
        m.insert("q", "Ex-Dividend Date");
        m.insert("r", "P/E Ratio");
        m.insert("r1", "Dividend Pay Date");
        m.insert("r2", "P/E Ratio (Real-time)");
        m.insert("r5", "PEG Ratio");
        m.insert("r6", "Price/EPS Estimate Current Year");
        m.insert("r7", "Price/EPS Estimate Next Year");
        m.insert("s", "Symbol");
        m.insert("s1", "Shares Owned");
        m.insert("s7", "Short Ratio");
        m.insert("t1", "Last Trade Time");
        m.insert("t6", "Trade Links");
        m.insert("t7", "Ticker Trend");
        m.insert("t8", "1 yr Target Price");
        m.insert("v", "Volume");
        m.insert("v1", "Holdings Value");
        m.insert("v7", "Holdings Value (Real-time)");
        m.insert("w", "52-week Range");
        m.insert("w1", "Day’s Value Change");
        m.insert("w4", "Day’s Value Change (Real-time)");
        m.insert("x", "Stock Exchange");
        m.insert("y", "Dividend Yield");
        m
    };
}

/// Decode a flag string into the codes it concatenates, in scan order.
///
/// Codes are one or two characters; the longer match wins. The two-
/// character lookahead is only attempted while the scan position is at
/// least two characters short of the end, so the final two characters are
/// always consumed one at a time even when their combination is a valid
/// code. A character with no match at either width fails the whole
/// decode.
pub fn unpack_flags(flags: &str) -> Result<Vec<&'static str>, MarketDataError> {
    unpack_with(&QUOTE_FLAGS, flags)
}

/// Resolve a decoded code to its field label.
pub fn flag_label(code: &str) -> Option<&'static str> {
    QUOTE_FLAGS.get(code).copied()
}

fn unpack_with<'t>(
    table: &HashMap<&'t str, &'t str>,
    flags: &str,
) -> Result<Vec<&'t str>, MarketDataError> {
    let chars: Vec<char> = flags.chars().collect();
    let mut fields = Vec::new();

    let mut i = 0;
    while i < chars.len() {
        if i + 2 < chars.len() {
            let pair: String = chars[i..i + 2].iter().collect();
            if let Some((code, _)) = table.get_key_value(pair.as_str()) {
                fields.push(*code);
                i += 2;
                continue;
            }
        }

        let single = chars[i].to_string();
        match table.get_key_value(single.as_str()) {
            Some((code, _)) => {
                fields.push(*code);
                i += 1;
            }
            None => return Err(MarketDataError::UnknownFlag(chars[i])),
        }
    }

    Ok(fields)
}
