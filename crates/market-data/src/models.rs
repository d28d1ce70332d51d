//! Core data types: exchanges and the string-keyed record maps produced
//! by the CSV mappers.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;

/// Exchanges whose symbol listings can be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Nasdaq,
    Nyse,
    Amex,
}

impl Exchange {
    /// All supported exchanges.
    pub const ALL: [Exchange; 3] = [Exchange::Nasdaq, Exchange::Nyse, Exchange::Amex];

    /// Logical cache key for this exchange's symbol listing,
    /// e.g. `symbols.nyse`.
    pub fn cache_key(&self) -> String {
        format!("symbols.{}", self)
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Exchange::Nasdaq => "nasdaq",
            Exchange::Nyse => "nyse",
            Exchange::Amex => "amex",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Exchange {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nasdaq" => Ok(Exchange::Nasdaq),
            "nyse" => Ok(Exchange::Nyse),
            "amex" => Ok(Exchange::Amex),
            other => Err(MarketDataError::UnknownExchange(other.to_string())),
        }
    }
}

/// One listed symbol, keyed by the listing CSV's header cells.
///
/// Produced by the listing record mapper; immutable once produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolRecord(HashMap<String, String>);

impl SymbolRecord {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Value of the given listing column, if the row had one.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub(crate) fn insert(&mut self, field: String, value: String) {
        self.0.insert(field, value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for SymbolRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One quote row, keyed by the human-readable labels resolved from the
/// request's flag string.
///
/// Missing trailing cells are simply absent; extra cells are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteRecord(HashMap<String, String>);

impl QuoteRecord {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Value of the given quote field, if the row had one.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub(crate) fn insert(&mut self, field: String, value: String) {
        self.0.insert(field, value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for QuoteRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
