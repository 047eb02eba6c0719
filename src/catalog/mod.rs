//! Price catalog: the deduplicated, sorted set of symbol -> reference
//! price entries for a session. Built wholesale from a raw feed payload
//! and treated as immutable afterwards; a refresh builds a new catalog.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// One record as it arrives on the wire. The upstream feed is loose about
/// the `price` field and emits either a JSON number or a numeric string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPriceEntry {
    pub currency: String,
    #[serde(deserialize_with = "price_from_number_or_string")]
    pub price: f64,
    #[serde(default)]
    pub date: Option<chrono::DateTime<chrono::Utc>>,
}

fn price_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        // A non-numeric string maps to NAN and is dropped by the build
        // filter rather than failing the whole payload.
        NumberOrString::String(s) => Ok(s.trim().parse::<f64>().unwrap_or(f64::NAN)),
    }
}

/// A single validated catalog entry. Invariant: `reference_price > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub symbol: String,
    pub reference_price: f64,
}

/// Ordered, deduplicated price table. Entries are sorted ascending by
/// symbol using byte-wise string comparison (total and locale
/// independent).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceCatalog {
    entries: Vec<PriceEntry>,
}

impl PriceCatalog {
    /// Builds a catalog from raw feed records.
    ///
    /// - Entries whose price is not a finite number > 0 are dropped.
    /// - Duplicate symbols keep the first occurrence in input order;
    ///   later duplicates are silently dropped.
    /// - The result is sorted ascending by symbol.
    ///
    /// An empty catalog is a valid result and callers must cope with it
    /// (no default token selection).
    pub fn build(raw_entries: Vec<RawPriceEntry>) -> Self {
        let mut seen: HashSet<String> = HashSet::new();
        let mut entries: Vec<PriceEntry> = Vec::with_capacity(raw_entries.len());

        for raw in raw_entries {
            if !(raw.price.is_finite() && raw.price > 0.0) {
                log::debug!("Dropping entry for {}: invalid price {}", raw.currency, raw.price);
                continue;
            }
            if !seen.insert(raw.currency.clone()) {
                log::debug!("Dropping duplicate entry for {}", raw.currency);
                continue;
            }
            entries.push(PriceEntry {
                symbol: raw.currency,
                reference_price: raw.price,
            });
        }

        entries.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        log::info!("Price catalog built with {} entries", entries.len());
        Self { entries }
    }

    /// Reference price for a symbol, if the catalog knows it.
    pub fn price_of(&self, symbol: &str) -> Option<f64> {
        self.entries
            .binary_search_by(|e| e.symbol.as_str().cmp(symbol))
            .ok()
            .map(|idx| self.entries[idx].reference_price)
    }

    pub fn entries(&self) -> &[PriceEntry] {
        &self.entries
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.symbol.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(currency: &str, price: f64) -> RawPriceEntry {
        RawPriceEntry {
            currency: currency.to_string(),
            price,
            date: None,
        }
    }

    #[test]
    fn test_build_filters_dedups_and_sorts() {
        let catalog = PriceCatalog::build(vec![
            raw("ETH", 2500.0),
            raw("BTC", 50000.0),
            raw("ZRO", 0.0),
            raw("NEG", -3.0),
            raw("NAN", f64::NAN),
            raw("BTC", 1.0), // duplicate, first wins
        ]);

        let symbols: Vec<&str> = catalog.symbols().collect();
        assert_eq!(symbols, vec!["BTC", "ETH"]);
        assert_eq!(catalog.price_of("BTC"), Some(50000.0));
        assert_eq!(catalog.price_of("ETH"), Some(2500.0));
        assert_eq!(catalog.price_of("ZRO"), None);
    }

    #[test]
    fn test_build_never_emits_duplicates_or_nonpositive_prices() {
        let catalog = PriceCatalog::build(vec![
            raw("A", 1.0),
            raw("B", 2.0),
            raw("A", 3.0),
            raw("B", 0.0),
            raw("C", f64::INFINITY),
        ]);

        let mut seen = std::collections::HashSet::new();
        for entry in catalog.entries() {
            assert!(seen.insert(entry.symbol.clone()), "duplicate symbol {}", entry.symbol);
            assert!(entry.reference_price > 0.0);
        }
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = PriceCatalog::build(vec![]);
        assert!(catalog.is_empty());
        assert_eq!(catalog.price_of("BTC"), None);
    }

    #[test]
    fn test_price_deserializes_from_number_or_string() {
        let json = r#"[
            {"currency": "BTC", "price": "50000", "date": "2023-08-29T07:10:40.000Z"},
            {"currency": "ETH", "price": 2500.5},
            {"currency": "BAD", "price": "not-a-number"}
        ]"#;
        let raw: Vec<RawPriceEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(raw[0].price, 50000.0);
        assert_eq!(raw[1].price, 2500.5);
        assert!(raw[2].price.is_nan());

        let catalog = PriceCatalog::build(raw);
        assert_eq!(catalog.len(), 2);
    }
}
