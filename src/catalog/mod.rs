//! Footprint catalog
//!
//! Static reference data mapping items to embedded water usage per unit.
//! Loaded once at startup and never mutated; construction validates the
//! data and is the only place a catalog error can occur.

mod data;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Protein,
    Grain,
    Produce,
    Snack,
    Beverage,
    Goods,
    Habit,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Protein => "protein",
            Category::Grain => "grain",
            Category::Produce => "produce",
            Category::Snack => "snack",
            Category::Beverage => "beverage",
            Category::Goods => "goods",
            Category::Habit => "habit",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "protein" => Some(Category::Protein),
            "grain" => Some(Category::Grain),
            "produce" => Some(Category::Produce),
            "snack" => Some(Category::Snack),
            "beverage" => Some(Category::Beverage),
            "goods" => Some(Category::Goods),
            "habit" => Some(Category::Habit),
            _ => None,
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [Category] {
        &[
            Category::Protein,
            Category::Grain,
            Category::Produce,
            Category::Snack,
            Category::Beverage,
            Category::Goods,
            Category::Habit,
        ]
    }
}

/// One item in the footprint catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable identifier, unique within a catalog
    pub key: String,
    /// User-facing display name
    pub label: String,
    /// Literal substrings recognized in free text (synonyms included)
    pub keywords: Vec<String>,
    /// Embedded water usage per unit, in liters
    pub liters_per_unit: f64,
    /// Unit the per-unit amount is expressed in (e.g. "개", "분", "100g")
    pub unit: String,
    pub category: Category,
}

/// Malformed catalog data, fatal at construction time
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog entry has an empty key")]
    EmptyKey,

    #[error("duplicate catalog key: {0}")]
    DuplicateKey(String),

    #[error("catalog entry '{0}' has no keywords")]
    NoKeywords(String),

    #[error("catalog entry '{0}' has an empty keyword")]
    EmptyKeyword(String),

    #[error("catalog entry '{0}' has non-positive amount: {1}")]
    NonPositiveAmount(String, f64),
}

/// Lookup requested for a key that is not in the catalog
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown catalog item: {key}")]
pub struct UnknownItemError {
    pub key: String,
}

/// A keyword prepared for text scanning, tied back to its entry
#[derive(Debug, Clone)]
pub(crate) struct ScanKeyword {
    pub entry_idx: usize,
    /// Keyword with all whitespace removed
    pub text: String,
}

/// Immutable footprint reference table
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_key: HashMap<String, usize>,
    /// All (entry, keyword) pairs, longest keyword first
    scan_order: Vec<ScanKeyword>,
}

/// Remove all whitespace so spaced compound keywords compare equal
pub(crate) fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

impl Catalog {
    /// Build a catalog, validating every entry
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut by_key = HashMap::with_capacity(entries.len());
        let mut scan_order = Vec::new();

        for (idx, entry) in entries.iter().enumerate() {
            if entry.key.is_empty() {
                return Err(CatalogError::EmptyKey);
            }
            if by_key.insert(entry.key.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateKey(entry.key.clone()));
            }
            if entry.keywords.is_empty() {
                return Err(CatalogError::NoKeywords(entry.key.clone()));
            }
            if entry.liters_per_unit <= 0.0 {
                return Err(CatalogError::NonPositiveAmount(
                    entry.key.clone(),
                    entry.liters_per_unit,
                ));
            }
            for keyword in &entry.keywords {
                let text = strip_whitespace(keyword);
                if text.is_empty() {
                    return Err(CatalogError::EmptyKeyword(entry.key.clone()));
                }
                scan_order.push(ScanKeyword {
                    entry_idx: idx,
                    text,
                });
            }
        }

        // Longer keywords first so "돼지고기" is consumed before "고기" can
        // claim the same span. Stable sort keeps declaration order for ties.
        scan_order.sort_by(|a, b| {
            b.text.chars().count().cmp(&a.text.chars().count())
        });

        Ok(Self {
            entries,
            by_key,
            scan_order,
        })
    }

    /// The built-in reference table
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(data::builtin_entries())
    }

    /// Look up an entry by key
    pub fn lookup(&self, key: &str) -> Result<&CatalogEntry, UnknownItemError> {
        self.get(key).ok_or_else(|| UnknownItemError {
            key: key.to_string(),
        })
    }

    /// Look up an entry by key, returning None if absent
    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.by_key.get(key).map(|&idx| &self.entries[idx])
    }

    /// Per-unit amount scaled by a quantity; no unit conversion
    pub fn lookup_and_scale(&self, key: &str, quantity: f64) -> Result<f64, UnknownItemError> {
        let entry = self.lookup(key)?;
        Ok(entry.liters_per_unit * quantity)
    }

    /// All entries in declaration order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entries belonging to one category, in declaration order
    pub fn entries_in(&self, category: Category) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn scan_order(&self) -> &[ScanKeyword] {
        &self.scan_order
    }

    pub(crate) fn entry(&self, idx: usize) -> &CatalogEntry {
        &self.entries[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, keywords: &[&str], liters: f64) -> CatalogEntry {
        CatalogEntry {
            key: key.to_string(),
            label: key.to_string(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            liters_per_unit: liters,
            unit: "개".to_string(),
            category: Category::Snack,
        }
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().expect("builtin catalog must validate");
        assert!(!catalog.is_empty());
        for e in catalog.entries() {
            assert!(e.liters_per_unit > 0.0, "{} has non-positive amount", e.key);
            assert!(!e.keywords.is_empty(), "{} has no keywords", e.key);
        }
    }

    #[test]
    fn test_rejects_duplicate_key() {
        let result = Catalog::new(vec![entry("apple", &["사과"], 125.0), entry("apple", &["사과"], 125.0)]);
        assert!(matches!(result, Err(CatalogError::DuplicateKey(k)) if k == "apple"));
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let result = Catalog::new(vec![entry("apple", &["사과"], 0.0)]);
        assert!(matches!(result, Err(CatalogError::NonPositiveAmount(_, _))));

        let result = Catalog::new(vec![entry("apple", &["사과"], -5.0)]);
        assert!(matches!(result, Err(CatalogError::NonPositiveAmount(_, _))));
    }

    #[test]
    fn test_rejects_empty_keywords() {
        let result = Catalog::new(vec![entry("apple", &[], 125.0)]);
        assert!(matches!(result, Err(CatalogError::NoKeywords(_))));

        let result = Catalog::new(vec![entry("apple", &["  "], 125.0)]);
        assert!(matches!(result, Err(CatalogError::EmptyKeyword(_))));
    }

    #[test]
    fn test_rejects_empty_key() {
        let result = Catalog::new(vec![entry("", &["사과"], 125.0)]);
        assert!(matches!(result, Err(CatalogError::EmptyKey)));
    }

    #[test]
    fn test_lookup_unknown_key() {
        let catalog = Catalog::builtin().unwrap();
        let err = catalog.lookup("no-such-item").unwrap_err();
        assert_eq!(err.key, "no-such-item");
    }

    #[test]
    fn test_lookup_and_scale() {
        let catalog = Catalog::new(vec![entry("apple", &["사과"], 125.0)]).unwrap();
        assert_eq!(catalog.lookup_and_scale("apple", 3.0).unwrap(), 375.0);
        assert!(catalog.lookup_and_scale("pear", 3.0).is_err());
    }

    #[test]
    fn test_scan_order_is_longest_first() {
        let catalog = Catalog::new(vec![
            entry("meat", &["고기"], 500.0),
            entry("pork", &["돼지고기"], 600.0),
        ])
        .unwrap();

        let lengths: Vec<usize> = catalog
            .scan_order()
            .iter()
            .map(|k| k.text.chars().count())
            .collect();
        let mut sorted = lengths.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(lengths, sorted);
        assert_eq!(catalog.scan_order()[0].text, "돼지고기");
    }

    #[test]
    fn test_keywords_are_whitespace_stripped() {
        let catalog = Catalog::new(vec![entry("tshirt", &["면 티셔츠"], 2700.0)]).unwrap();
        assert_eq!(catalog.scan_order()[0].text, "면티셔츠");
    }

    #[test]
    fn test_entries_in_category() {
        let catalog = Catalog::builtin().unwrap();
        let habits: Vec<_> = catalog.entries_in(Category::Habit).collect();
        assert!(habits.iter().any(|e| e.key == "shower"));
        assert!(habits.iter().all(|e| e.category == Category::Habit));
    }
}
