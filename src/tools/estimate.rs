//! Estimation and catalog MCP tools
//!
//! Free-text estimation, direct item lookup, and catalog listing.

use serde::Serialize;

use crate::catalog::{Catalog, Category};
use crate::extract::enrichment::{apply_rules, EnrichmentRule};
use crate::extract::{extract, total_liters, Match};

/// How many example keywords to offer when nothing matched
const KEYWORD_SAMPLE_SIZE: usize = 12;

/// Response for estimate_from_text
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub matches: Vec<Match>,
    pub total_liters: f64,
    pub matched: bool,
    /// Example keywords to prompt the user with when nothing matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_keywords: Option<Vec<String>>,
}

/// Response for lookup_item
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub item: String,
    pub label: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    pub liters: f64,
}

/// One catalog item in a listing
#[derive(Debug, Serialize)]
pub struct CatalogItem {
    pub item: String,
    pub label: String,
    pub keywords: Vec<String>,
    pub liters_per_unit: f64,
    pub unit: String,
}

/// Catalog entries for one category
#[derive(Debug, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub items: Vec<CatalogItem>,
}

/// Response for list_catalog
#[derive(Debug, Serialize)]
pub struct ListCatalogResponse {
    pub categories: Vec<CategoryGroup>,
    pub total_items: usize,
}

/// Estimate the water footprint of free-form text.
///
/// Never fails; an empty result carries example keywords so the caller can
/// prompt the user instead of treating it as an error.
pub fn estimate_from_text(
    catalog: &Catalog,
    rules: &[EnrichmentRule],
    text: &str,
) -> EstimateResponse {
    let enriched = apply_rules(text, rules);
    let matches = extract(&enriched, catalog);
    let total = total_liters(&matches);
    let matched = !matches.is_empty();

    let available_keywords = if matched {
        None
    } else {
        let mut sample: Vec<String> = catalog
            .entries()
            .iter()
            .map(|e| e.label.clone())
            .take(KEYWORD_SAMPLE_SIZE)
            .collect();
        sample.sort();
        Some(sample)
    };

    EstimateResponse {
        matches,
        total_liters: total,
        matched,
        available_keywords,
    }
}

/// Look up a catalog item by key and scale by a quantity
pub fn lookup_item(catalog: &Catalog, key: &str, quantity: f64) -> Result<LookupResponse, String> {
    if quantity <= 0.0 {
        return Err("Quantity must be greater than 0".to_string());
    }

    let entry = catalog
        .lookup(key)
        .map_err(|e| e.to_string())?;

    Ok(LookupResponse {
        item: entry.key.clone(),
        label: entry.label.clone(),
        category: entry.category.as_str().to_string(),
        quantity,
        unit: entry.unit.clone(),
        liters: entry.liters_per_unit * quantity,
    })
}

/// List catalog entries, optionally restricted to one category
pub fn list_catalog(catalog: &Catalog, category: Option<&str>) -> Result<ListCatalogResponse, String> {
    let categories: Vec<Category> = match category {
        Some(s) => {
            let cat = Category::from_str(s)
                .ok_or_else(|| format!("Unknown category: {}", s))?;
            vec![cat]
        }
        None => Category::all().to_vec(),
    };

    let mut groups = Vec::new();
    let mut total_items = 0;

    for cat in categories {
        let items: Vec<CatalogItem> = catalog
            .entries_in(cat)
            .map(|e| CatalogItem {
                item: e.key.clone(),
                label: e.label.clone(),
                keywords: e.keywords.clone(),
                liters_per_unit: e.liters_per_unit,
                unit: e.unit.clone(),
            })
            .collect();

        if items.is_empty() {
            continue;
        }

        total_items += items.len();
        groups.push(CategoryGroup {
            category: cat.as_str().to_string(),
            items,
        });
    }

    Ok(ListCatalogResponse {
        categories: groups,
        total_items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::enrichment::default_rules;

    fn catalog() -> Catalog {
        Catalog::builtin().expect("builtin catalog")
    }

    #[test]
    fn test_estimate_simple_sentence() {
        let c = catalog();
        let resp = estimate_from_text(&c, &default_rules(), "초콜릿 먹고 청바지 입기");
        assert!(resp.matched);
        assert_eq!(resp.matches.len(), 2);
        assert_eq!(resp.total_liters, 1700.0 + 10000.0);
        assert!(resp.available_keywords.is_none());
    }

    #[test]
    fn test_estimate_burger_set_implies_sides() {
        let c = catalog();
        let resp = estimate_from_text(&c, &default_rules(), "오늘 점심은 햄버거 세트");
        let keys: Vec<&str> = resp.matches.iter().map(|m| m.key.as_str()).collect();
        assert!(keys.contains(&"hamburger"));
        assert!(keys.contains(&"potato-chips"));
        assert!(keys.contains(&"cola"));
        assert_eq!(resp.total_liters, 2500.0 + 185.0 + 75.0);
    }

    #[test]
    fn test_estimate_no_match_offers_keywords() {
        let c = catalog();
        let resp = estimate_from_text(&c, &default_rules(), "아무것도 안 함");
        assert!(!resp.matched);
        assert_eq!(resp.total_liters, 0.0);
        let keywords = resp.available_keywords.expect("keyword sample");
        assert!(!keywords.is_empty());
    }

    #[test]
    fn test_lookup_item_scales() {
        let c = catalog();
        let resp = lookup_item(&c, "apple", 3.0).unwrap();
        assert_eq!(resp.liters, 375.0);
        assert_eq!(resp.label, "사과");
    }

    #[test]
    fn test_lookup_item_unknown_key() {
        let c = catalog();
        let err = lookup_item(&c, "dragonfruit", 1.0).unwrap_err();
        assert!(err.contains("dragonfruit"));
    }

    #[test]
    fn test_lookup_item_rejects_non_positive_quantity() {
        let c = catalog();
        assert!(lookup_item(&c, "apple", 0.0).is_err());
        assert!(lookup_item(&c, "apple", -1.0).is_err());
    }

    #[test]
    fn test_list_catalog_grouped() {
        let c = catalog();
        let resp = list_catalog(&c, None).unwrap();
        assert_eq!(resp.total_items, c.len());
        assert!(resp.categories.len() > 1);
    }

    #[test]
    fn test_list_catalog_single_category() {
        let c = catalog();
        let resp = list_catalog(&c, Some("habit")).unwrap();
        assert_eq!(resp.categories.len(), 1);
        assert!(resp.categories[0].items.iter().any(|i| i.item == "shower"));
    }

    #[test]
    fn test_list_catalog_unknown_category() {
        let c = catalog();
        assert!(list_catalog(&c, Some("minerals")).is_err());
    }
}
