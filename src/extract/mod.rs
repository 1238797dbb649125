//! Free-text footprint extraction
//!
//! Scans user text for catalog keywords, longest keyword first, consuming
//! each matched span so one physical mention is never counted twice under
//! two aliases. Quantities are read from a small window around the keyword
//! in the original text; a number mentioned far from its keyword is never
//! attributed to it.

pub mod enrichment;

use serde::Serialize;

use crate::catalog::{strip_whitespace, Catalog, Category};

/// Generic quantity unit words accepted after a digit run
const GENERIC_UNITS: [&str; 6] = ["개", "회", "분", "L", "ml", "g"];

/// How many characters around a keyword occurrence to inspect for a quantity
const QUANTITY_WINDOW: usize = 5;

/// One recognized catalog item in the input text
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    pub key: String,
    pub label: String,
    pub category: Category,
    pub quantity: f64,
    pub unit: String,
    /// `liters_per_unit * quantity`
    pub liters: f64,
}

/// Extract every recognized item from free text.
///
/// Pure and infallible: absence of matches is a normal outcome. Results are
/// ordered by keyword scan order (longest keyword first), not by position
/// in the text.
pub fn extract(text: &str, catalog: &Catalog) -> Vec<Match> {
    // Normalized once; every keyword removal operates on this same string
    // so stripped whitespace cannot produce garbled partial matches.
    let mut remaining = strip_whitespace(text);
    if remaining.is_empty() {
        return Vec::new();
    }

    let original: Vec<char> = text.chars().collect();
    let mut matches = Vec::new();

    for scan in catalog.scan_order() {
        if let Some(pos) = remaining.find(scan.text.as_str()) {
            let entry = catalog.entry(scan.entry_idx);
            let quantity = quantity_near(&original, &scan.text, &entry.unit);

            matches.push(Match {
                key: entry.key.clone(),
                label: entry.label.clone(),
                category: entry.category,
                quantity,
                unit: entry.unit.clone(),
                liters: entry.liters_per_unit * quantity,
            });

            // Consume the first occurrence only. A literal second mention
            // stays in the text but this keyword is not scanned again.
            remaining.replace_range(pos..pos + scan.text.len(), "");
        }
    }

    matches
}

/// Sum of match totals
pub fn total_liters(matches: &[Match]) -> f64 {
    matches.iter().map(|m| m.liters).sum()
}

/// Find an explicit quantity near the keyword's first occurrence in the
/// original (non-stripped) text. Returns 1.0 when the keyword is not
/// literally present (spaced compound form) or no usable digit run exists.
fn quantity_near(original: &[char], keyword: &str, declared_unit: &str) -> f64 {
    let needle: Vec<char> = keyword.chars().collect();
    let Some(start) = find_chars(original, &needle) else {
        return 1.0;
    };

    let window_start = start.saturating_sub(QUANTITY_WINDOW);
    let window_end = (start + needle.len() + QUANTITY_WINDOW).min(original.len());
    let window = &original[window_start..window_end];

    let runs = digit_runs(window);
    if runs.is_empty() {
        return 1.0;
    }

    // Prefer a run followed by the declared unit or a generic unit word
    // ("샤워 10분" picks 10 over an unrelated leading number); otherwise
    // fall back to the first run in the window.
    let chosen = runs
        .iter()
        .find(|(end, _)| has_unit_suffix(&window[*end..], declared_unit))
        .or_else(|| runs.first());

    match chosen {
        Some((_, digits)) => match digits.parse::<u64>() {
            Ok(n) if n > 0 => n as f64,
            _ => 1.0,
        },
        None => 1.0,
    }
}

/// First occurrence of `needle` within `haystack`, by char offset
fn find_chars(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Maximal ASCII digit runs in the window, as (end offset, digits)
fn digit_runs(window: &[char]) -> Vec<(usize, String)> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i < window.len() {
        if window[i].is_ascii_digit() {
            let run_start = i;
            while i < window.len() && window[i].is_ascii_digit() {
                i += 1;
            }
            runs.push((i, window[run_start..i].iter().collect()));
        } else {
            i += 1;
        }
    }
    runs
}

/// Whether `rest` begins with the declared unit or a generic unit word
fn has_unit_suffix(rest: &[char], declared_unit: &str) -> bool {
    let starts_with = |unit: &str| {
        let unit_chars: Vec<char> = unit.chars().collect();
        !unit_chars.is_empty()
            && rest.len() >= unit_chars.len()
            && rest[..unit_chars.len()] == unit_chars[..]
    };

    starts_with(declared_unit) || GENERIC_UNITS.iter().any(|u| starts_with(u))
}
