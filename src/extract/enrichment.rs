//! Pre-extraction text enrichment
//!
//! Declarative rewrite rules applied to raw input before extraction. A rule
//! fires when its qualifier and any one of its triggers appear in the text,
//! appending implied keywords (the "set menu" rule implies fries and a
//! cola). New rules are table entries, not new branching logic.

use serde::{Deserialize, Serialize};

/// One trigger -> appended-text rewrite rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentRule {
    /// Qualifier substring that must be present (e.g. "세트")
    pub qualifier: String,
    /// At least one of these substrings must also be present
    pub triggers: Vec<String>,
    /// Text appended to the input when the rule fires
    pub appended: String,
}

impl EnrichmentRule {
    fn applies(&self, text: &str) -> bool {
        text.contains(self.qualifier.as_str())
            && self.triggers.iter().any(|t| text.contains(t.as_str()))
    }
}

/// The built-in rule table
pub fn default_rules() -> Vec<EnrichmentRule> {
    vec![
        // A burger "set" implies a side of chips and a cola.
        EnrichmentRule {
            qualifier: "세트".to_string(),
            triggers: vec!["햄버거".to_string(), "버거".to_string()],
            appended: "감자칩 콜라".to_string(),
        },
    ]
}

/// Apply every applicable rule to the raw input.
///
/// Rules are evaluated against the original text only, so one rule's
/// appended keywords cannot trigger another rule.
pub fn apply_rules(text: &str, rules: &[EnrichmentRule]) -> String {
    let mut enriched = text.to_string();
    for rule in rules {
        if rule.applies(text) {
            enriched.push(' ');
            enriched.push_str(&rule.appended);
        }
    }
    enriched
}
