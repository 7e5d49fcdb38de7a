//! Effort classifier: one scope line in, one effort-unit value out.

use rust_decimal::Decimal;

use crate::config::{ClassifierConfig, RateTable};
use crate::pricing::rules::{Complexity, Field, ItemKind, RuleSet};

/// How an EU value was resolved. Fallback variants carry the reason so
/// callers and tests can tell a confident estimate from a conservative
/// guess without parsing log text.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// Exact (field, item-type, complexity) rate-table hit.
    Exact,
    /// Matched (field, item-type) at standard complexity.
    StandardComplexity,
    /// No item-type match; discounted field average used.
    FieldAverage { reason: String },
    /// Nothing matched; global fallback constant used.
    GlobalFallback { reason: String },
}

impl Resolution {
    /// True for the conservative-guess branches.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::FieldAverage { .. } | Self::GlobalFallback { .. })
    }
}

/// One quantified unit of work. Ephemeral, produced fresh per run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffortUnit {
    pub field: Field,
    pub description: String,
    pub eu: Decimal,
    pub resolution: Resolution,
}

/// Maps free-text scope lines to effort-unit values via the rule tables
/// and the rate table's fallback ladder.
pub struct EffortClassifier {
    rules: RuleSet,
    rates: RateTable,
    config: ClassifierConfig,
}

impl EffortClassifier {
    pub fn new(rules: RuleSet, rates: RateTable, config: ClassifierConfig) -> Self {
        Self {
            rules,
            rates,
            config,
        }
    }

    /// Resolve the canonical field for a free-text field name.
    pub fn canonical_field(&self, field_text: &str) -> Field {
        self.rules.canonical_field(field_text)
    }

    /// Classify one scope line.
    ///
    /// Resolution order, first match wins: exact triple, (field, item-type)
    /// at standard complexity, discounted field average, global fallback.
    /// The resolved value is capped at the per-item ceiling. Never errors;
    /// misses degrade and emit a warning signal.
    pub fn classify(
        &self,
        field_text: &str,
        item_text: &str,
        explicit_complexity: Option<Complexity>,
    ) -> EffortUnit {
        let field = self.rules.canonical_field(field_text);
        let kind = self.rules.item_kind(field, item_text);
        let complexity = explicit_complexity.unwrap_or_else(|| self.rules.complexity(item_text));

        let (eu, resolution) = self.resolve(field, kind, complexity, item_text);
        let eu = eu.min(self.config.per_item_cap_eu);

        EffortUnit {
            field,
            description: item_text.trim().to_string(),
            eu,
            resolution,
        }
    }

    fn resolve(
        &self,
        field: Field,
        kind: ItemKind,
        complexity: Complexity,
        item_text: &str,
    ) -> (Decimal, Resolution) {
        if let Some(eu) = self.rates.eu_for(field, kind, complexity) {
            return (eu, Resolution::Exact);
        }

        if let Some(eu) = self.rates.eu_for(field, kind, Complexity::Standard) {
            return (eu, Resolution::StandardComplexity);
        }

        if let Some(avg) = self.rates.field_average(field) {
            let reason = format!("no rate entry for {field} / {kind:?}");
            tracing::warn!(
                field = %field,
                item = item_text,
                "classification fell back to field average"
            );
            return (avg * self.config.conservatism, Resolution::FieldAverage { reason });
        }

        let reason = format!("no rate entries for field {field}");
        tracing::warn!(
            field = %field,
            item = item_text,
            "classification fell back to global constant"
        );
        (
            self.config.fallback_eu,
            Resolution::GlobalFallback { reason },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn classifier() -> EffortClassifier {
        EffortClassifier::new(
            RuleSet::standard(),
            RateTable::default(),
            ClassifierConfig::default(),
        )
    }

    #[test]
    fn test_exact_match() {
        let unit = classifier().classify(
            "Content Writing & Strategy",
            "Write 2 blog posts (500 words each)",
            None,
        );

        assert_eq!(unit.field, Field::ContentWriting);
        assert_eq!(unit.eu, dec!(1.0));
        assert_eq!(unit.resolution, Resolution::Exact);
    }

    #[test]
    fn test_explicit_complexity_overrides_keywords() {
        let unit = classifier().classify(
            "Content Writing & Strategy",
            "Write a simple blog post",
            Some(Complexity::Complex),
        );

        // Keywords say Basic, the caller said Complex.
        assert_eq!(unit.eu, dec!(2.0));
        assert_eq!(unit.resolution, Resolution::Exact);
    }

    #[test]
    fn test_standard_complexity_fallback() {
        // Form has no Complex entry; "custom" forces Complex, so the ladder
        // drops to the standard-complexity entry.
        let unit = classifier().classify("Web Frontend", "custom contact form", None);

        assert_eq!(unit.eu, dec!(0.75));
        assert_eq!(unit.resolution, Resolution::StandardComplexity);
    }

    #[test]
    fn test_field_average_fallback_is_discounted() {
        // No item rule matches, so the field average applies with the 0.75
        // conservatism factor.
        let unit = classifier().classify("Web Frontend", "mystery work item", None);

        let rates = RateTable::default();
        let expected = rates.field_average(Field::WebFrontend).unwrap() * dec!(0.75);
        assert_eq!(unit.eu, expected);
        assert!(unit.resolution.is_fallback());
        assert!(matches!(unit.resolution, Resolution::FieldAverage { .. }));
    }

    #[test]
    fn test_global_fallback_for_unknown_field() {
        let unit = classifier().classify("Dog walking", "walk the dog twice a day", None);

        assert_eq!(unit.field, Field::General);
        assert_eq!(unit.eu, dec!(1));
        assert!(matches!(unit.resolution, Resolution::GlobalFallback { .. }));
    }

    #[test]
    fn test_per_item_cap() {
        let mut rates = RateTable::default();
        for entry in &mut rates.entries {
            entry.eu = dec!(99);
        }
        let classifier =
            EffortClassifier::new(RuleSet::standard(), rates, ClassifierConfig::default());

        let unit = classifier.classify("Web Frontend", "landing page", None);
        assert_eq!(unit.eu, dec!(10));
    }
}
