//! Human-readable breakdown of an estimate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::pricing::tiers::Tier;

/// TWU thresholds for the scope-size label.
const SMALL_BELOW: Decimal = dec!(3);
const MEDIUM_BELOW: Decimal = dec!(8);
const LARGE_BELOW: Decimal = dec!(15);

/// Summary shown to both the paying and the earning party.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Breakdown {
    /// e.g. "medium" or "large (across 2 fields)".
    pub scope_size: String,
    /// Phrases for the difficulty factors that actually fired, in factor
    /// order. Empty when the multiplier is 1.0.
    pub complexity_drivers: Vec<String>,
    /// Policy default recommendation.
    pub recommended_tier: Tier,
}

impl Breakdown {
    /// Render as display text.
    pub fn render(&self) -> String {
        let drivers = if self.complexity_drivers.is_empty() {
            "none".to_string()
        } else {
            self.complexity_drivers.join(", ")
        };
        format!(
            "Scope size: {}\nComplexity drivers: {}\nRecommended tier: {}",
            self.scope_size,
            drivers,
            self.recommended_tier.label()
        )
    }
}

/// Build the breakdown from the aggregate quantities.
pub fn summarize(twu: Decimal, field_count: usize, complexity_drivers: Vec<String>) -> Breakdown {
    let size = if twu < SMALL_BELOW {
        "small"
    } else if twu < MEDIUM_BELOW {
        "medium"
    } else if twu < LARGE_BELOW {
        "large"
    } else {
        "very large"
    };

    let scope_size = if field_count > 1 {
        format!("{size} (across {field_count} fields)")
    } else {
        size.to_string()
    };

    Breakdown {
        scope_size,
        complexity_drivers,
        recommended_tier: Tier::Standard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_labels() {
        assert_eq!(summarize(dec!(1), 1, vec![]).scope_size, "small");
        assert_eq!(summarize(dec!(3), 1, vec![]).scope_size, "medium");
        assert_eq!(summarize(dec!(8), 1, vec![]).scope_size, "large");
        assert_eq!(summarize(dec!(20), 1, vec![]).scope_size, "very large");
    }

    #[test]
    fn test_multi_field_suffix() {
        assert_eq!(
            summarize(dec!(5), 3, vec![]).scope_size,
            "medium (across 3 fields)"
        );
    }

    #[test]
    fn test_recommended_tier_defaults_to_standard() {
        assert_eq!(summarize(dec!(1), 1, vec![]).recommended_tier, Tier::Standard);
    }

    #[test]
    fn test_render() {
        let breakdown = summarize(dec!(4), 1, vec!["urgent deadline".to_string()]);
        let text = breakdown.render();
        assert!(text.contains("Scope size: medium"));
        assert!(text.contains("urgent deadline"));
        assert!(text.contains("Recommended tier: standard"));
    }
}
