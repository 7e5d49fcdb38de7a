//! Multiplier composition: difficulty factors into one bounded multiplier.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::MultiplierConfig;
use crate::pricing::difficulty::{
    Ambiguity, Clarity, Compliance, DifficultyFactors, Integrations, Urgency,
};

/// Compose the difficulty factors into a single multiplier product.
///
/// Deltas are additive on the percentage scale, then converted:
/// `MP = 1 + Σdeltas/100`, clamped to the configured cap. The cap is a hard
/// invariant regardless of how many factors are simultaneously adverse.
pub fn compose(factors: &DifficultyFactors, config: &MultiplierConfig) -> Decimal {
    let mut pct = Decimal::ZERO;

    if factors.urgency == Urgency::Urgent {
        pct += config.urgent_pct;
    }
    if factors.compliance == Compliance::Regulated {
        pct += config.regulated_pct;
    }
    if factors.integrations == Integrations::Multiple {
        pct += config.integrations_pct;
    }
    if factors.clarity == Clarity::Low {
        pct += config.low_clarity_pct;
    }
    if factors.ambiguity == Ambiguity::Some {
        pct += config.ambiguity_pct;
    }

    (Decimal::ONE + pct / dec!(100)).min(config.cap)
}

/// Human-readable phrases for the factors that actually fired, in fixed
/// factor order. Feeds the breakdown summary.
pub fn drivers(factors: &DifficultyFactors) -> Vec<String> {
    let mut phrases = Vec::new();

    if factors.urgency == Urgency::Urgent {
        phrases.push("urgent deadline".to_string());
    }
    if factors.compliance == Compliance::Regulated {
        phrases.push("regulated industry".to_string());
    }
    if factors.integrations == Integrations::Multiple {
        phrases.push("multiple integrations".to_string());
    }
    if factors.clarity == Clarity::Low {
        phrases.push("limited brief detail".to_string());
    }
    if factors.ambiguity == Ambiguity::Some {
        phrases.push("pending client assets".to_string());
    }

    phrases
}
