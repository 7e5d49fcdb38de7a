//! Tier derivation, canonical rounding, and global clamping.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{GlobalBounds, TierConfig};
use crate::error::EstimateError;
use crate::scope::BadgeLevel;

/// The three price points offered for one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Entry,
    Standard,
    Premium,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }

    /// The tier a freelancer of the given badge level is shown.
    pub fn for_badge(badge: BadgeLevel) -> Self {
        match badge {
            BadgeLevel::Low => Self::Entry,
            BadgeLevel::Medium => Self::Standard,
            BadgeLevel::High => Self::Premium,
        }
    }
}

/// Entry/standard/premium price values.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TierSet {
    pub entry: Decimal,
    pub standard: Decimal,
    pub premium: Decimal,
}

impl TierSet {
    pub fn get(&self, tier: Tier) -> Decimal {
        match tier {
            Tier::Entry => self.entry,
            Tier::Standard => self.standard,
            Tier::Premium => self.premium,
        }
    }
}

/// Per-tier record of whether the global clamp changed the value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CappingFlags {
    pub entry_capped: bool,
    pub standard_capped: bool,
    pub premium_capped: bool,
}

/// Raw and clamped tiers plus the capping decisions, for audit.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TierOutcome {
    pub raw: TierSet,
    pub finals: TierSet,
    pub capping: CappingFlags,
}

/// Derive the three tiers from the base project value.
///
/// Each tier is rounded to the canonical increment, then independently
/// clamped into the global band. Tier ordering must hold by construction
/// given the fixed ratios; a violation is a configuration bug and is
/// reported, never silently reordered.
pub fn tier_and_cap(
    bpv: Decimal,
    config: &TierConfig,
    bounds: &GlobalBounds,
) -> Result<TierOutcome, EstimateError> {
    let raw = TierSet {
        entry: round_to_increment(bpv * config.entry_ratio, config.rounding_increment),
        standard: round_to_increment(bpv * config.standard_ratio, config.rounding_increment),
        premium: round_to_increment(bpv * config.premium_ratio, config.rounding_increment),
    };

    let (entry, entry_capped) = clamp(raw.entry, bounds);
    let (standard, standard_capped) = clamp(raw.standard, bounds);
    let (premium, premium_capped) = clamp(raw.premium, bounds);

    let finals = TierSet {
        entry,
        standard,
        premium,
    };

    if !(finals.entry <= finals.standard && finals.standard <= finals.premium) {
        return Err(EstimateError::InvariantViolation {
            reason: format!(
                "tier ordering broken: {} / {} / {}",
                finals.entry, finals.standard, finals.premium
            ),
        });
    }
    for value in [finals.entry, finals.standard, finals.premium] {
        if value < bounds.min || value > bounds.max {
            return Err(EstimateError::InvariantViolation {
                reason: format!(
                    "tier {value} outside global bounds [{}, {}] after clamping",
                    bounds.min, bounds.max
                ),
            });
        }
    }

    Ok(TierOutcome {
        raw,
        finals,
        capping: CappingFlags {
            entry_capped,
            standard_capped,
            premium_capped,
        },
    })
}

/// Round to the nearest multiple of `increment`, midpoint away from zero.
fn round_to_increment(value: Decimal, increment: Decimal) -> Decimal {
    (value / increment).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        * increment
}

fn clamp(value: Decimal, bounds: &GlobalBounds) -> (Decimal, bool) {
    if value < bounds.min {
        (bounds.min, true)
    } else if value > bounds.max {
        (bounds.max, true)
    } else {
        (value, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rounding_to_increment() {
        assert_eq!(round_to_increment(dec!(136), dec!(50)), dec!(150));
        assert_eq!(round_to_increment(dec!(160), dec!(50)), dec!(150));
        assert_eq!(round_to_increment(dec!(175), dec!(50)), dec!(200));
        assert_eq!(round_to_increment(dec!(408), dec!(50)), dec!(400));
    }

    #[test]
    fn test_tiers_from_bpv() {
        let outcome =
            tier_and_cap(dec!(480), &TierConfig::default(), &GlobalBounds::default()).unwrap();

        assert_eq!(outcome.raw.entry, dec!(400));
        assert_eq!(outcome.raw.standard, dec!(500));
        assert_eq!(outcome.raw.premium, dec!(600));
        assert_eq!(outcome.finals, outcome.raw);
        assert_eq!(outcome.capping, CappingFlags::default());
    }

    #[test]
    fn test_floor_capping_sets_flags() {
        // BPV small enough that every tier rounds below the floor.
        let bounds = GlobalBounds::default();
        let outcome = tier_and_cap(dec!(60), &TierConfig::default(), &bounds).unwrap();

        assert!(outcome.capping.entry_capped);
        assert!(outcome.capping.standard_capped);
        assert!(outcome.capping.premium_capped);
        assert_eq!(outcome.finals.entry, bounds.min);
        assert_eq!(outcome.finals.standard, bounds.min);
        assert_eq!(outcome.finals.premium, bounds.min);
    }

    #[test]
    fn test_ceiling_capping_is_per_tier() {
        let bounds = GlobalBounds::default();
        // Premium crosses the ceiling, standard and entry do not.
        let outcome = tier_and_cap(dec!(22000), &TierConfig::default(), &bounds).unwrap();

        assert!(!outcome.capping.entry_capped);
        assert!(!outcome.capping.standard_capped);
        assert!(outcome.capping.premium_capped);
        assert_eq!(outcome.finals.premium, bounds.max);
        assert!(outcome.finals.entry <= outcome.finals.standard);
        assert!(outcome.finals.standard <= outcome.finals.premium);
    }

    #[test]
    fn test_ordering_holds_across_bpv_range() {
        let config = TierConfig::default();
        let bounds = GlobalBounds::default();
        let mut bpv = dec!(0);
        while bpv < dec!(40000) {
            let outcome = tier_and_cap(bpv, &config, &bounds).unwrap();
            assert!(outcome.finals.entry <= outcome.finals.standard);
            assert!(outcome.finals.standard <= outcome.finals.premium);
            assert!(outcome.finals.entry >= bounds.min);
            assert!(outcome.finals.premium <= bounds.max);
            bpv += dec!(137);
        }
    }

    #[test]
    fn test_broken_ratio_config_is_reported() {
        // Entry ratio above premium ratio breaks ordering by construction.
        let config = TierConfig {
            entry_ratio: dec!(1.5),
            standard_ratio: dec!(1.0),
            premium_ratio: dec!(0.5),
            rounding_increment: dec!(50),
        };
        let err = tier_and_cap(dec!(5000), &config, &GlobalBounds::default()).unwrap_err();
        assert!(matches!(err, EstimateError::InvariantViolation { .. }));
    }

    #[test]
    fn test_badge_to_tier_mapping() {
        assert_eq!(Tier::for_badge(BadgeLevel::Low), Tier::Entry);
        assert_eq!(Tier::for_badge(BadgeLevel::Medium), Tier::Standard);
        assert_eq!(Tier::for_badge(BadgeLevel::High), Tier::Premium);
    }
}
