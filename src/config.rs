//! Pricing configuration: rate tables, tier ratios, global bounds, and
//! difficulty thresholds.
//!
//! The whole configuration is an immutable value injected into the engine at
//! construction time, so tests can substitute alternate tables without
//! process-wide side effects.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::AuditStoreError;
use crate::pricing::rules::{Complexity, Field, ItemKind};

/// Effort-unit value for one (field, item-type, complexity) combination.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffortRate {
    pub field: Field,
    pub kind: ItemKind,
    pub complexity: Complexity,
    /// Effort units (person-days of mid-level work).
    pub eu: Decimal,
}

/// Monetary rate for one field, in currency units per effort unit.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldRate {
    pub field: Field,
    pub rate: Decimal,
}

/// Effort and monetary rate tables. Pure data.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RateTable {
    pub entries: Vec<EffortRate>,
    pub field_rates: Vec<FieldRate>,
}

impl RateTable {
    /// Exact lookup for a (field, item-type, complexity) triple.
    pub fn eu_for(&self, field: Field, kind: ItemKind, complexity: Complexity) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|e| e.field == field && e.kind == kind && e.complexity == complexity)
            .map(|e| e.eu)
    }

    /// Average EU across every entry for a field, if any exist.
    pub fn field_average(&self, field: Field) -> Option<Decimal> {
        let values: Vec<Decimal> = self
            .entries
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.eu)
            .collect();
        if values.is_empty() {
            return None;
        }
        let sum: Decimal = values.iter().copied().sum();
        Some(sum / Decimal::from(values.len()))
    }

    /// Monetary rate for a field.
    pub fn rate_for(&self, field: Field) -> Option<Decimal> {
        self.field_rates
            .iter()
            .find(|r| r.field == field)
            .map(|r| r.rate)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        use Complexity::*;
        use Field::*;
        use ItemKind::*;

        let e = |field, kind, complexity, eu| EffortRate {
            field,
            kind,
            complexity,
            eu,
        };

        let entries = vec![
            // Web frontend
            e(WebFrontend, Page, Basic, dec!(0.5)),
            e(WebFrontend, Page, Standard, dec!(1.0)),
            e(WebFrontend, Page, Complex, dec!(2.0)),
            e(WebFrontend, Form, Standard, dec!(0.75)),
            e(WebFrontend, Shop, Standard, dec!(4.0)),
            e(WebFrontend, Shop, Complex, dec!(8.0)),
            e(WebFrontend, Embed, Standard, dec!(1.5)),
            // Web backend
            e(WebBackend, Endpoint, Basic, dec!(0.5)),
            e(WebBackend, Endpoint, Standard, dec!(0.75)),
            e(WebBackend, Endpoint, Complex, dec!(1.5)),
            e(WebBackend, DataModel, Standard, dec!(1.0)),
            e(WebBackend, AuthFlow, Standard, dec!(2.0)),
            // Mobile
            e(MobileApp, Screen, Standard, dec!(1.5)),
            e(MobileApp, AppFeature, Standard, dec!(2.0)),
            e(MobileApp, AppFeature, Complex, dec!(4.0)),
            e(MobileApp, Release, Standard, dec!(1.0)),
            // Content
            e(ContentWriting, BlogPost, Basic, dec!(0.5)),
            e(ContentWriting, BlogPost, Standard, dec!(1.0)),
            e(ContentWriting, BlogPost, Complex, dec!(2.0)),
            e(ContentWriting, Article, Standard, dec!(1.5)),
            e(ContentWriting, ProductCopy, Standard, dec!(0.5)),
            e(ContentWriting, ContentPlan, Standard, dec!(2.0)),
            // Design
            e(GraphicDesign, Logo, Standard, dec!(1.5)),
            e(GraphicDesign, Logo, Complex, dec!(3.0)),
            e(GraphicDesign, BrandKit, Standard, dec!(3.0)),
            e(GraphicDesign, Illustration, Standard, dec!(0.75)),
            // Marketing
            e(DigitalMarketing, Campaign, Standard, dec!(2.0)),
            e(DigitalMarketing, SeoAudit, Standard, dec!(1.5)),
            e(DigitalMarketing, SocialPlan, Standard, dec!(1.0)),
            // Data
            e(DataAnalytics, Dashboard, Standard, dec!(2.5)),
            e(DataAnalytics, Report, Standard, dec!(1.5)),
            e(DataAnalytics, Pipeline, Standard, dec!(3.0)),
        ];

        // Currency units per effort unit. General deliberately has no EU
        // entries, so unmatched fields price through the global fallback.
        let field_rates = vec![
            FieldRate { field: WebFrontend, rate: dec!(420) },
            FieldRate { field: WebBackend, rate: dec!(520) },
            FieldRate { field: MobileApp, rate: dec!(560) },
            FieldRate { field: ContentWriting, rate: dec!(480) },
            FieldRate { field: GraphicDesign, rate: dec!(440) },
            FieldRate { field: DigitalMarketing, rate: dec!(460) },
            FieldRate { field: DataAnalytics, rate: dec!(540) },
            FieldRate { field: Field::General, rate: dec!(400) },
        ];

        Self {
            entries,
            field_rates,
        }
    }
}

/// Knobs for the effort classifier's fallback ladder.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassifierConfig {
    /// Ceiling on any single line item's EU, to block single-line
    /// over-estimation.
    pub per_item_cap_eu: Decimal,
    /// EU used when no rate-table level matches.
    pub fallback_eu: Decimal,
    /// Discount applied to field averages when falling back to them.
    pub conservatism: Decimal,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            per_item_cap_eu: dec!(10),
            fallback_eu: dec!(1),
            conservatism: dec!(0.75),
        }
    }
}

/// Thresholds for difficulty inference.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DifficultyConfig {
    /// A deadline closer than this many days counts as urgent.
    pub urgent_horizon_days: i64,
    /// Goal + usage text shorter than this counts as a low-clarity brief.
    pub min_detail_chars: usize,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            urgent_horizon_days: 7,
            min_detail_chars: 40,
        }
    }
}

/// Percentage deltas per difficulty factor and the hard multiplier cap.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MultiplierConfig {
    pub urgent_pct: Decimal,
    pub regulated_pct: Decimal,
    pub integrations_pct: Decimal,
    pub low_clarity_pct: Decimal,
    pub ambiguity_pct: Decimal,
    /// Hard ceiling on the composed multiplier.
    pub cap: Decimal,
}

impl Default for MultiplierConfig {
    fn default() -> Self {
        Self {
            urgent_pct: dec!(10),
            regulated_pct: dec!(8),
            integrations_pct: dec!(5),
            low_clarity_pct: dec!(5),
            ambiguity_pct: dec!(3),
            cap: dec!(1.25),
        }
    }
}

/// Tier ratios and the canonical rounding increment.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TierConfig {
    pub entry_ratio: Decimal,
    pub standard_ratio: Decimal,
    pub premium_ratio: Decimal,
    pub rounding_increment: Decimal,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            entry_ratio: dec!(0.85),
            standard_ratio: dec!(1.00),
            premium_ratio: dec!(1.20),
            rounding_increment: dec!(50),
        }
    }
}

/// Global price floor and ceiling applied to every tier.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlobalBounds {
    pub min: Decimal,
    pub max: Decimal,
}

impl Default for GlobalBounds {
    fn default() -> Self {
        Self {
            min: dec!(150),
            max: dec!(25000),
        }
    }
}

/// Full pricing configuration injected into the engine.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PricingConfig {
    pub rates: RateTable,
    pub classifier: ClassifierConfig,
    pub difficulty: DifficultyConfig,
    pub multiplier: MultiplierConfig,
    pub tiers: TierConfig,
    pub bounds: GlobalBounds,
}

/// Connection settings for the Postgres audit store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    url: String,
    pub pool_size: usize,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>, pool_size: usize) -> Self {
        Self {
            url: url.into(),
            pool_size,
        }
    }

    /// Read `DATABASE_URL` and optional `DATABASE_POOL_SIZE` from the
    /// environment.
    pub fn from_env() -> Result<Self, AuditStoreError> {
        let url = std::env::var("DATABASE_URL").map_err(|_| AuditStoreError::Config {
            reason: "DATABASE_URL is not set".to_string(),
        })?;
        let pool_size = match std::env::var("DATABASE_POOL_SIZE") {
            Ok(raw) => raw.parse().map_err(|_| AuditStoreError::Config {
                reason: format!("DATABASE_POOL_SIZE is not a number: {raw}"),
            })?,
            Err(_) => 8,
        };
        Ok(Self { url, pool_size })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_table_lookups() {
        let rates = RateTable::default();

        assert_eq!(
            rates.eu_for(Field::ContentWriting, ItemKind::BlogPost, Complexity::Standard),
            Some(dec!(1.0))
        );
        assert_eq!(
            rates.eu_for(Field::ContentWriting, ItemKind::BlogPost, Complexity::Complex),
            Some(dec!(2.0))
        );
        // Form has no Complex entry.
        assert_eq!(
            rates.eu_for(Field::WebFrontend, ItemKind::Form, Complexity::Complex),
            None
        );
    }

    #[test]
    fn test_field_average_skips_empty_fields() {
        let rates = RateTable::default();

        assert!(rates.field_average(Field::WebFrontend).is_some());
        // General carries no EU entries on purpose.
        assert_eq!(rates.field_average(Field::General), None);
    }

    #[test]
    fn test_every_field_has_a_monetary_rate() {
        let rates = RateTable::default();
        for field in [
            Field::WebFrontend,
            Field::WebBackend,
            Field::MobileApp,
            Field::ContentWriting,
            Field::GraphicDesign,
            Field::DigitalMarketing,
            Field::DataAnalytics,
            Field::General,
        ] {
            assert!(rates.rate_for(field).is_some(), "missing rate for {field}");
        }
    }

    #[test]
    fn test_default_multiplier_deltas_exceed_cap_when_summed() {
        // All five factors together add 31%, which is above the cap; the
        // composer is responsible for clamping.
        let cfg = MultiplierConfig::default();
        let sum = cfg.urgent_pct
            + cfg.regulated_pct
            + cfg.integrations_pct
            + cfg.low_clarity_pct
            + cfg.ambiguity_pct;
        assert!(Decimal::ONE + sum / dec!(100) > cfg.cap);
    }
}
