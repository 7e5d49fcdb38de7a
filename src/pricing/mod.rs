//! The deterministic estimation pipeline.
//!
//! One scope in, one price estimate out. Stages run strictly forward:
//! validate, decompose, infer difficulty, compose the multiplier, aggregate
//! per field, tier and cap, summarize, record the audit entry. Any stage
//! failure aborts the whole call; no partial estimate is ever returned.

pub mod aggregator;
pub mod breakdown;
pub mod classifier;
pub mod decomposer;
pub mod difficulty;
pub mod multiplier;
pub mod rules;
pub mod tiers;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::audit::{AuditEntry, AuditStore};
use crate::config::PricingConfig;
use crate::error::EstimateError;
use crate::scope::{BadgeLevel, ScopeRecord};

use self::breakdown::Breakdown;
use self::classifier::EffortClassifier;
use self::difficulty::DifficultyInferencer;
use self::rules::RuleSet;
use self::tiers::{CappingFlags, Tier, TierSet};

/// The pipeline's output: three price points plus everything needed to
/// explain them.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PriceEstimate {
    pub scope_id: Uuid,
    /// Tier values before the global clamp.
    pub raw_tiers: TierSet,
    /// Tier values after the global clamp; always ordered and in bounds.
    pub final_tiers: TierSet,
    pub capping: CappingFlags,
    /// Base project value before tiering.
    pub bpv: Decimal,
    /// Total work units across all fields.
    pub twu: Decimal,
    /// The composed difficulty multiplier.
    pub mp: Decimal,
    pub breakdown: Breakdown,
    /// The audit entry recording this run.
    pub audit_entry_id: Uuid,
}

impl PriceEstimate {
    /// The price shown to a freelancer of the given badge level.
    pub fn price_for_badge(&self, badge: BadgeLevel) -> Decimal {
        self.final_tiers.get(Tier::for_badge(badge))
    }
}

/// Orchestrates the estimation stages over an injected, immutable
/// configuration and an audit store.
pub struct PricingEngine {
    config: PricingConfig,
    classifier: EffortClassifier,
    inferencer: DifficultyInferencer,
    audit: Arc<dyn AuditStore>,
}

impl PricingEngine {
    pub fn new(config: PricingConfig, audit: Arc<dyn AuditStore>) -> Self {
        let classifier = EffortClassifier::new(
            RuleSet::standard(),
            config.rates.clone(),
            config.classifier.clone(),
        );
        let inferencer = DifficultyInferencer::new(config.difficulty.clone());
        Self {
            config,
            classifier,
            inferencer,
            audit,
        }
    }

    /// Estimate a price for the scope, using the current wall clock as the
    /// urgency reference time.
    pub async fn estimate(
        &self,
        scope: &ScopeRecord,
        actor: &str,
    ) -> Result<PriceEstimate, EstimateError> {
        self.estimate_at(scope, actor, Utc::now()).await
    }

    /// Estimate with a pinned reference time.
    ///
    /// Two calls with identical scope content and the same reference time
    /// produce identical results, which is what makes historical runs
    /// replayable from their audit entries.
    pub async fn estimate_at(
        &self,
        scope: &ScopeRecord,
        actor: &str,
        reference_time: DateTime<Utc>,
    ) -> Result<PriceEstimate, EstimateError> {
        scope.validate()?;

        let units = decomposer::decompose(scope, &self.classifier);
        tracing::debug!(scope_id = %scope.id, units = units.len(), "scope decomposed");

        let factors = self.inferencer.infer(scope, reference_time);
        let mp = multiplier::compose(&factors, &self.config.multiplier);
        if mp < Decimal::ONE || mp > self.config.multiplier.cap {
            return Err(EstimateError::InvariantViolation {
                reason: format!("multiplier {mp} outside [1, {}]", self.config.multiplier.cap),
            });
        }

        let (aggregations, bpv) = aggregator::aggregate(&units, mp, &self.config.rates)?;
        let twu: Decimal = aggregations.iter().map(|a| a.twu).sum();
        tracing::debug!(scope_id = %scope.id, %twu, %mp, %bpv, "scope aggregated");

        let outcome = tiers::tier_and_cap(bpv, &self.config.tiers, &self.config.bounds)?;
        let breakdown =
            breakdown::summarize(twu, aggregations.len(), multiplier::drivers(&factors));

        let entry = AuditEntry {
            id: Uuid::new_v4(),
            actor: actor.to_string(),
            scope_id: scope.id,
            recorded_at: Utc::now(),
            reference_time,
            effort_units: units,
            difficulty: factors,
            mp,
            aggregations,
            twu,
            bpv,
            raw_tiers: outcome.raw,
            final_tiers: outcome.finals,
            capping: outcome.capping,
            breakdown: breakdown.clone(),
        };
        let audit_entry_id = self.audit.append(&entry).await?;
        tracing::debug!(scope_id = %scope.id, %audit_entry_id, "estimate audited");

        Ok(PriceEstimate {
            scope_id: scope.id,
            raw_tiers: outcome.raw,
            final_tiers: outcome.finals,
            capping: outcome.capping,
            bpv,
            twu,
            mp,
            breakdown,
            audit_entry_id,
        })
    }

    /// The configuration this engine was constructed with.
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::MemoryAuditStore;
    use crate::pricing::difficulty::{Compliance, Urgency};
    use crate::scope::Priority;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn engine() -> (PricingEngine, Arc<MemoryAuditStore>) {
        let store = Arc::new(MemoryAuditStore::new());
        let engine = PricingEngine::new(PricingConfig::default(), store.clone());
        (engine, store)
    }

    fn content_scope(deadline_days: i64, priority: Priority, now: DateTime<Utc>) -> ScopeRecord {
        ScopeRecord {
            id: Uuid::new_v4(),
            field: "Content Writing & Strategy".to_string(),
            in_scope: vec!["Write 2 blog posts (500 words each)".to_string()],
            deliverables: vec![],
            goal: "Grow organic traffic for the product launch this quarter".to_string(),
            usage_context: "Company blog read by prospective customers".to_string(),
            priority: Some(priority),
            deadline: Some(now + Duration::days(deadline_days)),
        }
    }

    #[tokio::test]
    async fn test_relaxed_content_scope() {
        let (engine, store) = engine();
        let now = Utc::now();
        let scope = content_scope(30, Priority::Quality, now);

        let estimate = engine.estimate_at(&scope, "tester", now).await.unwrap();

        assert!(estimate.twu < dec!(2));
        assert_eq!(estimate.mp, Decimal::ONE);
        assert!(estimate.breakdown.complexity_drivers.is_empty());
        let bounds = &engine.config().bounds;
        for tier in [
            estimate.final_tiers.entry,
            estimate.final_tiers.standard,
            estimate.final_tiers.premium,
        ] {
            assert!(tier >= bounds.min && tier <= bounds.max);
        }
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_rushed_scope_prices_higher_on_every_tier() {
        let (engine, _) = engine();
        let now = Utc::now();

        let relaxed = engine
            .estimate_at(&content_scope(30, Priority::Quality, now), "tester", now)
            .await
            .unwrap();
        let rushed = engine
            .estimate_at(&content_scope(5, Priority::Speed, now), "tester", now)
            .await
            .unwrap();

        assert!(rushed.mp > Decimal::ONE && rushed.mp <= dec!(1.25));
        assert!(rushed.final_tiers.entry > relaxed.final_tiers.entry);
        assert!(rushed.final_tiers.standard > relaxed.final_tiers.standard);
        assert!(rushed.final_tiers.premium > relaxed.final_tiers.premium);
    }

    #[tokio::test]
    async fn test_regulated_usage_raises_multiplier() {
        let (engine, store) = engine();
        let now = Utc::now();
        let mut scope = content_scope(30, Priority::Quality, now);
        scope.usage_context =
            "Articles about handling patient records under HIPAA rules".to_string();

        let estimate = engine.estimate_at(&scope, "tester", now).await.unwrap();

        assert!(estimate.mp > Decimal::ONE);
        let entry = store.get(estimate.audit_entry_id).await.unwrap().unwrap();
        assert_eq!(entry.difficulty.compliance, Compliance::Regulated);
        assert_eq!(entry.difficulty.urgency, Urgency::Normal);
    }

    #[tokio::test]
    async fn test_empty_scope_still_prices() {
        let (engine, _) = engine();
        let now = Utc::now();
        let scope = ScopeRecord {
            id: Uuid::new_v4(),
            field: "Web Frontend".to_string(),
            in_scope: vec![],
            deliverables: vec![],
            goal: String::new(),
            usage_context: String::new(),
            priority: None,
            deadline: None,
        };

        let estimate = engine.estimate_at(&scope, "tester", now).await.unwrap();

        assert_eq!(estimate.twu, dec!(1));
        assert!(estimate.final_tiers.entry > Decimal::ZERO);
        assert!(estimate.final_tiers.entry <= estimate.final_tiers.standard);
        assert!(estimate.final_tiers.standard <= estimate.final_tiers.premium);
    }

    #[tokio::test]
    async fn test_empty_field_name_fails_before_any_stage() {
        let (engine, store) = engine();
        let mut scope = content_scope(30, Priority::Quality, Utc::now());
        scope.field = "  ".to_string();

        let err = engine.estimate(&scope, "tester").await.unwrap_err();

        assert!(matches!(err, EstimateError::InvalidInput { .. }));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_badge_selects_tier() {
        let (engine, _) = engine();
        let now = Utc::now();
        let estimate = engine
            .estimate_at(&content_scope(30, Priority::Quality, now), "tester", now)
            .await
            .unwrap();

        assert_eq!(
            estimate.price_for_badge(BadgeLevel::Low),
            estimate.final_tiers.entry
        );
        assert_eq!(
            estimate.price_for_badge(BadgeLevel::Medium),
            estimate.final_tiers.standard
        );
        assert_eq!(
            estimate.price_for_badge(BadgeLevel::High),
            estimate.final_tiers.premium
        );
    }
}
