//! Audit trail for estimation runs.
//!
//! One entry per `estimate` call; the entry is the single source of truth
//! for "why was this price X" queries raised later by support staff.

mod memory;
mod store;

pub use memory::MemoryAuditStore;
pub use store::PgAuditStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::AuditStoreError;
use crate::pricing::aggregator::FieldAggregation;
use crate::pricing::breakdown::Breakdown;
use crate::pricing::classifier::EffortUnit;
use crate::pricing::difficulty::DifficultyFactors;
use crate::pricing::tiers::{CappingFlags, TierSet};

/// Immutable snapshot of one estimation run, with every intermediate
/// quantity needed to reconstruct the final price.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    /// Identity of whoever triggered the run.
    pub actor: String,
    pub scope_id: Uuid,
    pub recorded_at: DateTime<Utc>,
    /// The pinned "now" used for urgency inference. Required to replay the
    /// run exactly, since urgency depends on wall-clock time.
    pub reference_time: DateTime<Utc>,
    pub effort_units: Vec<EffortUnit>,
    pub difficulty: DifficultyFactors,
    pub mp: Decimal,
    pub aggregations: Vec<FieldAggregation>,
    pub twu: Decimal,
    pub bpv: Decimal,
    pub raw_tiers: TierSet,
    pub final_tiers: TierSet,
    pub capping: CappingFlags,
    pub breakdown: Breakdown,
}

/// Append-only audit persistence.
///
/// The pipeline issues exactly one append per call and never retries; a
/// failed append fails the whole call.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Persist an entry. Returns its id on success.
    async fn append(&self, entry: &AuditEntry) -> Result<Uuid, AuditStoreError>;

    /// Fetch one entry by id.
    async fn get(&self, id: Uuid) -> Result<Option<AuditEntry>, AuditStoreError>;

    /// All entries for a scope, oldest first.
    async fn list_for_scope(&self, scope_id: Uuid) -> Result<Vec<AuditEntry>, AuditStoreError>;
}
