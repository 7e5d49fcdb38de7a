//! Per-field aggregation and monetization.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::error::EstimateError;
use crate::pricing::classifier::EffortUnit;
use crate::pricing::rules::Field;

/// Aggregated effort and value for one field.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldAggregation {
    pub field: Field,
    /// Total work units: sum of EU for the field.
    pub twu: Decimal,
    /// The uniform multiplier product applied to the whole project.
    pub mp: Decimal,
    /// Effort index: TWU × MP.
    pub effort_index: Decimal,
    /// Monetary rate per effort unit.
    pub rate: Decimal,
    /// Field value: effort index × rate.
    pub value: Decimal,
}

/// Group units by field, apply the uniform multiplier, monetize, and sum
/// into the base project value.
///
/// Grouping uses a BTreeMap keyed by the closed field enum, so output order
/// is deterministic and independent of input order; accumulation is a plain
/// commutative sum.
pub fn aggregate(
    units: &[EffortUnit],
    mp: Decimal,
    rates: &RateTable,
) -> Result<(Vec<FieldAggregation>, Decimal), EstimateError> {
    let mut per_field: BTreeMap<Field, Decimal> = BTreeMap::new();
    for unit in units {
        *per_field.entry(unit.field).or_insert(Decimal::ZERO) += unit.eu;
    }

    let mut aggregations = Vec::with_capacity(per_field.len());
    let mut bpv = Decimal::ZERO;

    for (field, twu) in per_field {
        let rate = rates
            .rate_for(field)
            .ok_or_else(|| EstimateError::InvariantViolation {
                reason: format!("no monetary rate configured for field {field}"),
            })?;
        let effort_index = twu * mp;
        let value = effort_index * rate;
        bpv += value;
        aggregations.push(FieldAggregation {
            field,
            twu,
            mp,
            effort_index,
            rate,
            value,
        });
    }

    Ok((aggregations, bpv))
}
