//! Scope decomposition: structured text lists into a flat list of effort
//! units, with overlap dedup and a guaranteed non-empty result.

use crate::pricing::classifier::{EffortClassifier, EffortUnit, Resolution};
use crate::scope::ScopeRecord;
use rust_decimal_macros::dec;

/// Description used for the synthetic unit emitted for empty scopes.
const SYNTHETIC_DESCRIPTION: &str = "standard project scope";

/// Decompose a scope into effort units. Never returns an empty list.
///
/// In-scope items are the primary source. Deliverables are skipped when
/// their normalized text is a substring match (either direction) of a line
/// already seen, so the same work item is not counted under two labels.
pub fn decompose(scope: &ScopeRecord, classifier: &EffortClassifier) -> Vec<EffortUnit> {
    let mut seen: Vec<String> = Vec::new();
    let mut units: Vec<EffortUnit> = Vec::new();

    for line in &scope.in_scope {
        let normalized = normalize(line);
        if normalized.is_empty() || seen.contains(&normalized) {
            continue;
        }
        units.push(classifier.classify(&scope.field, line, None));
        seen.push(normalized);
    }

    for line in &scope.deliverables {
        let normalized = normalize(line);
        if normalized.is_empty() || overlaps(&seen, &normalized) {
            continue;
        }
        units.push(classifier.classify(&scope.field, line, None));
        seen.push(normalized);
    }

    if units.is_empty() {
        tracing::debug!(scope_id = %scope.id, "empty scope, emitting synthetic unit");
        units.push(EffortUnit {
            field: classifier.canonical_field(&scope.field),
            description: SYNTHETIC_DESCRIPTION.to_string(),
            eu: dec!(1),
            resolution: Resolution::GlobalFallback {
                reason: "scope produced no work items".to_string(),
            },
        });
    }

    units
}

fn normalize(line: &str) -> String {
    line.trim().to_lowercase()
}

/// Substring match in either direction against any already-seen line.
/// Short common phrases can false-positive here; that looseness is an
/// accepted trade-off of the dedup scheme.
fn overlaps(seen: &[String], candidate: &str) -> bool {
    seen.iter()
        .any(|s| s.contains(candidate) || candidate.contains(s))
}
