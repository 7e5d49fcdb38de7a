//! Scope input records supplied by the scope-authoring collaborator.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::EstimateError;

/// Client intent for how the project should be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Deliver as fast as possible.
    Speed,
    /// Favor polish over speed.
    Quality,
    /// Favor thoroughness and depth.
    Depth,
}

/// A freelancer's verified skill level, used only to select which price
/// tier that freelancer is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeLevel {
    Low,
    Medium,
    High,
}

impl BadgeLevel {
    /// Parse a badge label. Unknown labels default to `Medium`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }
}

/// A project scope as authored upstream. Read-only input to the pipeline.
///
/// Only `field` is mandatory; every list and metadata value may be empty
/// and the pipeline still produces a valid non-zero estimate.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ScopeRecord {
    pub id: Uuid,
    /// Free-text domain field name (e.g. "Content Writing & Strategy").
    pub field: String,
    /// Free-text work items the client considers in scope.
    #[serde(default)]
    pub in_scope: Vec<String>,
    /// Free-text deliverables; may overlap with `in_scope`.
    #[serde(default)]
    pub deliverables: Vec<String>,
    /// What the client wants to achieve.
    #[serde(default)]
    pub goal: String,
    /// Where and how the result will be used.
    #[serde(default)]
    pub usage_context: String,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
}

impl ScopeRecord {
    /// Validate the record before any pipeline stage runs.
    ///
    /// An empty field name is a hard failure; everything else degrades
    /// gracefully downstream.
    pub fn validate(&self) -> Result<(), EstimateError> {
        if self.field.trim().is_empty() {
            return Err(EstimateError::InvalidInput {
                reason: "scope field name is empty".to_string(),
            });
        }
        Ok(())
    }
}
