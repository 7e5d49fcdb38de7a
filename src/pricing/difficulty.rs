//! Difficulty inference from scope text and metadata.

use std::collections::HashSet;

use aho_corasick::AhoCorasick;
use chrono::{DateTime, Duration, Utc};
use regex::Regex;

use crate::config::DifficultyConfig;
use crate::scope::{Priority, ScopeRecord};

/// How clearly the brief describes the work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clarity {
    Low,
    Normal,
}

/// Deadline pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Normal,
    Urgent,
}

/// Regulatory exposure of the usage context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compliance {
    Standard,
    Regulated,
}

/// Count of distinct external systems referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Integrations {
    Few,
    Multiple,
}

/// Whether the brief depends on client assets not yet delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ambiguity {
    None,
    Some,
}

/// The five categorical difficulty factors. Derived purely from scope
/// content each run; persisted only inside the audit snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DifficultyFactors {
    pub clarity: Clarity,
    pub urgency: Urgency,
    pub compliance: Compliance,
    pub integrations: Integrations,
    pub ambiguity: Ambiguity,
}

/// Industries whose mention marks the scope as regulated.
const REGULATED_KEYWORDS: &[&str] = &[
    "healthcare",
    "medical",
    "patient",
    "hipaa",
    "clinic",
    "pharma",
    "finance",
    "financial",
    "banking",
    "insurance",
    "fintech",
    "legal",
    "law firm",
    "attorney",
    "government",
    "municipal",
    "public sector",
    "gdpr",
];

/// External systems counted toward the integration factor.
const INTEGRATION_KEYWORDS: &[&str] = &[
    "stripe",
    "paypal",
    "salesforce",
    "hubspot",
    "shopify",
    "zapier",
    "mailchimp",
    "twilio",
    "slack",
    "quickbooks",
    "sap",
    "crm",
    "erp",
    "webhook",
];

/// Infers difficulty factors from a scope record. Pure function of scope
/// content and the supplied reference time.
pub struct DifficultyInferencer {
    config: DifficultyConfig,
    regulated: AhoCorasick,
    integrations: AhoCorasick,
    pending_assets: Regex,
}

impl DifficultyInferencer {
    pub fn new(config: DifficultyConfig) -> Self {
        let regulated = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(REGULATED_KEYWORDS)
            .expect("regulated keyword set must build");
        let integrations = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(INTEGRATION_KEYWORDS)
            .expect("integration keyword set must build");
        // Client-supplied assets referenced as still outstanding.
        let pending_assets = Regex::new(
            r"(?i)\b(will (?:be )?provided?|to be provided|not yet|pending|awaiting|tbd|to be decided)\b",
        )
        .expect("pending-assets pattern must compile");

        Self {
            config,
            regulated,
            integrations,
            pending_assets,
        }
    }

    /// Derive all five factors. Total: every scope yields exactly one value
    /// per factor, defaulting to the normal/standard/none branch.
    pub fn infer(&self, scope: &ScopeRecord, now: DateTime<Utc>) -> DifficultyFactors {
        DifficultyFactors {
            clarity: self.infer_clarity(scope),
            urgency: self.infer_urgency(scope, now),
            compliance: self.infer_compliance(scope),
            integrations: self.infer_integrations(scope),
            ambiguity: self.infer_ambiguity(scope),
        }
    }

    fn infer_clarity(&self, scope: &ScopeRecord) -> Clarity {
        let detail = scope.goal.trim().len() + scope.usage_context.trim().len();
        if detail < self.config.min_detail_chars {
            Clarity::Low
        } else {
            Clarity::Normal
        }
    }

    fn infer_urgency(&self, scope: &ScopeRecord, now: DateTime<Utc>) -> Urgency {
        if scope.priority == Some(Priority::Speed) {
            return Urgency::Urgent;
        }
        if let Some(deadline) = scope.deadline {
            if deadline - now < Duration::days(self.config.urgent_horizon_days) {
                return Urgency::Urgent;
            }
        }
        Urgency::Normal
    }

    fn infer_compliance(&self, scope: &ScopeRecord) -> Compliance {
        let intent = format!("{} {}", scope.goal, scope.usage_context);
        if self.regulated.is_match(&intent) {
            Compliance::Regulated
        } else {
            Compliance::Standard
        }
    }

    fn infer_integrations(&self, scope: &ScopeRecord) -> Integrations {
        let text = full_text(scope);
        let distinct: HashSet<usize> = self
            .integrations
            .find_iter(&text)
            .map(|m| m.pattern().as_usize())
            .collect();
        if distinct.len() > 1 {
            Integrations::Multiple
        } else {
            Integrations::Few
        }
    }

    fn infer_ambiguity(&self, scope: &ScopeRecord) -> Ambiguity {
        let intent = format!("{} {}", scope.goal, scope.usage_context);
        if self.pending_assets.is_match(&intent) {
            Ambiguity::Some
        } else {
            Ambiguity::None
        }
    }
}

/// All scope text in one haystack for integration counting.
fn full_text(scope: &ScopeRecord) -> String {
    let mut text = String::new();
    text.push_str(&scope.goal);
    text.push(' ');
    text.push_str(&scope.usage_context);
    for line in scope.in_scope.iter().chain(&scope.deliverables) {
        text.push(' ');
        text.push_str(line);
    }
    text
}
