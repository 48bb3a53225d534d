use std::sync::Arc;

use chrono::{Datelike, Timelike, Weekday};
use serde::Serialize;
use tracing::debug;

use crate::parser::{ParsedRecord, Severity};

use super::rules::{RuleCatalog, RuleKind, ThreatRule};

/// One rule firing against one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreatOutcome {
    pub rule: String,
    pub severity: Severity,
    pub description: String,
}

impl ThreatOutcome {
    fn from_rule(rule: &ThreatRule) -> Self {
        Self {
            rule: rule.name.clone(),
            severity: rule.severity,
            description: rule.description.clone(),
        }
    }
}

/// Evaluates parsed records against an immutable catalog snapshot.
pub struct ThreatDetector {
    catalog: Arc<RuleCatalog>,
}

impl ThreatDetector {
    pub fn new(catalog: Arc<RuleCatalog>) -> Self {
        Self { catalog }
    }

    /// Evaluate every rule against one record.
    ///
    /// Total and deterministic: content rules fire in catalog-declaration
    /// order on a case-insensitive pattern search over the message, followed
    /// by the context rules on the normalized timestamp. Each rule fires at
    /// most once per record; an empty result is a valid, common outcome.
    pub fn detect(&self, record: &ParsedRecord) -> Vec<ThreatOutcome> {
        let mut outcomes = Vec::new();

        for (rule, matcher) in self.catalog.content_rules() {
            if matcher.is_match(&record.message) {
                outcomes.push(ThreatOutcome::from_rule(rule));
            }
        }

        for rule in self.catalog.context_rules() {
            let fired = match rule.kind {
                RuleKind::AfterHours => {
                    let hour = record.timestamp.hour();
                    hour >= 20 || hour < 6
                }
                RuleKind::Weekend => {
                    matches!(record.timestamp.weekday(), Weekday::Sat | Weekday::Sun)
                }
                RuleKind::Content => false,
            };
            if fired {
                outcomes.push(ThreatOutcome::from_rule(rule));
            }
        }

        if !outcomes.is_empty() {
            debug!(matches = outcomes.len(), "record matched threat rules");
        }
        outcomes
    }
}
