use std::collections::HashSet;
use std::fs;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::parser::Severity;

/// How a rule is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Pattern searched case-insensitively in the record's message.
    Content,
    /// Fires when the record's hour is >= 20 or < 6.
    AfterHours,
    /// Fires when the record's weekday is Saturday or Sunday.
    Weekend,
}

impl RuleKind {
    /// Context rules derive from the timestamp, not the message.
    pub fn is_context(&self) -> bool {
        matches!(self, RuleKind::AfterHours | RuleKind::Weekend)
    }
}

/// One named detection rule as declared in a catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatRule {
    /// Unique identifier within the catalog.
    pub name: String,
    pub kind: RuleKind,
    /// Textual pattern; required for content rules, ignored for context rules.
    #[serde(default)]
    pub pattern: Option<String>,
    /// Severity of the outcome, independent of the record's own severity.
    pub severity: Severity,
    /// Human-readable explanation carried into the outcome.
    pub description: String,
}

#[derive(Debug)]
struct CompiledRule {
    rule: ThreatRule,
    /// Present exactly for content rules; compiled once at catalog build.
    matcher: Option<Regex>,
}

/// Immutable, validated rule catalog.
///
/// Declaration order is preserved and drives the outcome order during
/// detection. Share it as an `Arc` snapshot; to hot-reload, build a fresh
/// catalog and republish the `Arc` so no pass observes a partial rule set.
#[derive(Debug)]
pub struct RuleCatalog {
    rules: Vec<CompiledRule>,
}

impl RuleCatalog {
    /// Compile and validate a rule set, preserving declaration order.
    ///
    /// Fails on duplicate names, content rules without a pattern, and
    /// patterns that do not compile.
    pub fn from_rules(rules: Vec<ThreatRule>) -> Result<Self, EngineError> {
        let mut seen: HashSet<String> = HashSet::with_capacity(rules.len());
        let mut compiled = Vec::with_capacity(rules.len());

        for rule in rules {
            if !seen.insert(rule.name.clone()) {
                return Err(EngineError::DuplicateRuleName(rule.name));
            }

            let matcher = match rule.kind {
                RuleKind::Content => {
                    let pattern = rule.pattern.as_deref().ok_or_else(|| {
                        EngineError::MissingPattern {
                            rule: rule.name.clone(),
                        }
                    })?;
                    let regex = RegexBuilder::new(pattern)
                        .case_insensitive(true)
                        .build()
                        .map_err(|source| EngineError::InvalidPattern {
                            rule: rule.name.clone(),
                            source,
                        })?;
                    Some(regex)
                }
                RuleKind::AfterHours | RuleKind::Weekend => None,
            };

            compiled.push(CompiledRule { rule, matcher });
        }

        Ok(Self { rules: compiled })
    }

    /// Parse a catalog from TOML text (`[[rule]]` tables).
    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self, EngineError> {
        let file: CatalogFile =
            toml::from_str(contents).map_err(|source| EngineError::CatalogFormat {
                path: origin.to_string(),
                source,
            })?;
        Self::from_rules(file.rule)
    }

    /// Load a catalog from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| EngineError::CatalogIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents, &path.display().to_string())
    }

    /// The built-in healthcare compliance catalog (mirrored by
    /// `rules/healthcare.toml`).
    pub fn healthcare_default() -> Self {
        let rules = vec![
            content(
                "unauthorized_access",
                "(failed login|invalid credential|access denied|authentication failure)",
                Severity::High,
                "Possible unauthorized access attempt",
            ),
            content(
                "phi_access",
                "(patient record|medical history|phi|ephi|health information|medical record)",
                Severity::Critical,
                "Access to protected health information detected",
            ),
            content(
                "data_export",
                "(export|download|bulk data|mass retrieval|data dump)",
                Severity::Medium,
                "Large data export operation detected",
            ),
            content(
                "config_change",
                "(configuration change|config change|settings modified|user added|permission changed|admin rights)",
                Severity::High,
                "System configuration changes detected",
            ),
            content(
                "multiple_failures",
                "(multiple failed|repeated attempt|too many attempts)",
                Severity::High,
                "Multiple failed access attempts from same source",
            ),
            content(
                "privilege_escalation",
                "(privilege escalation|root access|admin access|sudo command)",
                Severity::Critical,
                "Privilege escalation attempt detected",
            ),
            content(
                "sql_injection",
                "(select.*from|union.*select|drop table|insert into|sql syntax)",
                Severity::Critical,
                "Possible SQL injection attempt",
            ),
            content(
                "file_access",
                r"(etc/passwd|/etc/shadow|/root/|/admin/|config\.)",
                Severity::High,
                "Sensitive file access attempt",
            ),
            content(
                "system_shutdown",
                "(shutdown|reboot|halt|poweroff|system stop)",
                Severity::Medium,
                "System shutdown/reboot command executed",
            ),
            content(
                "firewall_change",
                "(iptables|firewall|port open|port forward|ufw)",
                Severity::High,
                "Firewall configuration change detected",
            ),
            context(
                "after_hours_access",
                RuleKind::AfterHours,
                Severity::Medium,
                "Access during non-business hours detected",
            ),
            context(
                "weekend_access",
                RuleKind::Weekend,
                Severity::Medium,
                "Access during weekend detected",
            ),
        ];

        Self::from_rules(rules).expect("built-in catalog is valid")
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Content rules with their compiled matchers, in declaration order.
    pub(crate) fn content_rules(&self) -> impl Iterator<Item = (&ThreatRule, &Regex)> {
        self.rules
            .iter()
            .filter_map(|c| c.matcher.as_ref().map(|m| (&c.rule, m)))
    }

    /// Context rules in declaration order.
    pub(crate) fn context_rules(&self) -> impl Iterator<Item = &ThreatRule> {
        self.rules
            .iter()
            .filter(|c| c.rule.kind.is_context())
            .map(|c| &c.rule)
    }
}

fn content(name: &str, pattern: &str, severity: Severity, description: &str) -> ThreatRule {
    ThreatRule {
        name: name.to_string(),
        kind: RuleKind::Content,
        pattern: Some(pattern.to_string()),
        severity,
        description: description.to_string(),
    }
}

fn context(name: &str, kind: RuleKind, severity: Severity, description: &str) -> ThreatRule {
    ThreatRule {
        name: name.to_string(),
        kind,
        pattern: None,
        severity,
        description: description.to_string(),
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    rule: Vec<ThreatRule>,
}
