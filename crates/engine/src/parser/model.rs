use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;

/// Log-entry / threat criticality on a fixed ordered scale.
///
/// The declaration order gives the total ordering
/// `Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

/// Recognized line layouts, in registry trial order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineFormat {
    /// `YYYY-MM-DD HH:MM:SS - LEVEL - message`
    Standard,
    /// `Mon DD HH:MM:SS hostname message`
    Syslog,
    /// Single-line JSON object with optional timestamp/level/message
    Json,
    /// No recognizer matched
    Unknown,
}

impl LineFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineFormat::Standard => "standard",
            LineFormat::Syslog => "syslog",
            LineFormat::Json => "json",
            LineFormat::Unknown => "unknown",
        }
    }
}

/// The normalized result of parsing one raw log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecord {
    /// Canonical timezone-aware instant; the current instant when the line
    /// carried no parseable timestamp.
    pub timestamp: DateTime<Utc>,

    /// False when `timestamp` is the fallback instant rather than a value
    /// observed in the line.
    pub timestamp_parsed: bool,

    /// Original level token, lower-cased; `"unknown"` when absent.
    pub level: String,

    pub severity: Severity,

    /// Free-text body used for content-rule matching.
    pub message: String,

    /// Extra fields the source format carried beyond timestamp/level/message
    /// (e.g. syslog hostname, additional JSON payload keys).
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl ParsedRecord {
    /// The degraded record used when no recognizer matched the line.
    pub fn unknown(line: &str, clock: &dyn Clock) -> Self {
        Self {
            timestamp: clock.now(),
            timestamp_parsed: false,
            level: "unknown".to_string(),
            severity: Severity::Low,
            message: line.to_string(),
            fields: BTreeMap::new(),
        }
    }
}
