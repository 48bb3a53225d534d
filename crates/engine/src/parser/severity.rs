//! Level-token classification.

use super::model::Severity;

/// Map a lower-cased level token onto the four-bucket severity scale.
///
/// Total and pure: any token absent from the table classifies as low.
pub fn classify(token: &str) -> Severity {
    match token {
        "emerg" | "alert" | "crit" => Severity::Critical,
        "error" | "err" => Severity::High,
        "warning" | "warn" => Severity::Medium,
        "notice" | "info" | "debug" | "unknown" => Severity::Low,
        _ => Severity::Low,
    }
}
