use std::sync::Arc;

use tracing::trace;

use crate::clock::Clock;

use super::formats::{JsonRecognizer, StandardRecognizer, SyslogRecognizer};
use super::model::ParsedRecord;
use super::traits::FormatRecognizer;

/// Ordered registry of line-format recognizers.
///
/// Order matters: formats are not mutually exclusive (a JSON object can
/// appear as the tail of the standard layout), so the structured timestamped
/// format is tried first, then syslog, then JSON, and the first structural
/// match wins. "No recognizer matched" is a normal outcome, handled by the
/// caller's unknown-format fallback.
pub struct FormatRegistry {
    recognizers: Vec<Box<dyn FormatRecognizer>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        let recognizers: Vec<Box<dyn FormatRecognizer>> = vec![
            Box::new(StandardRecognizer::new()),
            Box::new(SyslogRecognizer::new()),
            Box::new(JsonRecognizer),
        ];
        Self { recognizers }
    }

    /// Build a registry with a custom recognizer order, for deployments that
    /// add their own layouts.
    pub fn with_recognizers(recognizers: Vec<Box<dyn FormatRecognizer>>) -> Self {
        Self { recognizers }
    }

    fn find(&self, line: &str) -> Option<&dyn FormatRecognizer> {
        self.recognizers
            .iter()
            .map(|r| r.as_ref())
            .find(|r| r.matches(line))
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The line parser: applies the registry in order and always produces a
/// record for non-blank input.
pub struct LineParser {
    registry: FormatRegistry,
    clock: Arc<dyn Clock>,
}

impl LineParser {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: FormatRegistry::new(),
            clock,
        }
    }

    pub fn with_registry(registry: FormatRegistry, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// Parse one raw line into a normalized record.
    ///
    /// Total over all string input: blank lines yield `None`, everything
    /// else yields exactly one record — via the first matching recognizer,
    /// or the unknown-format fallback when nothing matches. Never fails.
    pub fn parse_line(&self, raw: &str) -> Option<ParsedRecord> {
        let line = raw.trim();
        if line.is_empty() {
            return None;
        }

        let record = match self.registry.find(line) {
            Some(recognizer) => {
                trace!(format = recognizer.format().as_str(), "line matched");
                recognizer.extract(line, self.clock.as_ref())
            }
            None => ParsedRecord::unknown(line, self.clock.as_ref()),
        };

        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::parser::model::Severity;
    use chrono::{TimeZone, Utc};

    fn parser() -> LineParser {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap());
        LineParser::new(Arc::new(clock))
    }

    #[test]
    fn blank_lines_yield_none() {
        let parser = parser();
        assert!(parser.parse_line("").is_none());
        assert!(parser.parse_line("   ").is_none());
        assert!(parser.parse_line("\t\t").is_none());
    }

    #[test]
    fn unknown_format_yields_degraded_record() {
        let parser = parser();
        let record = parser.parse_line("garbled nonsense line").unwrap();

        assert_eq!(record.level, "unknown");
        assert_eq!(record.severity, Severity::Low);
        assert_eq!(record.message, "garbled nonsense line");
        assert!(!record.timestamp_parsed);
    }

    #[test]
    fn standard_format_wins_over_json_looking_tail() {
        // The message body is brace-delimited, but the line as a whole does
        // not start with '{', and the standard grammar is tried first anyway.
        let parser = parser();
        let record = parser
            .parse_line(r#"2024-01-15 14:30:00 - INFO - {"key": "value"}"#)
            .unwrap();

        assert_eq!(record.level, "info");
        assert_eq!(record.message, r#"{"key": "value"}"#);
        assert!(record.timestamp_parsed);
    }

    #[test]
    fn syslog_format_recognized() {
        let parser = parser();
        let record = parser
            .parse_line("Jan 15 08:12:45 webserver sshd restarted")
            .unwrap();

        assert_eq!(record.fields.get("hostname").map(String::as_str), Some("webserver"));
        assert_eq!(record.message, "sshd restarted");
    }

    #[test]
    fn json_format_recognized() {
        let parser = parser();
        let record = parser
            .parse_line(r#"{"level":"error","message":"boom"}"#)
            .unwrap();

        assert_eq!(record.level, "error");
        assert_eq!(record.severity, Severity::High);
        assert_eq!(record.message, "boom");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_before_recognition() {
        let parser = parser();
        let record = parser
            .parse_line("  {\"level\":\"info\",\"message\":\"padded\"}  ")
            .unwrap();
        assert_eq!(record.message, "padded");
    }

    #[test]
    fn bad_timestamp_alone_never_drops_a_line() {
        let parser = parser();
        let record = parser
            .parse_line("2024-13-99 25:61:61 - ERROR - still here")
            .unwrap();

        assert!(!record.timestamp_parsed);
        assert_eq!(record.severity, Severity::High);
        assert_eq!(record.message, "still here");
    }

    #[test]
    fn totality_over_arbitrary_input() {
        let parser = parser();
        let inputs = [
            "\u{0}\u{1}\u{2} binary-ish",
            "{",
            "}",
            "::::::",
            "\u{fffd}\u{fffd}\u{fffd}",
        ];
        for input in inputs {
            let record = parser.parse_line(input).unwrap();
            assert_eq!(record.severity, Severity::Low, "input: {input:?}");
        }

        // A multi-megabyte single line is still just one unknown record.
        let huge = "x".repeat(2_000_000);
        let record = parser.parse_line(&huge).unwrap();
        assert_eq!(record.message.len(), 2_000_000);
    }

    #[test]
    fn custom_registry_order_is_honored() {
        use crate::parser::formats::JsonRecognizer;

        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap());
        let registry = FormatRegistry::with_recognizers(vec![Box::new(JsonRecognizer)]);
        let parser = LineParser::with_registry(registry, Arc::new(clock));

        // Standard lines are now unknown because only JSON is registered.
        let record = parser
            .parse_line("2024-01-15 14:30:00 - ERROR - failed login")
            .unwrap();
        assert_eq!(record.level, "unknown");
    }
}
