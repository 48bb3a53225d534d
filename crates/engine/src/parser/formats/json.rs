use serde_json::Value;

use crate::clock::Clock;
use crate::parser::model::{LineFormat, ParsedRecord};
use crate::parser::timestamp::{self, NormalizedTimestamp};
use crate::parser::traits::FormatRecognizer;
use crate::parser::severity;

/// Recognizer for single-line JSON objects with optional `timestamp`,
/// `level` and `message` fields:
///
/// ```text
/// {"timestamp":"2024-01-15T10:00:00Z","level":"warning","message":"config changed"}
/// ```
///
/// `matches` is a brace-shape check only; a line that looks like JSON but
/// does not parse as an object degrades to the unknown-format record.
pub struct JsonRecognizer;

impl FormatRecognizer for JsonRecognizer {
    fn matches(&self, line: &str) -> bool {
        line.starts_with('{') && line.ends_with('}')
    }

    fn extract(&self, line: &str, clock: &dyn Clock) -> ParsedRecord {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(_) => return ParsedRecord::unknown(line, clock),
        };
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => return ParsedRecord::unknown(line, clock),
        };

        let ts = obj
            .get("timestamp")
            .and_then(Value::as_str)
            .map(|raw| timestamp::from_iso8601(raw, clock))
            .unwrap_or_else(|| NormalizedTimestamp::Fallback(clock.now()));

        let level = obj
            .get("level")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_lowercase();

        let message = obj
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let mut record = ParsedRecord {
            timestamp: ts.instant(),
            timestamp_parsed: ts.was_observed(),
            severity: severity::classify(&level),
            level,
            message,
            fields: Default::default(),
        };

        // Preserve any payload keys beyond the three well-known fields.
        for (key, val) in obj {
            if matches!(key.as_str(), "timestamp" | "level" | "message") {
                continue;
            }
            let rendered = match val {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            record.fields.insert(key.clone(), rendered);
        }

        record
    }

    fn format(&self) -> LineFormat {
        LineFormat::Json
    }
}
