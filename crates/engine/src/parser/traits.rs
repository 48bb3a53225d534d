pub use super::model::{LineFormat, ParsedRecord};

use crate::clock::Clock;

/// A recognizer for one log line layout.
///
/// The registry tries recognizers in order and stops at the first structural
/// match, so `matches` must be a cheap shape check. `extract` is only called
/// after `matches` returned true and must be total: malformed details inside
/// a structurally matching line (a bad date, broken JSON) degrade to defaults
/// instead of failing.
pub trait FormatRecognizer: Send + Sync {
    fn matches(&self, line: &str) -> bool;
    fn extract(&self, line: &str, clock: &dyn Clock) -> ParsedRecord;
    fn format(&self) -> LineFormat;
}
