use regex::Regex;

use crate::clock::Clock;
use crate::parser::model::{LineFormat, ParsedRecord};
use crate::parser::traits::FormatRecognizer;
use crate::parser::{severity, timestamp};

/// Recognizer for the structured timestamped layout common in application
/// audit logs:
///
/// ```text
/// 2024-01-15 14:30:00 - ERROR - failed login from 10.0.0.5
/// ```
pub struct StandardRecognizer {
    grammar: Regex,
}

impl StandardRecognizer {
    pub fn new() -> Self {
        // Anchored; the final group swallows the rest of the line as the
        // message body.
        let grammar = Regex::new(r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}) - (\w+) - (.*)$")
            .expect("standard grammar is a valid regex");
        Self { grammar }
    }
}

impl Default for StandardRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRecognizer for StandardRecognizer {
    fn matches(&self, line: &str) -> bool {
        self.grammar.is_match(line)
    }

    fn extract(&self, line: &str, clock: &dyn Clock) -> ParsedRecord {
        let caps = match self.grammar.captures(line) {
            Some(caps) => caps,
            None => return ParsedRecord::unknown(line, clock),
        };

        // The grammar only checks digit shapes; an impossible calendar date
        // still degrades to the fallback instant here.
        let ts = timestamp::from_standard(&caps[1], clock);
        let level = caps[2].to_lowercase();

        ParsedRecord {
            timestamp: ts.instant(),
            timestamp_parsed: ts.was_observed(),
            severity: severity::classify(&level),
            level,
            message: caps[3].to_string(),
            fields: Default::default(),
        }
    }

    fn format(&self) -> LineFormat {
        LineFormat::Standard
    }
}
