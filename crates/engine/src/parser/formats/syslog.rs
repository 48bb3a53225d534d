use regex::Regex;

use crate::clock::Clock;
use crate::parser::model::{LineFormat, ParsedRecord, Severity};
use crate::parser::timestamp;
use crate::parser::traits::FormatRecognizer;

/// Recognizer for the month-name syslog layout:
///
/// ```text
/// Jan 15 08:12:45 webserver sshd[1234]: session opened
/// ```
///
/// The layout carries no year (the clock's current calendar year is assumed)
/// and no level token, so records classify as `unknown`/low. The hostname is
/// preserved as an extra field.
pub struct SyslogRecognizer {
    grammar: Regex,
}

impl SyslogRecognizer {
    pub fn new() -> Self {
        let grammar = Regex::new(r"^(\w+ \d{2} \d{2}:\d{2}:\d{2}) (\w+) (.*)$")
            .expect("syslog grammar is a valid regex");
        Self { grammar }
    }
}

impl Default for SyslogRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRecognizer for SyslogRecognizer {
    fn matches(&self, line: &str) -> bool {
        self.grammar.is_match(line)
    }

    fn extract(&self, line: &str, clock: &dyn Clock) -> ParsedRecord {
        let caps = match self.grammar.captures(line) {
            Some(caps) => caps,
            None => return ParsedRecord::unknown(line, clock),
        };

        let ts = timestamp::from_syslog(&caps[1], clock);

        let mut record = ParsedRecord {
            timestamp: ts.instant(),
            timestamp_parsed: ts.was_observed(),
            level: "unknown".to_string(),
            severity: Severity::Low,
            message: caps[3].to_string(),
            fields: Default::default(),
        };
        record
            .fields
            .insert("hostname".to_string(), caps[2].to_string());
        record
    }

    fn format(&self) -> LineFormat {
        LineFormat::Syslog
    }
}
