//! Whole-batch processing: decode gate, per-line pipeline, report counters.
//!
//! Per-line work is pure and independent — no line's parsing depends on any
//! other line — so callers may shard a batch however they like. This layer
//! keeps the original line order and absorbs every per-line failure; the
//! only error it reports is a whole-input decode failure.

use serde::Serialize;

use crate::detect::{ThreatDetector, ThreatOutcome};
use crate::error::EngineError;
use crate::parser::{LineParser, ParsedRecord};

/// Analysis of one input line, keyed by its original position (1-based).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineAnalysis {
    pub line_no: usize,
    pub record: ParsedRecord,
    pub threats: Vec<ThreatOutcome>,
}

/// Batch-level counters reported to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// All lines in the input, blank ones included.
    pub lines_seen: usize,
    /// Lines that yielded a record (everything except blank lines).
    pub records_parsed: usize,
    /// Total rule firings across the batch.
    pub alerts_raised: usize,
}

/// Decode a whole input batch as UTF-8 text.
///
/// The only failure the engine ever propagates: reported once for the whole
/// batch, never per line. The caller decides whether to abort or skip.
pub fn decode(input: &[u8]) -> Result<&str, EngineError> {
    std::str::from_utf8(input).map_err(|e| EngineError::NonUtf8Input(e.valid_up_to()))
}

/// Run the parse-and-detect pipeline over every line of a batch.
///
/// Blank lines are counted but yield no record; every other line yields
/// exactly one. Results keep the original line order.
pub fn analyze(
    text: &str,
    parser: &LineParser,
    detector: &ThreatDetector,
) -> (Vec<LineAnalysis>, BatchReport) {
    let mut results = Vec::new();
    let mut report = BatchReport::default();

    for (idx, raw) in text.lines().enumerate() {
        report.lines_seen += 1;
        let Some(record) = parser.parse_line(raw) else {
            continue;
        };
        report.records_parsed += 1;

        let threats = detector.detect(&record);
        report.alerts_raised += threats.len();

        results.push(LineAnalysis {
            line_no: idx + 1,
            record,
            threats,
        });
    }

    (results, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::detect::RuleCatalog;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn pipeline() -> (LineParser, ThreatDetector) {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap());
        let parser = LineParser::new(Arc::new(clock));
        let detector = ThreatDetector::new(Arc::new(RuleCatalog::healthcare_default()));
        (parser, detector)
    }

    #[test]
    fn decode_accepts_utf8() {
        assert_eq!(decode(b"hello\nworld").unwrap(), "hello\nworld");
    }

    #[test]
    fn decode_rejects_invalid_utf8_once_for_whole_batch() {
        let err = decode(&[b'o', b'k', 0xFF, 0xFE]).unwrap_err();
        assert!(matches!(err, EngineError::NonUtf8Input(2)));
    }

    #[test]
    fn blank_lines_counted_but_yield_no_record() {
        let (parser, detector) = pipeline();
        let text = "2024-01-15 14:30:00 - INFO - heartbeat ok\n\n   \ngarbled nonsense line\n";

        let (results, report) = analyze(text, &parser, &detector);

        assert_eq!(report.lines_seen, 4);
        assert_eq!(report.records_parsed, 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].line_no, 1);
        assert_eq!(results[1].line_no, 4);
    }

    #[test]
    fn alerts_are_counted_across_the_batch() {
        let (parser, detector) = pipeline();
        // Monday 14:30 (no context rules) with one firing content rule each.
        let text = "2024-01-15 14:30:00 - ERROR - failed login from 10.0.0.5\n\
                    2024-01-15 14:31:00 - WARN - bulk data export started\n";

        let (results, report) = analyze(text, &parser, &detector);

        assert_eq!(report.lines_seen, 2);
        assert_eq!(report.records_parsed, 2);
        assert_eq!(report.alerts_raised, 2);
        assert_eq!(results[0].threats[0].rule, "unauthorized_access");
        assert_eq!(results[1].threats[0].rule, "data_export");
    }

    #[test]
    fn malformed_lines_never_abort_the_batch() {
        let (parser, detector) = pipeline();
        let text = "2024-13-99 25:61:61 - ERROR - bad date\n\
                    {broken json}\n\
                    2024-01-15 14:30:00 - INFO - heartbeat ok\n";

        let (results, report) = analyze(text, &parser, &detector);

        assert_eq!(report.records_parsed, 3);
        // The bad-date line kept its level and message.
        assert_eq!(results[0].record.level, "error");
        assert!(!results[0].record.timestamp_parsed);
        // The broken JSON degraded to the unknown-format record.
        assert_eq!(results[1].record.level, "unknown");
        // The well-formed line parsed normally.
        assert!(results[2].record.timestamp_parsed);
    }

    #[test]
    fn results_keep_original_line_order() {
        let (parser, detector) = pipeline();
        let text = "first line\nsecond line\nthird line";

        let (results, _) = analyze(text, &parser, &detector);

        let line_nos: Vec<usize> = results.iter().map(|r| r.line_no).collect();
        assert_eq!(line_nos, vec![1, 2, 3]);
        assert_eq!(results[0].record.message, "first line");
        assert_eq!(results[2].record.message, "third line");
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let (parser, detector) = pipeline();
        let (results, report) = analyze("", &parser, &detector);
        assert!(results.is_empty());
        assert_eq!(report, BatchReport::default());
    }

    #[test]
    fn report_serializes_for_the_caller() {
        let report = BatchReport {
            lines_seen: 10,
            records_parsed: 8,
            alerts_raised: 3,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"lines_seen":10,"records_parsed":8,"alerts_raised":3}"#
        );
    }
}
