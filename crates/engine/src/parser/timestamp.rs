//! Timestamp normalization with observable fallback.
//!
//! Each format hands its timestamp string here; the outcome says whether the
//! instant was observed in the line or substituted from the clock. A parse
//! failure never propagates — it always degrades to the current instant.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::clock::Clock;

/// Outcome of normalizing one format-specific timestamp string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizedTimestamp {
    /// Parsed from the input line.
    Observed(DateTime<Utc>),
    /// Substituted with the clock's current instant after a parse failure
    /// (or when the line carried no timestamp at all).
    Fallback(DateTime<Utc>),
}

impl NormalizedTimestamp {
    pub fn instant(&self) -> DateTime<Utc> {
        match self {
            NormalizedTimestamp::Observed(dt) | NormalizedTimestamp::Fallback(dt) => *dt,
        }
    }

    pub fn was_observed(&self) -> bool {
        matches!(self, NormalizedTimestamp::Observed(_))
    }
}

/// `YYYY-MM-DD HH:MM:SS`, normalized as UTC.
pub fn from_standard(raw: &str, clock: &dyn Clock) -> NormalizedTimestamp {
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        Ok(naive) => NormalizedTimestamp::Observed(naive.and_utc()),
        Err(_) => NormalizedTimestamp::Fallback(clock.now()),
    }
}

/// `Mon DD HH:MM:SS` with no year; the clock's current calendar year is
/// assumed.
pub fn from_syslog(raw: &str, clock: &dyn Clock) -> NormalizedTimestamp {
    let with_year = format!("{} {}", clock.year(), raw);
    match NaiveDateTime::parse_from_str(&with_year, "%Y %b %d %H:%M:%S") {
        Ok(naive) => NormalizedTimestamp::Observed(naive.and_utc()),
        Err(_) => NormalizedTimestamp::Fallback(clock.now()),
    }
}

/// ISO-8601 profile used by the JSON format.
///
/// A trailing literal `Z` is rewritten to an explicit `+00:00` offset before
/// parsing; a zone-less timestamp is accepted and normalized as UTC.
pub fn from_iso8601(raw: &str, clock: &dyn Clock) -> NormalizedTimestamp {
    let rewritten = match raw.strip_suffix('Z') {
        Some(stripped) => format!("{stripped}+00:00"),
        None => raw.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&rewritten) {
        return NormalizedTimestamp::Observed(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(&rewritten, "%Y-%m-%dT%H:%M:%S%.f") {
        return NormalizedTimestamp::Observed(naive.and_utc());
    }

    NormalizedTimestamp::Fallback(clock.now())
}
