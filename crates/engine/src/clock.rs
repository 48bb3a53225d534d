//! Injected time source.
//!
//! The timestamp fallback and the context rules never read the ambient
//! system clock directly; they go through [`Clock`] so deterministic tests
//! can supply a fixed instant.

use chrono::{DateTime, Datelike, Utc};

pub trait Clock: Send + Sync {
    /// Current instant, substituted whenever a timestamp cannot be parsed.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar year, used to complete year-less syslog timestamps.
    fn year(&self) -> i32 {
        self.now().year()
    }
}

/// Production clock reading system time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock for deterministic tests.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
