// Domain-driven module structure for the audit-log threat engine.

// Core infrastructure
pub mod clock;
pub mod config;
pub mod error;
pub mod parser;

// Domain modules
pub mod batch;
pub mod detect;

// Re-export the two collaborator-facing entry points and their types.
pub use batch::{analyze, decode, BatchReport, LineAnalysis};
pub use clock::{Clock, FixedClock, SystemClock};
pub use detect::{RuleCatalog, ThreatDetector, ThreatOutcome};
pub use error::EngineError;
pub use parser::{LineParser, ParsedRecord, Severity};
