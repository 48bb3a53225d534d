//! Log parsing and normalization.
//!
//! Converts raw log lines into structured, normalized records by trying an
//! ordered list of format recognizers.
//!
//! # Architecture
//!
//! - `traits.rs`: the recognizer capability (`matches` / `extract`)
//! - `registry.rs`: ordered recognizer registry and the line parser
//! - `formats/`: individual format recognizers
//! - `timestamp.rs`: timestamp normalization with observable fallback
//! - `severity.rs`: level-token classification
//!
//! # Guarantees
//!
//! Parsing is total over all string input: every non-blank line yields
//! exactly one record, blank lines yield none, and a malformed line degrades
//! to the unknown-format record instead of aborting the batch.

pub mod formats;
pub mod model;
pub mod registry;
pub mod severity;
pub mod timestamp;
pub mod traits;

// Re-export commonly used types
pub use model::{LineFormat, ParsedRecord, Severity};
pub use registry::{FormatRegistry, LineParser};
pub use traits::FormatRecognizer;
