//! Threat rule catalog and detection.
//!
//! - `rules.rs`: rule types, validation, compiled immutable catalog
//! - `detector.rs`: evaluation of one record against the catalog
//!
//! The catalog is data, not code: it is built once (from the built-in set or
//! a TOML file), validated and compiled up front, and read-only during any
//! detection pass. Hot reload is an atomic-swap concern for the caller.

pub mod detector;
pub mod rules;

pub use detector::{ThreatDetector, ThreatOutcome};
pub use rules::{RuleCatalog, RuleKind, ThreatRule};
