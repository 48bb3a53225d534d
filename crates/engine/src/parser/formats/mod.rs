/// Individual line-format recognizers, one file per layout.

pub mod json;
pub mod standard;
pub mod syslog;

// Re-export recognizer implementations
pub use json::JsonRecognizer;
pub use standard::StandardRecognizer;
pub use syslog::SyslogRecognizer;
