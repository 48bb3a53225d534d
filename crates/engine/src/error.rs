use thiserror::Error;

/// Errors the engine can report to its caller.
///
/// Per-line failures never surface here: malformed lines degrade to fallback
/// records inside the parser. Only whole-batch decoding, catalog loading and
/// configuration loading can fail.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("input is not valid UTF-8 (first invalid byte at offset {0})")]
    NonUtf8Input(usize),

    #[error("duplicate rule name: {0}")]
    DuplicateRuleName(String),

    #[error("content rule '{rule}' has no pattern")]
    MissingPattern { rule: String },

    #[error("invalid pattern in rule '{rule}': {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read rule catalog {path}: {source}")]
    CatalogIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule catalog {path}: {source}")]
    CatalogFormat {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigFormat {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
