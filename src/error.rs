use thiserror::Error;

/// Failure to obtain or read `pebble.json`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("config request failed: {0}")]
    Network(String),

    #[error("config request returned HTTP {0}")]
    Status(u16),

    #[error("config is not valid JSON: {0}")]
    Parse(String),
}

/// Failure to obtain a model handle. Always reported to the user as a
/// single assistant message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelLoadError {
    #[error("no configuration available")]
    MissingConfig,

    #[error("configuration has no model paths")]
    MissingPaths,

    #[error("tmImage library is not available on the page")]
    LibraryUnavailable,

    #[error("model load rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("predict rejected: {0}")]
    Rejected(String),

    #[error("could not decode predictions: {0}")]
    Decode(String),

    #[error("model returned no predictions")]
    Empty,
}
