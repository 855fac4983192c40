use thiserror::Error;

/// Custom error type for Prosaic operations.
#[derive(Debug, Error)]
pub enum ProsaicError {
    /// Annotation provider failed to produce a usable parse.
    #[error("Annotation error: {0}")]
    Annotation(String),

    /// Input validation failed (probabilities, weights, text).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration file could not be read or parsed.
    #[error("Config error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl From<std::io::Error> for ProsaicError {
    fn from(err: std::io::Error) -> Self {
        ProsaicError::Config {
            message: format!("I/O error: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::de::Error> for ProsaicError {
    fn from(err: toml::de::Error) -> Self {
        ProsaicError::Config {
            message: format!("TOML parse error: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for ProsaicError {
    fn from(err: serde_json::Error) -> Self {
        ProsaicError::Validation(format!("JSON serialization error: {}", err))
    }
}
