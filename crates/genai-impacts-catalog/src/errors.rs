use thiserror::Error;

/// Error type for loading and querying catalogues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Failed to read '{path}': {reason}")]
    Io { path: String, reason: String },
    #[error("Invalid catalogue document: {0}")]
    Json(String),
    #[error("Invalid throughput {value} for {context}: throughput must be positive")]
    InvalidThroughput { context: String, value: f64 },
    #[error("Invalid model '{model}': {reason}")]
    InvalidModel { model: String, reason: String },
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

impl CatalogError {
    pub(crate) fn io(path: &std::path::Path, e: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    }
}

/// Convenience type for `Result<T, CatalogError>`.
pub type CatalogResult<T> = Result<T, CatalogError>;
