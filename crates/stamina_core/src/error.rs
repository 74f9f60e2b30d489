use thiserror::Error;

/// Errors from the ambient layer (parameter files, scenario construction).
///
/// The simulation itself never fails: abnormal numbers are clamped and
/// non-termination is reported through `ScenarioResult::finished`.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid parameter `{key}`: {reason}")]
    InvalidParameter { key: String, reason: String },

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported parameter file format: {0}")]
    UnsupportedFormat(String),
}

impl CoreError {
    pub fn invalid_parameter(key: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidParameter { key: key.into(), reason: reason.into() }
    }

    /// Whether a caller (e.g. a search driver) can fix the input and retry.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CoreError::InvalidParameter { .. } => true,
            CoreError::InvalidScenario(_) => true,
            CoreError::Io(_) => true,
            CoreError::UnsupportedFormat(_) => true,
            CoreError::Json(_) | CoreError::Yaml(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
