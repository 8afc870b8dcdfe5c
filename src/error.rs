use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// A raw record could not be coerced into a work order
    #[error("Normalization failure: {0}")]
    NormalizationFailure(String),

    /// Lookup by id with no match
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unparsable status/priority value during strict import
    #[error("Invalid {field} value: {value:?}")]
    InvalidEnumValue { field: &'static str, value: String },

    /// Discoverer call failed
    #[error("Discovery failure ({discoverer}): {message}")]
    DiscoveryFailure { discoverer: String, message: String },

    /// Malformed export/import document
    #[error("Serialization failure: {0}")]
    SerializationFailure(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Build a discovery failure for the named discoverer
    pub fn discovery(discoverer: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::DiscoveryFailure {
            discoverer: discoverer.into(),
            message: message.into(),
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            AppError::NormalizationFailure(_) => "NORMALIZATION_FAILURE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidEnumValue { .. } => "INVALID_ENUM_VALUE",
            AppError::DiscoveryFailure { .. } => "DISCOVERY_FAILURE",
            AppError::SerializationFailure(_) => "SERIALIZATION_FAILURE",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Io(_) => "IO_ERROR",
        }
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationFailure(err.to_string())
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
