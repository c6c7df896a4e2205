use thiserror::Error;

use super::schema::SchemaError;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Schema validation failed: {0}")]
    Schema(#[from] SchemaError),

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The structured schema error, when this is a validation failure
    pub fn as_schema_error(&self) -> Option<&SchemaError> {
        match self {
            Self::Schema(error) => Some(error),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(error.to_string())
    }
}

impl From<config::ConfigError> for DomainError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}
