//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The underlying configuration source failed to load or deserialize.
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A loaded value failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A specific configuration value is invalid.
#[derive(Debug, Error)]
#[error("Invalid configuration: {field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_the_field() {
        let err = ValidationError::new("gateway.key_id", "must not be empty");
        assert!(err.to_string().contains("gateway.key_id"));
        assert!(err.to_string().contains("must not be empty"));
    }
}
