// Configuration validation

use crate::{ConfigError, Result};

/// Implemented by configuration structs that check themselves after loading
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Field-level validation rules
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        Ok(())
    }

    /// Lower-case ASCII letters, digits, `-` and `_`, the characters safe to
    /// match against both query keys and lower-cased header names.
    pub fn is_header_token(value: &str, field: &str) -> Result<()> {
        let valid = value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        if !valid {
            return Err(ConfigError::ValidationError(format!(
                "{} must contain only lower-case letters, digits, '-' or '_': {:?}",
                field, value
            )));
        }
        Ok(())
    }

    /// Upper-case ASCII letters, digits and `_`.
    pub fn is_env_name(value: &str, field: &str) -> Result<()> {
        let valid = value
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
        if !valid {
            return Err(ConfigError::ValidationError(format!(
                "{} must contain only upper-case letters, digits or '_': {:?}",
                field, value
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty_validation() {
        assert!(ConfigValidator::not_empty("value", "field").is_ok());
        assert!(ConfigValidator::not_empty("", "field").is_err());
    }

    #[test]
    fn test_header_token_validation() {
        assert!(ConfigValidator::is_header_token("x-feature-", "field").is_ok());
        assert!(ConfigValidator::is_header_token("X-Feature-", "field").is_err());
        assert!(ConfigValidator::is_header_token("x feature", "field").is_err());
    }

    #[test]
    fn test_env_name_validation() {
        assert!(ConfigValidator::is_env_name("X_FEATURE", "field").is_ok());
        assert!(ConfigValidator::is_env_name("x_feature", "field").is_err());
        assert!(ConfigValidator::is_env_name("X-FEATURE", "field").is_err());
    }
}
