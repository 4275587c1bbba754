// Environment variable loading

use crate::{ConfigError, Result};
use flagwire_log::debug;
use std::env;
use std::path::Path;

/// Reads variables named `<PREFIX>_<KEY>`, with the key upper-cased.
///
/// Lookups go to the live process environment every time; nothing is cached.
#[derive(Debug, Clone, Default)]
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    /// A trailing `_` on the prefix is optional: `X_FEATURE` and `X_FEATURE_`
    /// both produce `X_FEATURE_PAGINATE` for the key `paginate`. Only one
    /// separator is stripped, so `APP__` keeps a double underscore.
    pub fn new(prefix: Option<String>) -> Self {
        let prefix = prefix
            .map(|p| p.strip_suffix('_').map(str::to_string).unwrap_or(p))
            .filter(|p| !p.is_empty());
        Self { prefix }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::new(Some(prefix.into()))
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Full variable name for `key`.
    pub fn var_name(&self, key: &str) -> String {
        match self.prefix {
            Some(ref prefix) => format!("{}_{}", prefix, upper_case_name(key)),
            None => upper_case_name(key),
        }
    }

    /// Load a variable, treating unset and empty the same way.
    ///
    /// Values that are not valid unicode are returned lossily rather than
    /// dropped, so they still count as set.
    pub fn load_non_empty(&self, key: &str) -> Option<String> {
        env::var_os(self.var_name(key))
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string_lossy().into_owned())
    }

    /// Load with default value
    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_non_empty(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Load a `.env` file into the process environment.
    ///
    /// Without a path, a `.env` in the working directory (or a parent) is used
    /// when present and silently skipped otherwise. Variables already set in
    /// the environment are not overwritten.
    pub fn load_dotenv(path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
                debug!("Loaded environment file {}", path.display());
            }
            None => {
                if let Ok(found) = dotenvy::dotenv() {
                    debug!("Loaded environment file {}", found.display());
                }
            }
        }
        Ok(())
    }
}

/// Upper-case a variable name one character at a time.
///
/// A character whose upper case is longer than one character is kept as is,
/// so `straße` becomes `STRAßE` rather than `STRASSE`.
pub fn upper_case_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => c,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_name_with_prefix() {
        let loader = EnvLoader::with_prefix("X_FEATURE");
        assert_eq!(loader.var_name("paginate"), "X_FEATURE_PAGINATE");
    }

    #[test]
    fn test_trailing_underscore_is_optional() {
        let loader = EnvLoader::with_prefix("X_FEATURE_");
        assert_eq!(loader.prefix(), Some("X_FEATURE"));
        assert_eq!(loader.var_name("Dark-Mode"), "X_FEATURE_DARK-MODE");
    }

    #[test]
    fn test_only_one_trailing_underscore_is_stripped() {
        let loader = EnvLoader::with_prefix("APP__");
        assert_eq!(loader.prefix(), Some("APP_"));
        assert_eq!(loader.var_name("beta"), "APP__BETA");
    }

    #[test]
    fn test_var_name_keeps_multi_char_upper_case() {
        assert_eq!(upper_case_name("straße"), "STRAßE");
        assert_eq!(upper_case_name("dark-mode"), "DARK-MODE");

        let loader = EnvLoader::with_prefix("X_FEATURE");
        assert_eq!(loader.var_name("straße"), "X_FEATURE_STRAßE");
    }

    #[test]
    fn test_var_name_without_prefix() {
        let loader = EnvLoader::default();
        assert_eq!(loader.var_name("path"), "PATH");
        assert_eq!(EnvLoader::new(Some(String::new())).prefix(), None);
    }

    #[test]
    fn test_missing_var() {
        let loader = EnvLoader::with_prefix("FLAGWIRE_TEST");
        assert_eq!(loader.load_non_empty("MISSING_VAR_67890"), None);
        assert_eq!(loader.load_var_or("MISSING_VAR_67890", "fallback"), "fallback");
    }
}
