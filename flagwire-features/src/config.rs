//! Feature flag configuration.
//!
//! Prefixes and store defaults can come from a JSON or TOML file:
//!
//! ```toml
//! query_prefix = "feature-"
//! header_prefix = "x-feature-"
//! env_prefix = "X_FEATURE"
//!
//! [defaults]
//! paginate = true
//! ```
//!
//! or from `FLAGWIRE_QUERY_PREFIX`, `FLAGWIRE_HEADER_PREFIX` and
//! `FLAGWIRE_ENV_PREFIX`. Missing fields keep their defaults.

use crate::error::Result;
use crate::extract::{HEADER_PREFIX, QUERY_PREFIX};
use crate::resolver::ENV_PREFIX;
use crate::store::{FlagStore, InMemoryFlagStore};
use crate::{Flag, FlagExtractor, FlagResolver};
use flagwire_config::{ConfigLoader, ConfigValidator, EnvLoader, Validate};
use flagwire_log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub query_prefix: String,
    pub header_prefix: String,
    /// Environment prefix; the `_` separator before the flag name is implied.
    pub env_prefix: String,
    /// Store defaults, applied below overlay and environment values.
    pub defaults: BTreeMap<String, bool>,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            query_prefix: QUERY_PREFIX.to_string(),
            header_prefix: HEADER_PREFIX.to_string(),
            env_prefix: ENV_PREFIX.strip_suffix('_').unwrap_or(ENV_PREFIX).to_string(),
            defaults: BTreeMap::new(),
        }
    }
}

impl FeatureConfig {
    /// Load and validate a `.json` or `.toml` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: Self = ConfigLoader::auto(path)?.load_as(path)?;
        config.validate()?;
        info!(
            "Loaded feature configuration from {} ({} default(s))",
            path.display(),
            config.defaults.len()
        );
        Ok(config)
    }

    /// Override the prefixes from `FLAGWIRE_*` variables, then validate.
    pub fn from_env() -> Result<Self> {
        let env = EnvLoader::with_prefix("FLAGWIRE");
        let defaults = Self::default();
        let config = Self {
            query_prefix: env.load_var_or("query_prefix", &defaults.query_prefix),
            header_prefix: env.load_var_or("header_prefix", &defaults.header_prefix),
            env_prefix: env.load_var_or("env_prefix", &defaults.env_prefix),
            defaults: defaults.defaults,
        };
        config.validate()?;
        Ok(config)
    }

    /// Write `defaults` into `store`.
    pub fn seed(&self, store: &dyn FlagStore) {
        for (name, enabled) in &self.defaults {
            store.set(Flag::new(name), *enabled);
        }
    }

    /// A resolver with an isolated store seeded from `defaults`.
    pub fn resolver(&self) -> FlagResolver {
        let store = InMemoryFlagStore::from_defaults(
            self.defaults.iter().map(|(name, enabled)| (name, *enabled)),
        );
        FlagResolver::new(Arc::new(store)).with_env_prefix(self.env_prefix.clone())
    }

    pub fn extractor(&self) -> FlagExtractor {
        FlagExtractor::new(self.query_prefix.clone(), self.header_prefix.clone())
    }
}

impl Validate for FeatureConfig {
    fn validate(&self) -> flagwire_config::Result<()> {
        ConfigValidator::not_empty(&self.query_prefix, "query_prefix")?;
        ConfigValidator::is_header_token(&self.query_prefix, "query_prefix")?;
        ConfigValidator::not_empty(&self.header_prefix, "header_prefix")?;
        ConfigValidator::is_header_token(&self.header_prefix, "header_prefix")?;
        ConfigValidator::not_empty(&self.env_prefix, "env_prefix")?;
        ConfigValidator::is_env_name(&self.env_prefix, "env_prefix")?;
        Ok(())
    }
}
