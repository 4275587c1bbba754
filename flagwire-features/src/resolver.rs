//! Flag resolution.
//!
//! A flag is looked up in four places, and the first one that defines it
//! decides:
//!
//! 1. the request overlay,
//! 2. the environment variable `X_FEATURE_<NAME>` (unset or empty is skipped),
//! 3. the default store,
//! 4. otherwise `false`.
//!
//! ```
//! use flagwire_features::{FlagOverlay, FlagResolver, Source};
//!
//! let resolver = FlagResolver::isolated();
//! resolver.enable("paginate");
//!
//! let overlay = FlagOverlay::new().disable("paginate");
//! let resolution = resolver.resolve(&overlay, "paginate");
//! assert!(!resolution.enabled);
//! assert_eq!(resolution.source, Source::Context);
//! ```

use crate::parse::lenient_bool;
use crate::store::{FlagStore, InMemoryFlagStore, global_store};
use crate::{Flag, FlagOverlay};
use flagwire_config::EnvLoader;
use flagwire_log::trace;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Prefix of the environment variable consulted for each flag.
pub const ENV_PREFIX: &str = "X_FEATURE_";

/// The layer that decided a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Context,
    Environment,
    Store,
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::Context => "context",
            Source::Environment => "environment",
            Source::Store => "store",
            Source::Default => "default",
        })
    }
}

/// Outcome of resolving one flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub flag: Flag,
    pub enabled: bool,
    pub source: Source,
}

/// Resolves flags against an overlay, the environment and a store.
#[derive(Clone)]
pub struct FlagResolver {
    store: Arc<dyn FlagStore>,
    env: EnvLoader,
}

impl FlagResolver {
    pub fn new(store: Arc<dyn FlagStore>) -> Self {
        Self {
            store,
            env: EnvLoader::with_prefix(ENV_PREFIX),
        }
    }

    /// A resolver with its own empty store.
    pub fn isolated() -> Self {
        Self::new(Arc::new(InMemoryFlagStore::new()))
    }

    /// Read environment variables under `prefix` instead of `X_FEATURE_`.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env = EnvLoader::with_prefix(prefix);
        self
    }

    pub fn store(&self) -> &Arc<dyn FlagStore> {
        &self.store
    }

    /// Name of the environment variable consulted for `flag`.
    pub fn env_var_name(&self, flag: impl Into<Flag>) -> String {
        self.env.var_name(&flag.into().env_suffix())
    }

    pub fn resolve(&self, overlay: &FlagOverlay, flag: impl Into<Flag>) -> Resolution {
        let flag = flag.into();

        let (enabled, source) = if let Some(enabled) = overlay.get(&flag) {
            (enabled, Source::Context)
        } else if let Some(raw) = self.env.load_non_empty(&flag.env_suffix()) {
            (lenient_bool(&raw), Source::Environment)
        } else if let Some(enabled) = self.store.get(&flag) {
            (enabled, Source::Store)
        } else {
            (false, Source::Default)
        };

        trace!("feature flag {} resolved to {} from {}", flag, enabled, source);
        Resolution {
            flag,
            enabled,
            source,
        }
    }

    pub fn is_enabled(&self, overlay: &FlagOverlay, flag: impl Into<Flag>) -> bool {
        self.resolve(overlay, flag).enabled
    }

    /// Set the store default for `flag` to `true`.
    pub fn enable(&self, flag: impl Into<Flag>) {
        self.store.set(flag.into(), true);
    }

    /// Set the store default for `flag` to `false`.
    pub fn disable(&self, flag: impl Into<Flag>) {
        self.store.set(flag.into(), false);
    }
}

impl Default for FlagResolver {
    /// Bound to [`global_store`].
    fn default() -> Self {
        Self::new(global_store())
    }
}

impl fmt::Debug for FlagResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagResolver")
            .field("env_prefix", &self.env.prefix())
            .finish_non_exhaustive()
    }
}

static DEFAULT_RESOLVER: Lazy<FlagResolver> = Lazy::new(FlagResolver::default);

/// The resolver behind the module-level functions.
pub fn default_resolver() -> &'static FlagResolver {
    &DEFAULT_RESOLVER
}

/// Resolve `flag` with the default resolver.
pub fn is_enabled(overlay: &FlagOverlay, flag: impl Into<Flag>) -> bool {
    default_resolver().is_enabled(overlay, flag)
}

/// Turn `flag` on in the global store.
///
/// Overlay and environment values still take precedence. Meant for tests and
/// slow-changing opt-in defaults.
pub fn enable(flag: impl Into<Flag>) {
    default_resolver().enable(flag);
}

/// Turn `flag` off in the global store.
pub fn disable(flag: impl Into<Flag>) {
    default_resolver().disable(flag);
}

/// Derive an overlay with `flag` on.
pub fn enable_in_ctx(overlay: &FlagOverlay, flag: impl Into<Flag>) -> FlagOverlay {
    overlay.enable(flag)
}

/// Derive an overlay with `flag` off.
pub fn disable_in_ctx(overlay: &FlagOverlay, flag: impl Into<Flag>) -> FlagOverlay {
    overlay.disable(flag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn unique_flag() -> Flag {
        Flag::new(format!("resolver-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_undefined_flag_is_disabled() {
        let resolver = FlagResolver::isolated();
        let resolution = resolver.resolve(&FlagOverlay::new(), unique_flag());

        assert!(!resolution.enabled);
        assert_eq!(resolution.source, Source::Default);
    }

    #[test]
    fn test_store_value() {
        let resolver = FlagResolver::isolated();
        let flag = unique_flag();

        resolver.enable(&flag);
        assert_eq!(resolver.resolve(&FlagOverlay::new(), &flag).source, Source::Store);
        assert!(resolver.is_enabled(&FlagOverlay::new(), &flag));

        resolver.disable(&flag);
        assert!(!resolver.is_enabled(&FlagOverlay::new(), &flag));
    }

    #[test]
    fn test_context_false_beats_store_true() {
        let resolver = FlagResolver::isolated();
        let flag = unique_flag();
        resolver.enable(&flag);

        let overlay = FlagOverlay::new().disable(&flag);
        let resolution = resolver.resolve(&overlay, &flag);
        assert!(!resolution.enabled);
        assert_eq!(resolution.source, Source::Context);
    }

    #[test]
    fn test_environment_beats_store() {
        let resolver = FlagResolver::isolated().with_env_prefix("FLAGWIRE_UNIT");
        let flag = unique_flag();
        let var = resolver.env_var_name(&flag);
        resolver.enable(&flag);

        unsafe {
            env::set_var(&var, "false");
        }
        let resolution = resolver.resolve(&FlagOverlay::new(), &flag);
        assert!(!resolution.enabled);
        assert_eq!(resolution.source, Source::Environment);

        unsafe {
            env::set_var(&var, "");
        }
        assert_eq!(resolver.resolve(&FlagOverlay::new(), &flag).source, Source::Store);

        unsafe {
            env::remove_var(&var);
        }
    }

    #[test]
    fn test_unparseable_environment_value_is_false() {
        let resolver = FlagResolver::isolated();
        let flag = unique_flag();
        let var = resolver.env_var_name(&flag);
        resolver.enable(&flag);

        unsafe {
            env::set_var(&var, "yes");
        }
        let resolution = resolver.resolve(&FlagOverlay::new(), &flag);
        assert!(!resolution.enabled);
        assert_eq!(resolution.source, Source::Environment);

        unsafe {
            env::remove_var(&var);
        }
    }

    #[test]
    fn test_env_var_name() {
        let resolver = FlagResolver::isolated();
        assert_eq!(resolver.env_var_name("Paginate"), "X_FEATURE_PAGINATE");
    }

    #[test]
    fn test_in_ctx_helpers_do_not_touch_input() {
        let base = FlagOverlay::new();
        let on = enable_in_ctx(&base, "x");
        let off = disable_in_ctx(&on, "x");

        assert!(base.is_empty());
        assert_eq!(on.get(&Flag::new("x")), Some(true));
        assert_eq!(off.get(&Flag::new("x")), Some(false));
    }

    #[test]
    fn test_resolution_serializes() {
        let resolution = Resolution {
            flag: Flag::new("Paginate"),
            enabled: true,
            source: Source::Environment,
        };
        assert_eq!(
            serde_json::to_value(&resolution).unwrap(),
            serde_json::json!({"flag": "paginate", "enabled": true, "source": "environment"})
        );
    }
}
