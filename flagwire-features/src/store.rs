//! Default flag state.
//!
//! A [`FlagStore`] holds the value a flag falls back to when neither the
//! request overlay nor the environment defines it. The process-wide store
//! returned by [`global_store`] backs the module-level `enable`/`disable`
//! functions; tests and embedders that want isolation build their own
//! [`InMemoryFlagStore`] and hand it to a [`FlagResolver`](crate::FlagResolver).

use crate::Flag;
use flagwire_log::debug;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Get/set access to default flag values.
pub trait FlagStore: Send + Sync {
    /// The stored value, or `None` when the flag has never been set.
    fn get(&self, flag: &Flag) -> Option<bool>;

    /// Create or overwrite the value for `flag`.
    fn set(&self, flag: Flag, enabled: bool);
}

/// Lock-guarded map of flag defaults.
#[derive(Debug, Default)]
pub struct InMemoryFlagStore {
    flags: RwLock<HashMap<Flag, bool>>,
}

impl InMemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `defaults`.
    pub fn from_defaults<I, K>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<Flag>,
    {
        let flags = defaults
            .into_iter()
            .map(|(name, enabled)| (name.into(), enabled))
            .collect();
        Self {
            flags: RwLock::new(flags),
        }
    }

    /// Sorted copy of the current entries.
    pub fn snapshot(&self) -> BTreeMap<Flag, bool> {
        self.flags
            .read()
            .iter()
            .map(|(flag, enabled)| (flag.clone(), *enabled))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.flags.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.read().is_empty()
    }
}

impl FlagStore for InMemoryFlagStore {
    fn get(&self, flag: &Flag) -> Option<bool> {
        self.flags.read().get(flag).copied()
    }

    fn set(&self, flag: Flag, enabled: bool) {
        debug!("feature flag {} default set to {}", flag, enabled);
        self.flags.write().insert(flag, enabled);
    }
}

static GLOBAL_STORE: Lazy<Arc<InMemoryFlagStore>> = Lazy::new(|| Arc::new(InMemoryFlagStore::new()));

/// The process-wide store, empty at startup.
pub fn global_store() -> Arc<InMemoryFlagStore> {
    GLOBAL_STORE.clone()
}
