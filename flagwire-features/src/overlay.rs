//! Request-scoped flag values.
//!
//! A [`FlagOverlay`] is an immutable chain of `(flag, enabled)` links. Adding a
//! value returns a new overlay whose head points at the old chain, so every
//! existing holder keeps seeing exactly what it saw before. Clones share the
//! chain through `Arc` and cost one pointer copy.
//!
//! ```
//! use flagwire_features::{Flag, FlagOverlay};
//!
//! let base = FlagOverlay::new().enable("paginate");
//! let derived = base.disable("paginate");
//!
//! assert_eq!(base.get(&Flag::new("paginate")), Some(true));
//! assert_eq!(derived.get(&Flag::new("paginate")), Some(false));
//! ```

use crate::Flag;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

struct Link {
    flag: Flag,
    enabled: bool,
    parent: Option<Arc<Link>>,
}

/// Immutable, chainable set of flag values.
#[derive(Clone, Default)]
pub struct FlagOverlay {
    head: Option<Arc<Link>>,
}

impl FlagOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive an overlay that records `enabled` for `flag`.
    ///
    /// `self` is left as it was.
    #[must_use]
    pub fn with(&self, flag: impl Into<Flag>, enabled: bool) -> Self {
        Self {
            head: Some(Arc::new(Link {
                flag: flag.into(),
                enabled,
                parent: self.head.clone(),
            })),
        }
    }

    #[must_use]
    pub fn enable(&self, flag: impl Into<Flag>) -> Self {
        self.with(flag, true)
    }

    #[must_use]
    pub fn disable(&self, flag: impl Into<Flag>) -> Self {
        self.with(flag, false)
    }

    /// The most recently recorded value for `flag`.
    pub fn get(&self, flag: &Flag) -> Option<bool> {
        self.links()
            .find(|link| &link.flag == flag)
            .map(|link| link.enabled)
    }

    pub fn contains(&self, flag: &Flag) -> bool {
        self.get(flag).is_some()
    }

    /// Every recorded value, newest first, shadowed ones included.
    pub fn iter(&self) -> impl Iterator<Item = (&Flag, bool)> {
        self.links().map(|link| (&link.flag, link.enabled))
    }

    /// The value each flag currently resolves to within this overlay.
    pub fn effective(&self) -> BTreeMap<Flag, bool> {
        let mut values = BTreeMap::new();
        for (flag, enabled) in self.iter() {
            values.entry(flag.clone()).or_insert(enabled);
        }
        values
    }

    /// Number of links in the chain.
    pub fn depth(&self) -> usize {
        self.links().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn links(&self) -> impl Iterator<Item = &Link> {
        std::iter::successors(self.head.as_deref(), |link| link.parent.as_deref())
    }
}

// Unlink iteratively so dropping a long chain does not recurse once per link.
impl Drop for FlagOverlay {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(link) = next {
            match Arc::try_unwrap(link) {
                Ok(mut link) => next = link.parent.take(),
                Err(_) => break,
            }
        }
    }
}

impl fmt::Debug for FlagOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.effective()).finish()
    }
}
