//! Typed, request-scoped extension values.
//!
//! Each request carries an [`Extensions`] map keyed by `TypeId`. Layers such as
//! the feature flag extractor store a typed value here (for example a flag
//! overlay) and handlers read it back by type, with no string keys involved.
//!
//! Values are held behind `Arc`, so cloning a request clones pointers rather
//! than the values themselves. Replacing a value in a cloned map never affects
//! the map it was cloned from.
//!
//! ```rust
//! use flagwire_core::Extensions;
//!
//! #[derive(Debug, PartialEq)]
//! struct TenantId(u32);
//!
//! let mut ext = Extensions::new();
//! ext.insert(TenantId(7));
//!
//! assert_eq!(ext.get::<TenantId>(), Some(&TenantId(7)));
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Type-keyed map of shared values.
#[derive(Clone, Default)]
pub struct Extensions {
    map: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Extensions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value`, replacing any previous value of the same type.
    #[inline]
    pub fn insert<T: Send + Sync + 'static>(&mut self, value: T) {
        self.map.insert(TypeId::of::<T>(), Arc::new(value));
    }

    /// Borrow the value of type `T`, if one was stored.
    #[inline]
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Clone the value of type `T` out of the map.
    #[inline]
    pub fn get_cloned<T: Clone + Send + Sync + 'static>(&self) -> Option<T> {
        self.get::<T>().cloned()
    }

    #[inline]
    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.map.contains_key(&TypeId::of::<T>())
    }

    /// Drop the value of type `T`. Returns whether one was present.
    #[inline]
    pub fn remove<T: Send + Sync + 'static>(&mut self) -> bool {
        self.map.remove(&TypeId::of::<T>()).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl std::fmt::Debug for Extensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extensions")
            .field("count", &self.map.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Marker(&'static str);

    #[test]
    fn test_insert_and_get_by_type() {
        let mut ext = Extensions::new();
        ext.insert(Marker("a"));
        ext.insert(5u8);

        assert_eq!(ext.get::<Marker>(), Some(&Marker("a")));
        assert_eq!(ext.get::<u8>(), Some(&5));
        assert_eq!(ext.get::<u16>(), None);
        assert_eq!(ext.len(), 2);
    }

    #[test]
    fn test_insert_replaces_same_type() {
        let mut ext = Extensions::new();
        ext.insert(Marker("first"));
        ext.insert(Marker("second"));

        assert_eq!(ext.get_cloned::<Marker>(), Some(Marker("second")));
        assert_eq!(ext.len(), 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = Extensions::new();
        original.insert(Marker("original"));

        let mut copy = original.clone();
        copy.insert(Marker("copy"));

        assert_eq!(original.get::<Marker>(), Some(&Marker("original")));
        assert_eq!(copy.get::<Marker>(), Some(&Marker("copy")));
    }

    #[test]
    fn test_remove() {
        let mut ext = Extensions::new();
        assert!(!ext.remove::<Marker>());

        ext.insert(Marker("x"));
        assert!(ext.contains::<Marker>());
        assert!(ext.remove::<Marker>());
        assert!(ext.is_empty());
    }
}
