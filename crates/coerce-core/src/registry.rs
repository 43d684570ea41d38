//! Converter override table
//!
//! Overrides are keyed by the descriptor of the requested result type and
//! replace standard dispatch entirely for that type. Lookups share a read
//! lock; registration takes the write lock. A poisoned lock is recovered
//! rather than propagated, since the map is never left half-written.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use coerce_core_types::TypeDescriptor;

use crate::errors::Result;
use crate::model::DynamicValue;

/// An installed override
pub type ConvertFn = dyn Fn(&DynamicValue) -> Result<DynamicValue> + Send + Sync;

/// Override table guarded by a single read/write lock
#[derive(Default)]
pub struct ConverterRegistry {
    overrides: RwLock<HashMap<TypeDescriptor, Arc<ConvertFn>>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace the override for `descriptor`
    ///
    /// Returns `true` when an earlier override was replaced.
    pub fn insert(&self, descriptor: TypeDescriptor, convert: Arc<ConvertFn>) -> bool {
        self.overrides
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(descriptor, convert)
            .is_some()
    }

    /// Override for `descriptor`, if any
    ///
    /// The lock is released before the caller runs the override, so an
    /// override may itself convert through the same registry.
    pub fn lookup(&self, descriptor: &TypeDescriptor) -> Option<Arc<ConvertFn>> {
        self.overrides
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(descriptor)
            .cloned()
    }

    pub fn contains(&self, descriptor: &TypeDescriptor) -> bool {
        self.overrides
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(descriptor)
    }

    pub fn len(&self) -> usize {
        self.overrides
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.overrides.read().unwrap_or_else(PoisonError::into_inner);
        let mut descriptors: Vec<String> = guard.keys().map(ToString::to_string).collect();
        descriptors.sort();
        f.debug_struct("ConverterRegistry")
            .field("overrides", &descriptors)
            .finish()
    }
}
