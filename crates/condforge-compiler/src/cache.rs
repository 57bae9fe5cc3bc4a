//! Content-keyed cache of compiled predicates.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::trace;

use condforge_core::error::Result;
use condforge_core::TypeDescriptor;

use crate::compiler::PredicateCompiler;
use crate::condition::Condition;
use crate::predicate::CompiledPredicate;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    target: TypeId,
    conditions: Vec<Condition>,
}

/// Shares one [`CompiledPredicate`] per distinct condition list.
///
/// Lists are identified by their content, so two equal lists built
/// independently map to the same predicate. Compilation runs outside the
/// lock; failures are returned to the caller and never stored.
#[derive(Debug, Default)]
pub struct PredicateCache {
    compiler: PredicateCompiler,
    entries: RwLock<HashMap<CacheKey, Arc<CompiledPredicate>>>,
}

impl PredicateCache {
    pub fn new(compiler: PredicateCompiler) -> Self {
        Self {
            compiler,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn compiler(&self) -> &PredicateCompiler {
        &self.compiler
    }

    /// Returns the cached predicate for the list, compiling it on first use.
    pub fn get_or_compile(
        &self,
        target: &'static TypeDescriptor,
        conditions: &[Condition],
    ) -> Result<Arc<CompiledPredicate>> {
        let key = CacheKey {
            target: target.type_id(),
            conditions: conditions.to_vec(),
        };

        if let Some(predicate) = self.read().get(&key) {
            trace!(event = "cache_hit", target_type = target.name());
            return Ok(Arc::clone(predicate));
        }

        trace!(event = "cache_miss", target_type = target.name());
        let compiled = Arc::new(self.compiler.compile(target, conditions)?);

        // A concurrent miss may have inserted first; all callers share that entry.
        let mut entries = self.write();
        Ok(Arc::clone(entries.entry(key).or_insert(compiled)))
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<CacheKey, Arc<CompiledPredicate>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<CacheKey, Arc<CompiledPredicate>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
