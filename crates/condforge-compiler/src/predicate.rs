//! The compiled predicate artifact.

use std::any::Any;
use std::fmt;

use rayon::prelude::*;
use smallvec::SmallVec;

use condforge_core::TypeDescriptor;

use crate::condition::PreparedCondition;

pub(crate) type PreparedConditions = SmallVec<[PreparedCondition; 4]>;

/// A reusable, immutable evaluator over candidates of one target type.
///
/// `CompiledPredicate` is `Send + Sync`; [`verify`](Self::verify) holds no
/// state between calls and may be invoked from many threads at once.
pub struct CompiledPredicate {
    target: &'static TypeDescriptor,
    conditions: PreparedConditions,
}

impl CompiledPredicate {
    pub(crate) fn new(target: &'static TypeDescriptor, conditions: PreparedConditions) -> Self {
        Self { target, conditions }
    }

    /// Tests a candidate.
    ///
    /// The candidate is narrowed to the target type, then the conditions are
    /// evaluated in order until one is false. An empty predicate accepts
    /// every candidate.
    #[inline]
    pub fn verify(&self, candidate: &dyn Any) -> bool {
        let narrowed = self.target.narrow(candidate);
        self.conditions.iter().all(|c| c.evaluate(narrowed))
    }

    /// Returns the candidates accepted by [`verify`](Self::verify), in order.
    pub fn select<'a, T: Any>(&self, candidates: &'a [T]) -> Vec<&'a T> {
        candidates.iter().filter(|c| self.verify(*c)).collect()
    }

    /// Parallel [`select`](Self::select); preserves candidate order.
    pub fn par_select<'a, T: Any + Sync>(&self, candidates: &'a [T]) -> Vec<&'a T> {
        candidates.par_iter().filter(|c| self.verify(*c)).collect()
    }

    pub fn target(&self) -> &'static TypeDescriptor {
        self.target
    }

    pub fn conditions(&self) -> &[PreparedCondition] {
        &self.conditions
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl fmt::Debug for CompiledPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPredicate")
            .field("target", &self.target.name())
            .field("conditions", &self.conditions)
            .finish()
    }
}

impl fmt::Display for CompiledPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} where ", self.target.name())?;
        if self.conditions.is_empty() {
            return f.write_str("true");
        }
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(" and ")?;
            }
            f.write_str(condition.label())?;
        }
        Ok(())
    }
}
