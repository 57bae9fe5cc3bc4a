use std::any::Any;
use std::fmt;

use super::{compose, PreparedCondition};

/// Tests whether the candidate was narrowed to the target type.
///
/// Place [`TypeCondition::DEFAULT`] first in a condition list to stop
/// evaluation before any property is read from a candidate of another type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TypeCondition {
    not: bool,
}

impl TypeCondition {
    /// The shared, un-negated type condition.
    pub const DEFAULT: TypeCondition = TypeCondition { not: false };

    pub const fn new(not: bool) -> Self {
        Self { not }
    }

    pub fn is_negated(&self) -> bool {
        self.not
    }

    pub fn prepare(&self) -> PreparedCondition {
        let not = self.not;
        PreparedCondition::new(self.to_string(), move |narrowed: Option<&dyn Any>| {
            compose(not, false, narrowed.is_some())
        })
    }
}

impl fmt::Display for TypeCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.not {
            f.write_str("not ")?;
        }
        f.write_str("is target type")
    }
}
