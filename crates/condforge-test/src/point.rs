//! Compound value fixture.

use std::fmt;
use std::str::FromStr;

use condforge_core::impl_custom_property;

/// A map location. Equality only; points have no ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point3D {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point3D {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl_custom_property!(Point3D);

/// Error returned when a point literal is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePointError(String);

impl fmt::Display for ParsePointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected (x, y, z), got \"{}\"", self.0)
    }
}

impl std::error::Error for ParsePointError {}

impl FromStr for Point3D {
    type Err = ParsePointError;

    /// Parses `(x, y, z)`; the parentheses are optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')');
        let coords: Vec<i32> = inner
            .split(',')
            .map(|part| part.trim().parse::<i32>())
            .collect::<Result<_, _>>()
            .map_err(|_| ParsePointError(s.to_string()))?;

        match coords.as_slice() {
            [x, y, z] => Ok(Point3D::new(*x, *y, *z)),
            _ => Err(ParsePointError(s.to_string())),
        }
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
