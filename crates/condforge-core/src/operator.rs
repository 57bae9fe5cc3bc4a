//! Operator tags for string and comparison conditions.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// Operators understood by string conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringOperator {
    Equal,
    NotEqual,
    Contains,
    StartsWith,
    EndsWith,
}

impl StringOperator {
    pub const ALL: [StringOperator; 5] = [
        StringOperator::Equal,
        StringOperator::NotEqual,
        StringOperator::Contains,
        StringOperator::StartsWith,
        StringOperator::EndsWith,
    ];

    /// Returns true for the operators that test a substring.
    pub fn is_substring(self) -> bool {
        matches!(
            self,
            StringOperator::Contains | StringOperator::StartsWith | StringOperator::EndsWith
        )
    }
}

impl FromStr for StringOperator {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "==" | "=" | "eq" | "equal" | "equals" => Ok(StringOperator::Equal),
            "!=" | "ne" | "not_equal" | "not_equals" => Ok(StringOperator::NotEqual),
            "~" | "contains" => Ok(StringOperator::Contains),
            "starts_with" | "startswith" => Ok(StringOperator::StartsWith),
            "ends_with" | "endswith" => Ok(StringOperator::EndsWith),
            _ => Err(ConfigurationError::UnknownOperator(s.to_string())),
        }
    }
}

impl fmt::Display for StringOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StringOperator::Equal => "==",
            StringOperator::NotEqual => "!=",
            StringOperator::Contains => "contains",
            StringOperator::StartsWith => "starts_with",
            StringOperator::EndsWith => "ends_with",
        };
        f.write_str(name)
    }
}

/// Operators understood by comparison conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Lesser,
    LesserEqual,
}

impl ComparisonOperator {
    pub const ALL: [ComparisonOperator; 6] = [
        ComparisonOperator::Equal,
        ComparisonOperator::NotEqual,
        ComparisonOperator::Greater,
        ComparisonOperator::GreaterEqual,
        ComparisonOperator::Lesser,
        ComparisonOperator::LesserEqual,
    ];

    /// Returns true for operators that need an ordering-capable type.
    pub fn is_relational(self) -> bool {
        !matches!(self, ComparisonOperator::Equal | ComparisonOperator::NotEqual)
    }
}

impl FromStr for ComparisonOperator {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "==" | "=" | "eq" | "equal" | "equals" => Ok(ComparisonOperator::Equal),
            "!=" | "ne" | "not_equal" | "not_equals" => Ok(ComparisonOperator::NotEqual),
            ">" | "gt" | "greater" => Ok(ComparisonOperator::Greater),
            ">=" | "gte" | "greater_equal" => Ok(ComparisonOperator::GreaterEqual),
            "<" | "lt" | "lesser" | "less" => Ok(ComparisonOperator::Lesser),
            "<=" | "lte" | "lesser_equal" | "less_equal" => Ok(ComparisonOperator::LesserEqual),
            _ => Err(ConfigurationError::UnknownOperator(s.to_string())),
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            ComparisonOperator::Equal => "==",
            ComparisonOperator::NotEqual => "!=",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::GreaterEqual => ">=",
            ComparisonOperator::Lesser => "<",
            ComparisonOperator::LesserEqual => "<=",
        };
        f.write_str(symbol)
    }
}
