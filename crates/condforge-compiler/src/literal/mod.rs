//! Literal value resolution.
//!
//! A condition carries its comparison value as a [`RawLiteral`]: text as
//! written by the user, or an already-typed scalar. The [`LiteralResolver`]
//! turns it into a [`Literal`] of the property's declared type exactly once,
//! when the condition is prepared.


use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use condforge_config::LiteralConfig;
use condforge_core::error::Result;
use condforge_core::{
    AnyRef, ConfigurationError, EnumDescriptor, EnumValue, LiteralParser, NumberStyle,
    ParserRegistry, Parsed, Value, ValueType,
};
use tracing::trace;

/// Text that resolves to null for reference types.
pub const NULL_LITERAL: &str = "null";

/// Text that resolves to the string `null` for text properties.
pub const ESCAPED_NULL_LITERAL: &str = "@\"null\"";

/// A literal as supplied by the caller, before resolution.
#[derive(Debug, Clone)]
pub enum RawLiteral {
    /// Text to be parsed against the property type.
    Text(String),
    Null,
    Bool(bool),
    Char(char),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl RawLiteral {
    pub fn is_text(&self) -> bool {
        matches!(self, RawLiteral::Text(_))
    }
}

impl PartialEq for RawLiteral {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RawLiteral::Text(a), RawLiteral::Text(b)) => a == b,
            (RawLiteral::Null, RawLiteral::Null) => true,
            (RawLiteral::Bool(a), RawLiteral::Bool(b)) => a == b,
            (RawLiteral::Char(a), RawLiteral::Char(b)) => a == b,
            (RawLiteral::Int(a), RawLiteral::Int(b)) => a == b,
            (RawLiteral::UInt(a), RawLiteral::UInt(b)) => a == b,
            (RawLiteral::Float(a), RawLiteral::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

// Floats compare by bit pattern so the literal can key a cache.
impl Eq for RawLiteral {}

impl Hash for RawLiteral {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            RawLiteral::Text(s) => s.hash(state),
            RawLiteral::Null => {}
            RawLiteral::Bool(b) => b.hash(state),
            RawLiteral::Char(c) => c.hash(state),
            RawLiteral::Int(v) => v.hash(state),
            RawLiteral::UInt(v) => v.hash(state),
            RawLiteral::Float(v) => v.to_bits().hash(state),
        }
    }
}

impl fmt::Display for RawLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawLiteral::Text(s) => f.write_str(s),
            RawLiteral::Null => f.write_str("null"),
            RawLiteral::Bool(b) => write!(f, "{}", b),
            RawLiteral::Char(c) => write!(f, "{}", c),
            RawLiteral::Int(v) => write!(f, "{}", v),
            RawLiteral::UInt(v) => write!(f, "{}", v),
            RawLiteral::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for RawLiteral {
    fn from(value: &str) -> Self {
        RawLiteral::Text(value.to_string())
    }
}

impl From<String> for RawLiteral {
    fn from(value: String) -> Self {
        RawLiteral::Text(value)
    }
}

impl From<bool> for RawLiteral {
    fn from(value: bool) -> Self {
        RawLiteral::Bool(value)
    }
}

impl From<char> for RawLiteral {
    fn from(value: char) -> Self {
        RawLiteral::Char(value)
    }
}

impl From<i32> for RawLiteral {
    fn from(value: i32) -> Self {
        RawLiteral::Int(value.into())
    }
}

impl From<i64> for RawLiteral {
    fn from(value: i64) -> Self {
        RawLiteral::Int(value)
    }
}

impl From<u32> for RawLiteral {
    fn from(value: u32) -> Self {
        RawLiteral::UInt(value.into())
    }
}

impl From<u64> for RawLiteral {
    fn from(value: u64) -> Self {
        RawLiteral::UInt(value)
    }
}

impl From<f64> for RawLiteral {
    fn from(value: f64) -> Self {
        RawLiteral::Float(value)
    }
}

impl From<&LiteralConfig> for RawLiteral {
    fn from(value: &LiteralConfig) -> Self {
        match value {
            LiteralConfig::Null => RawLiteral::Null,
            LiteralConfig::Bool(b) => RawLiteral::Bool(*b),
            LiteralConfig::Int(v) => RawLiteral::Int(*v),
            LiteralConfig::UInt(v) => RawLiteral::UInt(*v),
            LiteralConfig::Float(v) => RawLiteral::Float(*v),
            LiteralConfig::Text(s) => RawLiteral::Text(s.clone()),
        }
    }
}

/// A compound value parsed once and shared by every evaluation.
#[derive(Clone)]
pub struct Slot {
    value: Arc<dyn Any + Send + Sync>,
    type_name: String,
}

impl Slot {
    pub fn new(value: Arc<dyn Any + Send + Sync>, type_name: impl Into<String>) -> Self {
        Self {
            value,
            type_name: type_name.into(),
        }
    }

    pub fn get(&self) -> AnyRef<'_> {
        &*self.value
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot<{}>", self.type_name)
    }
}

/// A resolved literal.
#[derive(Debug, Clone)]
pub enum Literal {
    /// A scalar embedded in the prepared condition.
    Const(Value<'static>),
    /// A compound value held in a precomputed slot.
    Slot(Slot),
}

impl Literal {
    /// The literal as a comparable value.
    #[inline]
    pub fn value(&self) -> Value<'_> {
        match self {
            Literal::Const(value) => value.borrowed(),
            Literal::Slot(slot) => Value::Custom(slot.get()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Const(Value::Null))
    }

    pub fn is_slot(&self) -> bool {
        matches!(self, Literal::Slot(_))
    }
}

/// Converts raw literals to values of a property's declared type.
#[derive(Debug, Clone)]
pub struct LiteralResolver {
    registry: Arc<ParserRegistry>,
}

impl Default for LiteralResolver {
    fn default() -> Self {
        Self::new(ParserRegistry::with_defaults())
    }
}

impl LiteralResolver {
    pub fn new(registry: ParserRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    /// Resolves `raw` against the `expected` property type.
    ///
    /// Typed literals pass through once they are shown to fit `expected`.
    /// Text literals follow these rules in order:
    ///
    /// 1. `null` on a reference type is the null constant.
    /// 2. Text properties take the text verbatim; `@"null"` is the string
    ///    `null`.
    /// 3. Enumerations match a member name ignoring case, or a numeric
    ///    discriminant naming a member.
    /// 4. Any other type uses its registered parser. Style-aware parsers
    ///    read a `0x` prefix (any case) as hexadecimal. Compound results are
    ///    stored in a [`Slot`].
    pub fn resolve(&self, expected: &ValueType, raw: &RawLiteral) -> Result<Literal> {
        match raw {
            RawLiteral::Text(text) => self.resolve_text(expected, text),
            typed => coerce(expected, typed).map(Literal::Const),
        }
    }

    fn resolve_text(&self, expected: &ValueType, text: &str) -> Result<Literal> {
        if expected.is_reference() && text == NULL_LITERAL {
            return Ok(Literal::Const(Value::Null));
        }

        match expected {
            ValueType::Text => {
                let text = if text == ESCAPED_NULL_LITERAL {
                    NULL_LITERAL
                } else {
                    text
                };
                Ok(Literal::Const(Value::Text(Cow::Owned(text.to_string()))))
            }
            ValueType::Enum(descriptor) => resolve_enum(*descriptor, text.trim()),
            _ => self.parse(expected, text.trim()),
        }
    }

    fn parse(&self, expected: &ValueType, text: &str) -> Result<Literal> {
        let parser = expected
            .type_id()
            .and_then(|id| self.registry.get(id))
            .ok_or_else(|| ConfigurationError::NoParser {
                literal: text.to_string(),
                ty: expected.to_string(),
            })?;

        let parsed = match parser {
            LiteralParser::Styled(parse) => {
                let (digits, style) = split_number_style(text);
                parse(digits, style)
            }
            LiteralParser::Plain(parse) => parse(text),
        }
        .map_err(|reason| ConfigurationError::Conversion {
            literal: text.to_string(),
            ty: expected.to_string(),
            reason,
        })?;

        match parsed {
            Parsed::Scalar(value) => coerce_scalar(expected, value, text).map(Literal::Const),
            Parsed::Compound(value) => {
                let value_type_id = (*value).type_id();
                if expected.type_id() != Some(value_type_id) {
                    return Err(ConfigurationError::LiteralMismatch {
                        literal: text.to_string(),
                        ty: expected.to_string(),
                    });
                }
                trace!(event = "slot_created", ty = %expected, literal = text);
                Ok(Literal::Slot(Slot::new(value, expected.to_string())))
            }
        }
    }
}

/// Splits an optional `0x` prefix, which selects hexadecimal notation.
fn split_number_style(text: &str) -> (&str, NumberStyle) {
    match text.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("0x") => (&text[2..], NumberStyle::Hex),
        _ => (text, NumberStyle::Integer),
    }
}

fn resolve_enum(descriptor: &'static EnumDescriptor, text: &str) -> Result<Literal> {
    let discriminant = descriptor.member_by_name(text).or_else(|| {
        text.parse::<i64>()
            .ok()
            .filter(|d| descriptor.member_name(*d).is_some())
    });

    match discriminant {
        Some(d) => Ok(Literal::Const(Value::Enum(EnumValue::new(descriptor, d)))),
        None => Err(ConfigurationError::UnknownEnumMember {
            literal: text.to_string(),
            ty: descriptor.name().to_string(),
        }),
    }
}

/// Checks a parser's scalar output against the declared type.
fn coerce_scalar(expected: &ValueType, value: Value<'static>, text: &str) -> Result<Value<'static>> {
    let fits = match (&value, expected) {
        (Value::Custom(_) | Value::Object(_), _) => false,
        (_, ValueType::Custom(_) | ValueType::Object(_)) => false,
        _ => true,
    };
    if fits {
        Ok(value)
    } else {
        Err(ConfigurationError::LiteralMismatch {
            literal: text.to_string(),
            ty: expected.to_string(),
        })
    }
}

/// Converts an already-typed literal to the representation of `expected`.
fn coerce(expected: &ValueType, raw: &RawLiteral) -> Result<Value<'static>> {
    let value = match (raw, expected) {
        (RawLiteral::Null, ty) if ty.is_reference() => Some(Value::Null),
        (RawLiteral::Bool(b), ValueType::Bool) => Some(Value::Bool(*b)),
        (RawLiteral::Char(c), ValueType::Char) => Some(Value::Char(*c)),
        (RawLiteral::Int(v), ty) => coerce_signed(ty, *v),
        (RawLiteral::UInt(v), ty) => coerce_unsigned(ty, *v),
        (RawLiteral::Float(v), ValueType::F32) => Some(Value::Float(f64::from(*v as f32))),
        (RawLiteral::Float(v), ValueType::F64) => Some(Value::Float(*v)),
        _ => None,
    };

    value.ok_or_else(|| ConfigurationError::LiteralMismatch {
        literal: raw.to_string(),
        ty: expected.to_string(),
    })
}

fn coerce_signed(expected: &ValueType, v: i64) -> Option<Value<'static>> {
    if let Some((min, max)) = expected.signed_range() {
        return (min..=max).contains(&v).then_some(Value::Int(v));
    }
    if let Some(max) = expected.unsigned_max() {
        return u64::try_from(v)
            .ok()
            .filter(|u| *u <= max)
            .map(Value::UInt);
    }
    match expected {
        ValueType::F32 => Some(Value::Float(f64::from(v as f32))),
        ValueType::F64 => Some(Value::Float(v as f64)),
        ValueType::Enum(descriptor) => descriptor
            .member_name(v)
            .map(|_| Value::Enum(EnumValue::new(*descriptor, v))),
        _ => None,
    }
}

fn coerce_unsigned(expected: &ValueType, v: u64) -> Option<Value<'static>> {
    match i64::try_from(v) {
        Ok(signed) if expected.signed_range().is_some() || matches!(expected, ValueType::Enum(_)) => {
            coerce_signed(expected, signed)
        }
        _ => match expected.unsigned_max() {
            Some(max) => (v <= max).then_some(Value::UInt(v)),
            None => match expected {
                ValueType::F32 => Some(Value::Float(f64::from(v as f32))),
                ValueType::F64 => Some(Value::Float(v as f64)),
                _ => None,
            },
        },
    }
}
