//! Literal parsers keyed by value type.
//!
//! The registry replaces type introspection: every scalar or compound type
//! that can appear as a literal has an explicit parse function. Embedding
//! applications add their own compound types with
//! [`ParserRegistry::register`] or [`ParserRegistry::register_styled`].

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use num_traits::Num;

use crate::value::Value;

/// Numeric notation selected for a literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NumberStyle {
    /// Optionally signed decimal digits.
    #[default]
    Integer,
    /// Hexadecimal digits without prefix or sign.
    Hex,
}

impl NumberStyle {
    pub fn radix(self) -> u32 {
        match self {
            NumberStyle::Integer => 10,
            NumberStyle::Hex => 16,
        }
    }
}

/// Output of a literal parser.
#[derive(Clone)]
pub enum Parsed {
    /// A scalar embedded as a constant.
    Scalar(Value<'static>),
    /// A compound value kept in a precomputed slot.
    Compound(Arc<dyn Any + Send + Sync>),
}

impl fmt::Debug for Parsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parsed::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
            Parsed::Compound(_) => f.write_str("Compound(..)"),
        }
    }
}

type StyledFn = dyn Fn(&str, NumberStyle) -> Result<Parsed, String> + Send + Sync;
type PlainFn = dyn Fn(&str) -> Result<Parsed, String> + Send + Sync;

/// A registered parse function.
#[derive(Clone)]
pub enum LiteralParser {
    /// Accepts a [`NumberStyle`]; the resolver detects a `0x` prefix.
    Styled(Arc<StyledFn>),
    /// Accepts the literal text only.
    Plain(Arc<PlainFn>),
}

impl fmt::Debug for LiteralParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralParser::Styled(_) => f.write_str("Styled(..)"),
            LiteralParser::Plain(_) => f.write_str("Plain(..)"),
        }
    }
}

/// Parse functions keyed by the [`TypeId`] of the value type.
#[derive(Clone, Default)]
pub struct ParserRegistry {
    parsers: HashMap<TypeId, LiteralParser>,
}

// Signed hex literals are read as the two's complement bit pattern of the
// same width, so 0xFFFF parses to -1 for i16.
macro_rules! signed_parser {
    ($registry:expr, $($signed:ty => $unsigned:ty),* $(,)?) => {
        $(
            $registry.insert(
                TypeId::of::<$signed>(),
                LiteralParser::Styled(Arc::new(|text: &str, style: NumberStyle| {
                    let value = match style {
                        NumberStyle::Integer => {
                            <$signed as Num>::from_str_radix(text, 10).map_err(|e| e.to_string())?
                        }
                        NumberStyle::Hex => {
                            <$unsigned as Num>::from_str_radix(text, 16).map_err(|e| e.to_string())?
                                as $signed
                        }
                    };
                    Ok(Parsed::Scalar(Value::Int(i64::from(value))))
                })),
            );
        )*
    };
}

macro_rules! unsigned_parser {
    ($registry:expr, $($unsigned:ty),* $(,)?) => {
        $(
            $registry.insert(
                TypeId::of::<$unsigned>(),
                LiteralParser::Styled(Arc::new(|text: &str, style: NumberStyle| {
                    <$unsigned as Num>::from_str_radix(text, style.radix())
                        .map(|value| Parsed::Scalar(Value::UInt(u64::from(value))))
                        .map_err(|e| e.to_string())
                })),
            );
        )*
    };
}

impl ParserRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with parsers for every scalar type.
    ///
    /// Integers accept decimal and (via the resolver) hexadecimal notation,
    /// floats use standard notation, booleans accept `true`/`false` in any
    /// case, and characters must be exactly one character long.
    pub fn with_defaults() -> Self {
        let mut parsers = HashMap::new();

        signed_parser!(parsers, i8 => u8, i16 => u16, i32 => u32, i64 => u64);
        unsigned_parser!(parsers, u8, u16, u32, u64);

        parsers.insert(
            TypeId::of::<f32>(),
            LiteralParser::Plain(Arc::new(|text: &str| {
                text.parse::<f32>()
                    .map(|value| Parsed::Scalar(Value::Float(f64::from(value))))
                    .map_err(|e| e.to_string())
            })),
        );
        parsers.insert(
            TypeId::of::<f64>(),
            LiteralParser::Plain(Arc::new(|text: &str| {
                text.parse::<f64>()
                    .map(|value| Parsed::Scalar(Value::Float(value)))
                    .map_err(|e| e.to_string())
            })),
        );
        parsers.insert(
            TypeId::of::<bool>(),
            LiteralParser::Plain(Arc::new(|text: &str| {
                if text.eq_ignore_ascii_case("true") {
                    Ok(Parsed::Scalar(Value::Bool(true)))
                } else if text.eq_ignore_ascii_case("false") {
                    Ok(Parsed::Scalar(Value::Bool(false)))
                } else {
                    Err("expected true or false".to_string())
                }
            })),
        );
        parsers.insert(
            TypeId::of::<char>(),
            LiteralParser::Plain(Arc::new(|text: &str| {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Parsed::Scalar(Value::Char(c))),
                    _ => Err("expected exactly one character".to_string()),
                }
            })),
        );

        #[cfg(feature = "decimal")]
        parsers.insert(
            TypeId::of::<rust_decimal::Decimal>(),
            LiteralParser::Plain(Arc::new(|text: &str| {
                text.parse::<rust_decimal::Decimal>()
                    .map(|value| Parsed::Compound(Arc::new(value)))
                    .map_err(|e| e.to_string())
            })),
        );

        Self { parsers }
    }

    /// Registers a plain parser for a compound type.
    pub fn register<T, F, E>(&mut self, parse: F) -> &mut Self
    where
        T: Any + Send + Sync,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        self.parsers.insert(
            TypeId::of::<T>(),
            LiteralParser::Plain(Arc::new(move |text: &str| {
                parse(text)
                    .map(|value| Parsed::Compound(Arc::new(value)))
                    .map_err(|e| e.to_string())
            })),
        );
        self
    }

    /// Registers a style-aware parser for a compound numeric type.
    pub fn register_styled<T, F, E>(&mut self, parse: F) -> &mut Self
    where
        T: Any + Send + Sync,
        F: Fn(&str, NumberStyle) -> Result<T, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        self.parsers.insert(
            TypeId::of::<T>(),
            LiteralParser::Styled(Arc::new(move |text: &str, style: NumberStyle| {
                parse(text, style)
                    .map(|value| Parsed::Compound(Arc::new(value)))
                    .map_err(|e| e.to_string())
            })),
        );
        self
    }

    pub fn get(&self, type_id: TypeId) -> Option<&LiteralParser> {
        self.parsers.get(&type_id)
    }

    pub fn contains(&self, type_id: TypeId) -> bool {
        self.parsers.contains_key(&type_id)
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("parsers", &self.parsers.len())
            .finish()
    }
}
