//! Type descriptors for the beanmock engine.
//!
//! This module defines `TypeDescriptor`, the runtime handle that identifies the
//! type a caller wants generated. Descriptors are the dispatch key of the engine:
//! every descriptor resolves to exactly one generation strategy.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Runtime type descriptor.
///
/// Well-known value types have a dedicated variant each. User-defined beans,
/// enums and custom registered types are `Named`. Parameterized types
/// (containers, generic beans) carry their raw name and ordered type arguments.
///
/// # Text format
///
/// Descriptors parse from (and display as) a compact generic syntax:
///
/// ```text
/// int
/// Node
/// list<Node>
/// map<string, list<int>>
/// Page<User>
/// ```
///
/// # YAML Format
///
/// In schema files a descriptor is either that string or a map:
///
/// ```yaml
/// type: list<int>
/// type:
///   type: map
///   args: [string, Node]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// Boolean value
    Bool,
    /// Single character
    Char,
    /// 8-bit signed integer
    Byte,
    /// 16-bit signed integer
    Short,
    /// 32-bit signed integer
    Int,
    /// 64-bit signed integer
    Long,
    /// 32-bit IEEE 754 floating point
    Float,
    /// 64-bit IEEE 754 floating point
    Double,
    /// Arbitrary width integer (backed by the long range)
    BigInteger,
    /// Exact decimal (backed by the double range)
    BigDecimal,
    /// UTC timestamp
    Date,
    /// Text
    String,
    /// User-defined bean, enum, or custom registered type
    Named(String),
    /// Raw type applied to type arguments, e.g. `list<int>`
    Parameterized {
        /// Raw type name
        raw: String,
        /// Ordered type arguments
        args: Vec<TypeDescriptor>,
    },
}

/// Error returned when a descriptor string cannot be parsed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid type descriptor '{input}': {reason}")]
pub struct TypeParseError {
    /// The text that failed to parse
    pub input: String,
    /// What went wrong
    pub reason: String,
}

impl TypeDescriptor {
    /// Create a descriptor for a named (bean, enum or custom) type.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Create a parameterized descriptor.
    pub fn parameterized(raw: impl Into<String>, args: Vec<TypeDescriptor>) -> Self {
        Self::Parameterized {
            raw: raw.into(),
            args,
        }
    }

    /// `list<element>`
    pub fn list(element: TypeDescriptor) -> Self {
        Self::parameterized("list", vec![element])
    }

    /// `set<element>`
    pub fn set(element: TypeDescriptor) -> Self {
        Self::parameterized("set", vec![element])
    }

    /// `map<key, value>`
    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::parameterized("map", vec![key, value])
    }

    /// `option<inner>`
    pub fn option(inner: TypeDescriptor) -> Self {
        Self::parameterized("option", vec![inner])
    }

    /// Resolve a well-known type name (case-insensitive) to its descriptor.
    pub fn well_known(name: &str) -> Option<Self> {
        let descriptor = match name.to_ascii_lowercase().as_str() {
            "bool" | "boolean" => Self::Bool,
            "char" | "character" => Self::Char,
            "byte" | "i8" => Self::Byte,
            "short" | "i16" => Self::Short,
            "int" | "integer" | "i32" => Self::Int,
            "long" | "i64" => Self::Long,
            "float" | "f32" => Self::Float,
            "double" | "f64" => Self::Double,
            "big_integer" | "biginteger" => Self::BigInteger,
            "big_decimal" | "bigdecimal" | "decimal" => Self::BigDecimal,
            "date" | "datetime" | "date_time" => Self::Date,
            "string" | "str" | "text" => Self::String,
            _ => return None,
        };
        Some(descriptor)
    }

    /// Whether this descriptor is a well-known value type handled by a leaf generator.
    pub fn is_well_known(&self) -> bool {
        !matches!(self, Self::Named(_) | Self::Parameterized { .. })
    }

    /// Whether values of this type have a non-null zero default.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Bool
                | Self::Char
                | Self::Byte
                | Self::Short
                | Self::Int
                | Self::Long
                | Self::Float
                | Self::Double
        )
    }

    /// Whether this descriptor carries type arguments.
    pub fn is_parameterized(&self) -> bool {
        matches!(self, Self::Parameterized { .. })
    }

    /// The raw name of the type: the canonical name for well-known types,
    /// the name for named types, and the raw name for parameterized types.
    pub fn raw_name(&self) -> &str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::BigInteger => "big_integer",
            Self::BigDecimal => "big_decimal",
            Self::Date => "date",
            Self::String => "string",
            Self::Named(name) => name,
            Self::Parameterized { raw, .. } => raw,
        }
    }

    /// The type arguments (empty unless parameterized).
    pub fn type_args(&self) -> &[TypeDescriptor] {
        match self {
            Self::Parameterized { args, .. } => args,
            _ => &[],
        }
    }

    /// Replace named type parameters with concrete descriptors.
    pub fn substitute(&self, bindings: &HashMap<String, TypeDescriptor>) -> TypeDescriptor {
        match self {
            Self::Named(name) => bindings.get(name).cloned().unwrap_or_else(|| self.clone()),
            Self::Parameterized { raw, args } => Self::Parameterized {
                raw: raw.clone(),
                args: args.iter().map(|arg| arg.substitute(bindings)).collect(),
            },
            _ => self.clone(),
        }
    }

    /// Build a descriptor from a raw name and arguments, resolving well-known names.
    fn from_parts(raw: String, args: Vec<TypeDescriptor>) -> Self {
        if args.is_empty() {
            Self::well_known(&raw).unwrap_or(Self::Named(raw))
        } else {
            Self::Parameterized { raw, args }
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameterized { raw, args } => {
                write!(f, "{raw}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            other => f.write_str(other.raw_name()),
        }
    }
}

// ============================================================================
// Parsing
// ============================================================================

struct DescriptorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> DescriptorParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn error(&self, reason: impl Into<String>) -> TypeParseError {
        TypeParseError {
            input: self.input.to_string(),
            reason: reason.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.input[self.pos..].chars().next() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.input[self.pos..].chars().next()
    }

    fn expect(&mut self, expected: char) -> Result<(), TypeParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    fn identifier(&mut self) -> Result<String, TypeParseError> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(c) = self.input[self.pos..].chars().next() {
            if c.is_alphanumeric() || matches!(c, '_' | '.' | ':' | '$') {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(self.error(format!("expected a type name at offset {start}")));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn descriptor(&mut self) -> Result<TypeDescriptor, TypeParseError> {
        let raw = self.identifier()?;
        let mut args = Vec::new();
        if self.peek() == Some('<') {
            self.expect('<')?;
            args.push(self.descriptor()?);
            while self.peek() == Some(',') {
                self.expect(',')?;
                args.push(self.descriptor()?);
            }
            self.expect('>')?;
        }
        Ok(TypeDescriptor::from_parts(raw, args))
    }

    fn parse(mut self) -> Result<TypeDescriptor, TypeParseError> {
        let descriptor = self.descriptor()?;
        if let Some(c) = self.peek() {
            return Err(self.error(format!("unexpected trailing '{c}'")));
        }
        Ok(descriptor)
    }
}

impl FromStr for TypeDescriptor {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DescriptorParser::new(s).parse()
    }
}

// Serialized as the text format; deserialized from the text format or from a
// `{type, args}` map.

impl Serialize for TypeDescriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeDescriptor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, MapAccess, Visitor};

        struct TypeDescriptorVisitor;

        impl<'de> Visitor<'de> for TypeDescriptorVisitor {
            type Value = TypeDescriptor;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a type descriptor string or a {type, args} map")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                value.parse().map_err(E::custom)
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut raw: Option<String> = None;
                let mut args: Vec<TypeDescriptor> = Vec::new();

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "type" => raw = Some(map.next_value()?),
                        "args" => args = map.next_value()?,
                        other => {
                            return Err(M::Error::unknown_field(other, &["type", "args"]));
                        }
                    }
                }

                let raw = raw.ok_or_else(|| M::Error::missing_field("type"))?;
                if args.is_empty() {
                    return raw.parse().map_err(M::Error::custom);
                }
                Ok(TypeDescriptor::from_parts(raw, args))
            }
        }

        deserializer.deserialize_any(TypeDescriptorVisitor)
    }
}
