//! Typed facade over the dynamic engine.
//!
//! [`Mockable`] maps a Rust type to its [`TypeDescriptor`] and converts the
//! generated [`MockValue`] back, so callers can write `mock::<Vec<i32>>(&mut config)`.

use crate::config::MockConfig;
use crate::error::MockError;
use crate::mocker::mock_type;
use chrono::{DateTime, Utc};
use mock_core::{MockValue, TypeDescriptor};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// A Rust type the engine can produce.
pub trait Mockable: Sized {
    /// The descriptor the dispatcher is invoked with.
    fn type_descriptor() -> TypeDescriptor;

    /// Convert a generated value into `Self`.
    fn from_mock_value(value: MockValue) -> Result<Self, MockError>;
}

fn mismatch<T: Mockable>(value: &MockValue) -> MockError {
    MockError::Conversion {
        target: T::type_descriptor().to_string(),
        found: value.kind(),
    }
}

macro_rules! impl_mockable_leaf {
    ($ty:ty, $descriptor:ident, $variant:ident) => {
        impl Mockable for $ty {
            fn type_descriptor() -> TypeDescriptor {
                TypeDescriptor::$descriptor
            }

            fn from_mock_value(value: MockValue) -> Result<Self, MockError> {
                match value {
                    MockValue::$variant(v) => Ok(v),
                    other => Err(mismatch::<Self>(&other)),
                }
            }
        }
    };
}

impl_mockable_leaf!(bool, Bool, Bool);
impl_mockable_leaf!(char, Char, Char);
impl_mockable_leaf!(i8, Byte, Byte);
impl_mockable_leaf!(i16, Short, Short);
impl_mockable_leaf!(i32, Int, Int);
impl_mockable_leaf!(i64, Long, Long);
impl_mockable_leaf!(f32, Float, Float);
impl_mockable_leaf!(f64, Double, Double);
impl_mockable_leaf!(i128, BigInteger, BigInteger);
impl_mockable_leaf!(Decimal, BigDecimal, BigDecimal);
impl_mockable_leaf!(DateTime<Utc>, Date, Date);
impl_mockable_leaf!(String, String, String);

fn elements<T: Mockable>(value: MockValue) -> Result<Vec<MockValue>, MockError> {
    match value {
        MockValue::List(items) | MockValue::Set(items) => Ok(items),
        other => Err(mismatch::<T>(&other)),
    }
}

impl<T: Mockable> Mockable for Vec<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::list(T::type_descriptor())
    }

    fn from_mock_value(value: MockValue) -> Result<Self, MockError> {
        elements::<Self>(value)?
            .into_iter()
            .map(T::from_mock_value)
            .collect()
    }
}

impl<T: Mockable + Eq + Hash> Mockable for HashSet<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::set(T::type_descriptor())
    }

    fn from_mock_value(value: MockValue) -> Result<Self, MockError> {
        elements::<Self>(value)?
            .into_iter()
            .map(T::from_mock_value)
            .collect()
    }
}

impl<K: Mockable + Eq + Hash, V: Mockable> Mockable for HashMap<K, V> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::map(K::type_descriptor(), V::type_descriptor())
    }

    fn from_mock_value(value: MockValue) -> Result<Self, MockError> {
        match value {
            MockValue::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| Ok((K::from_mock_value(k)?, V::from_mock_value(v)?)))
                .collect(),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl<T: Mockable> Mockable for Option<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::option(T::type_descriptor())
    }

    fn from_mock_value(value: MockValue) -> Result<Self, MockError> {
        match value {
            MockValue::Null => Ok(None),
            other => T::from_mock_value(other).map(Some),
        }
    }
}

/// Produce a value of a Rust type in one top-level invocation.
pub fn mock<T: Mockable>(config: &mut MockConfig) -> Result<T, MockError> {
    let value = mock_type(&T::type_descriptor(), config)?;
    T::from_mock_value(value)
}
