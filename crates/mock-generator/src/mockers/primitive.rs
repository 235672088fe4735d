//! Leaf mockers for booleans, characters and numbers.

use crate::config::MockConfig;
use crate::error::MockError;
use crate::mocker::Mocker;
use crate::random;
use mock_core::MockValue;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Fair coin.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanMocker;

impl Mocker for BooleanMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        Ok(MockValue::Bool(random::next_bool(config.rng())))
    }
}

/// Uniform pick from the char seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharacterMocker;

impl Mocker for CharacterMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        let len = config.char_seed().len();
        let idx = random::next_index(config.rng(), "char", len)?;
        Ok(MockValue::Char(config.char_seed()[idx]))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ByteMocker;

impl Mocker for ByteMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        let range = config.byte_range();
        random::next_byte(config.rng(), range.min, range.max).map(MockValue::Byte)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShortMocker;

impl Mocker for ShortMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        let range = config.short_range();
        random::next_short(config.rng(), range.min, range.max).map(MockValue::Short)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerMocker;

impl Mocker for IntegerMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        let range = config.int_range();
        random::next_int(config.rng(), range.min, range.max).map(MockValue::Int)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LongMocker;

impl Mocker for LongMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        let range = config.long_range();
        random::next_long(config.rng(), range.min, range.max).map(MockValue::Long)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FloatMocker;

impl Mocker for FloatMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        let range = config.float_range();
        random::next_float(config.rng(), range.min, range.max).map(MockValue::Float)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleMocker;

impl Mocker for DoubleMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        let range = config.double_range();
        random::next_double(config.rng(), range.min, range.max).map(MockValue::Double)
    }
}

/// Wide integer drawn from the long range.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigIntegerMocker;

impl Mocker for BigIntegerMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        let range = config.long_range();
        let value = random::next_long(config.rng(), range.min, range.max)?;
        Ok(MockValue::BigInteger(i128::from(value)))
    }
}

/// Exact decimal drawn from the double range.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigDecimalMocker;

impl Mocker for BigDecimalMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        let range = config.double_range();
        let value = random::next_double(config.rng(), range.min, range.max)?;
        Decimal::from_f64(value)
            .map(MockValue::BigDecimal)
            .ok_or(MockError::Conversion {
                target: "big_decimal".to_string(),
                found: "double",
            })
    }
}
