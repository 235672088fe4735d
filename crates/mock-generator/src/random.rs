//! Bounded random value producers.
//!
//! Stateless helpers used by every leaf mocker. Bounds are inclusive. An
//! inverted range is reported as [`MockError::InvalidRange`]; it is never clamped.

use crate::error::MockError;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use std::fmt::Display;

fn inverted<T: Display>(kind: &'static str, min: T, max: T) -> MockError {
    MockError::InvalidRange {
        kind,
        min: min.to_string(),
        max: max.to_string(),
        reason: "min is greater than max",
    }
}

fn next_integer<R, T>(rng: &mut R, kind: &'static str, min: T, max: T) -> Result<T, MockError>
where
    R: Rng,
    T: SampleUniform + PartialOrd + Display + Copy,
{
    if min > max {
        return Err(inverted(kind, min, max));
    }
    Ok(rng.gen_range(min..=max))
}

macro_rules! next_float_impl {
    ($name:ident, $ty:ty, $kind:literal) => {
        #[doc = concat!("Random `", stringify!($ty), "` in `[min, max]`.")]
        pub fn $name<R: Rng>(rng: &mut R, min: $ty, max: $ty) -> Result<$ty, MockError> {
            if !(min.is_finite() && max.is_finite() && (max - min).is_finite()) {
                return Err(MockError::InvalidRange {
                    kind: $kind,
                    min: min.to_string(),
                    max: max.to_string(),
                    reason: "bounds and span must be finite",
                });
            }
            if min > max {
                return Err(inverted($kind, min, max));
            }
            // The sampler scales the span by 1 / (1 - EPSILON).
            if !((max - min) / (1.0 - <$ty>::EPSILON)).is_finite() {
                return Err(MockError::InvalidRange {
                    kind: $kind,
                    min: min.to_string(),
                    max: max.to_string(),
                    reason: "span is too wide to sample",
                });
            }
            Ok(rng.gen_range(min..=max))
        }
    };
}

/// Random `i8` in `[min, max]`.
pub fn next_byte<R: Rng>(rng: &mut R, min: i8, max: i8) -> Result<i8, MockError> {
    next_integer(rng, "byte", min, max)
}

/// Random `i16` in `[min, max]`.
pub fn next_short<R: Rng>(rng: &mut R, min: i16, max: i16) -> Result<i16, MockError> {
    next_integer(rng, "short", min, max)
}

/// Random `i32` in `[min, max]`.
pub fn next_int<R: Rng>(rng: &mut R, min: i32, max: i32) -> Result<i32, MockError> {
    next_integer(rng, "int", min, max)
}

/// Random `i64` in `[min, max]`.
pub fn next_long<R: Rng>(rng: &mut R, min: i64, max: i64) -> Result<i64, MockError> {
    next_integer(rng, "long", min, max)
}

/// Random `usize` in `[min, max]`, used for sizes.
pub fn next_size<R: Rng>(rng: &mut R, min: usize, max: usize) -> Result<usize, MockError> {
    next_integer(rng, "size", min, max)
}

next_float_impl!(next_float, f32, "float");
next_float_impl!(next_double, f64, "double");

/// Fair coin.
pub fn next_bool<R: Rng>(rng: &mut R) -> bool {
    rng.gen_bool(0.5)
}

/// Uniform index into a sequence of `len` candidates.
///
/// `seed` names the sequence in the error raised when it is empty.
pub fn next_index<R: Rng>(rng: &mut R, seed: &str, len: usize) -> Result<usize, MockError> {
    if len == 0 {
        return Err(MockError::EmptySeed(seed.to_string()));
    }
    Ok(rng.gen_range(0..len))
}
