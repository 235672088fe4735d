//! String mocker.

use crate::config::MockConfig;
use crate::error::MockError;
use crate::mocker::Mocker;
use crate::random;
use mock_core::MockValue;

/// Concatenates `size_range` pieces picked from the string seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringMocker;

impl Mocker for StringMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        let size = config.size_range();
        let seed_len = config.string_seed().len();
        if seed_len == 0 {
            return Err(MockError::EmptySeed("string".to_string()));
        }

        let len = random::next_size(config.rng(), size.min, size.max)?;
        let mut value = String::new();
        for _ in 0..len {
            let idx = random::next_index(config.rng(), "string", seed_len)?;
            value.push_str(&config.string_seed()[idx]);
        }
        Ok(MockValue::String(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_built_from_seed() {
        let mut config = MockConfig::new()
            .with_seed(42)
            .with_size_range(2, 4)
            .with_string_seed(["ab", "c"]);

        for _ in 0..200 {
            let value = StringMocker.mock(&mut config).unwrap();
            let s = value.as_str().unwrap();
            let stripped = s.replace("ab", "").replace('c', "");
            assert!(stripped.is_empty(), "unexpected fragment in {s}");
            assert!((2..=8).contains(&s.len()));
        }
    }

    #[test]
    fn test_default_string_is_alphanumeric() {
        let mut config = MockConfig::new().with_seed(7);
        let value = StringMocker.mock(&mut config).unwrap();
        let s = value.as_str().unwrap();
        assert!((1..=10).contains(&s.len()));
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_empty_string_seed_fails() {
        let mut config = MockConfig::new().with_string_seed(Vec::<String>::new());
        assert!(matches!(
            StringMocker.mock(&mut config),
            Err(MockError::EmptySeed(ref seed)) if seed == "string"
        ));
    }

    #[test]
    fn test_zero_length_strings() {
        let mut config = MockConfig::new().with_size_range(0, 0);
        assert_eq!(
            StringMocker.mock(&mut config).unwrap(),
            MockValue::String(String::new())
        );
    }
}
