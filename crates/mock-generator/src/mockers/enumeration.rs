//! Enum mocker.

use crate::config::MockConfig;
use crate::error::MockError;
use crate::mocker::Mocker;
use crate::random;
use mock_core::MockValue;

/// Uniform pick from the declared variants of a schema enum.
#[derive(Debug, Clone)]
pub struct EnumMocker {
    name: String,
}

impl EnumMocker {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Mocker for EnumMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        let schema = config.shared_schema();
        let def = schema
            .get_enum(&self.name)
            .ok_or_else(|| MockError::UnsupportedType(self.name.clone()))?;
        let idx = random::next_index(
            config.rng(),
            &format!("enum {}", self.name),
            def.variants.len(),
        )?;
        Ok(MockValue::Enum(def.variants[idx].clone()))
    }
}
