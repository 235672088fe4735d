//! Per-invocation generation configuration.
//!
//! [`MockSettings`] is the plain, serializable policy (ranges, seeds, toggles).
//! [`MockConfig`] wraps it together with the RNG, the bean schema, the mocker
//! registry and the call-local caches used while one value graph is built.

use crate::error::MockError;
use crate::mocker::Mocker;
use crate::registry::MockerRegistry;
use mock_core::{BeanRef, BeanSchema, FieldDescriptor, TypeDescriptor};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

/// Inclusive `[min, max]` bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MockRange<T> {
    pub min: T,
    pub max: T,
}

impl<T> MockRange<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

/// Start and end of generated dates.
///
/// Both accept RFC 3339 timestamps or `YYYY-MM-DD` dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: "1970-01-01".to_string(),
            end: "2100-12-31".to_string(),
        }
    }
}

fn default_char_seed() -> Vec<char> {
    ('a'..='z').chain('A'..='Z').chain('0'..='9').collect()
}

fn default_string_seed() -> Vec<String> {
    default_char_seed().into_iter().map(String::from).collect()
}

/// Generation policy.
///
/// Every field has a default, so a YAML `settings:` block only needs to name
/// what it overrides:
///
/// ```yaml
/// settings:
///   int_range: { min: 1, max: 1 }
///   char_seed: [a, b, c]
///   enabled_circle: true
///   seed: 42
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockSettings {
    pub byte_range: MockRange<i8>,
    pub short_range: MockRange<i16>,
    pub int_range: MockRange<i32>,
    pub long_range: MockRange<i64>,
    pub float_range: MockRange<f32>,
    pub double_range: MockRange<f64>,
    /// Candidate characters for `char` values
    pub char_seed: Vec<char>,
    /// Fragments concatenated into strings
    pub string_seed: Vec<String>,
    /// Length bounds for strings and containers
    pub size_range: MockRange<usize>,
    pub date_range: DateRange,
    /// Consult the instance cache before constructing a bean
    pub enabled_circle: bool,
    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            byte_range: MockRange::new(0, 127),
            short_range: MockRange::new(0, 1000),
            int_range: MockRange::new(0, 10000),
            long_range: MockRange::new(0, 10000),
            float_range: MockRange::new(0.0, 10000.0),
            double_range: MockRange::new(0.0, 10000.0),
            char_seed: default_char_seed(),
            string_seed: default_string_seed(),
            size_range: MockRange::new(1, 10),
            date_range: DateRange::default(),
            enabled_circle: false,
            seed: None,
        }
    }
}

/// Configuration and call-local state of one generation.
///
/// The config holds `Rc` bean handles in its cache and is therefore `!Send`:
/// one config belongs to one thread and one call at a time. The schema and the
/// registry are shared `Arc`s and can be reused across configs.
pub struct MockConfig {
    settings: MockSettings,
    rng: StdRng,
    schema: Arc<BeanSchema>,
    registry: MockerRegistry,
    bean_cache: HashMap<String, BeanRef>,
    field_cache: HashMap<String, Rc<[FieldDescriptor]>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self::from_settings(MockSettings::default())
    }
}

impl MockConfig {
    /// Create a config with default settings, an empty schema and the default mockers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config from settings.
    pub fn from_settings(settings: MockSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            settings,
            rng,
            schema: Arc::new(BeanSchema::new()),
            registry: MockerRegistry::with_defaults(),
            bean_cache: HashMap::new(),
            field_cache: HashMap::new(),
        }
    }

    /// Use the given bean schema.
    pub fn with_schema(mut self, schema: impl Into<Arc<BeanSchema>>) -> Self {
        self.schema = schema.into();
        self.field_cache.clear();
        self
    }

    /// Use the given mocker registry.
    pub fn with_registry(mut self, registry: MockerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Re-seed the RNG for reproducible output.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.settings.seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Enable or disable cycle protection.
    pub fn with_enabled_circle(mut self, enabled: bool) -> Self {
        self.settings.enabled_circle = enabled;
        self
    }

    pub fn with_byte_range(mut self, min: i8, max: i8) -> Self {
        self.settings.byte_range = MockRange::new(min, max);
        self
    }

    pub fn with_short_range(mut self, min: i16, max: i16) -> Self {
        self.settings.short_range = MockRange::new(min, max);
        self
    }

    pub fn with_int_range(mut self, min: i32, max: i32) -> Self {
        self.settings.int_range = MockRange::new(min, max);
        self
    }

    pub fn with_long_range(mut self, min: i64, max: i64) -> Self {
        self.settings.long_range = MockRange::new(min, max);
        self
    }

    pub fn with_float_range(mut self, min: f32, max: f32) -> Self {
        self.settings.float_range = MockRange::new(min, max);
        self
    }

    pub fn with_double_range(mut self, min: f64, max: f64) -> Self {
        self.settings.double_range = MockRange::new(min, max);
        self
    }

    pub fn with_size_range(mut self, min: usize, max: usize) -> Self {
        self.settings.size_range = MockRange::new(min, max);
        self
    }

    pub fn with_char_seed(mut self, seed: impl IntoIterator<Item = char>) -> Self {
        self.settings.char_seed = seed.into_iter().collect();
        self
    }

    pub fn with_string_seed<I, S>(mut self, seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.string_seed = seed.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_date_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.settings.date_range = DateRange {
            start: start.into(),
            end: end.into(),
        };
        self
    }

    /// The policy part of this config.
    pub fn settings(&self) -> &MockSettings {
        &self.settings
    }

    pub fn byte_range(&self) -> MockRange<i8> {
        self.settings.byte_range
    }

    pub fn short_range(&self) -> MockRange<i16> {
        self.settings.short_range
    }

    pub fn int_range(&self) -> MockRange<i32> {
        self.settings.int_range
    }

    pub fn long_range(&self) -> MockRange<i64> {
        self.settings.long_range
    }

    pub fn float_range(&self) -> MockRange<f32> {
        self.settings.float_range
    }

    pub fn double_range(&self) -> MockRange<f64> {
        self.settings.double_range
    }

    pub fn size_range(&self) -> MockRange<usize> {
        self.settings.size_range
    }

    pub fn char_seed(&self) -> &[char] {
        &self.settings.char_seed
    }

    pub fn string_seed(&self) -> &[String] {
        &self.settings.string_seed
    }

    pub fn date_range(&self) -> &DateRange {
        &self.settings.date_range
    }

    pub fn is_enabled_circle(&self) -> bool {
        self.settings.enabled_circle
    }

    /// The random number generator shared by every mocker of this call.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// The bean schema.
    pub fn schema(&self) -> &BeanSchema {
        &self.schema
    }

    /// A shared handle to the bean schema.
    pub fn shared_schema(&self) -> Arc<BeanSchema> {
        Arc::clone(&self.schema)
    }

    /// The mocker registry.
    pub fn registry(&self) -> &MockerRegistry {
        &self.registry
    }

    /// Register a fixed mocker for a type name (e.g. a concrete mocker for an abstract bean).
    pub fn register_mocker<M>(&mut self, name: impl Into<String>, mocker: M)
    where
        M: Mocker + Clone + Send + Sync + 'static,
    {
        self.registry.register_mocker(name, mocker);
    }

    /// Remove the mocker registered for a type name.
    pub fn unregister_mocker(&mut self, name: &str) -> bool {
        self.registry.unregister(name)
    }

    /// Record (or overwrite) the cached instance for a type name.
    pub fn cache_bean(&mut self, type_name: impl Into<String>, instance: BeanRef) {
        self.bean_cache.insert(type_name.into(), instance);
    }

    /// The cached instance for a type name, if any.
    pub fn cached_bean(&self, type_name: &str) -> Option<BeanRef> {
        self.bean_cache.get(type_name).cloned()
    }

    /// Drop every call-local cache entry.
    pub fn clear_cache(&mut self) {
        self.bean_cache.clear();
        self.field_cache.clear();
    }

    /// Settable fields of a bean, collected once per type and call.
    pub fn settable_fields(
        &mut self,
        type_name: &str,
        type_args: &[TypeDescriptor],
    ) -> Result<Rc<[FieldDescriptor]>, MockError> {
        let key = if type_args.is_empty() {
            type_name.to_string()
        } else {
            TypeDescriptor::parameterized(type_name, type_args.to_vec()).to_string()
        };
        if let Some(fields) = self.field_cache.get(&key) {
            return Ok(Rc::clone(fields));
        }
        let fields: Rc<[FieldDescriptor]> =
            self.schema.settable_fields(type_name, type_args)?.into();
        self.field_cache.insert(key, Rc::clone(&fields));
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_core::{BeanDefinition, BeanInstance, FieldDefinition};

    #[test]
    fn test_default_ranges_fit_their_widths() {
        let config = MockConfig::new();
        assert_eq!(config.byte_range(), MockRange::new(0, 127));
        assert_eq!(config.short_range(), MockRange::new(0, 1000));
        assert_eq!(config.int_range(), MockRange::new(0, 10000));
        assert_eq!(config.size_range(), MockRange::new(1, 10));
        assert_eq!(config.char_seed().len(), 62);
        assert!(!config.is_enabled_circle());
    }

    #[test]
    fn test_builder_setters() {
        let config = MockConfig::new()
            .with_int_range(1, 1)
            .with_char_seed(['a', 'b', 'c'])
            .with_enabled_circle(true)
            .with_seed(42);
        assert_eq!(config.int_range(), MockRange::new(1, 1));
        assert_eq!(config.char_seed(), &['a', 'b', 'c']);
        assert!(config.is_enabled_circle());
        assert_eq!(config.settings().seed, Some(42));
    }

    #[test]
    fn test_settings_from_partial_yaml() {
        let settings: MockSettings = serde_yaml::from_str(
            "int_range: { min: 5, max: 6 }\nchar_seed: [x, y]\nenabled_circle: true\n",
        )
        .unwrap();
        assert_eq!(settings.int_range, MockRange::new(5, 6));
        assert_eq!(settings.char_seed, vec!['x', 'y']);
        assert!(settings.enabled_circle);
        assert_eq!(settings.long_range, MockSettings::default().long_range);
    }

    #[test]
    fn test_bean_cache_overwrites_and_clears() {
        let mut config = MockConfig::new();
        let first = BeanRef::new(BeanInstance::new("Node", vec![]));
        let second = BeanRef::new(BeanInstance::new("Node", vec![]));

        assert!(config.cached_bean("Node").is_none());
        config.cache_bean("Node", first.clone());
        assert!(config.cached_bean("Node").unwrap().ptr_eq(&first));
        config.cache_bean("Node", second.clone());
        assert!(config.cached_bean("Node").unwrap().ptr_eq(&second));

        config.clear_cache();
        assert!(config.cached_bean("Node").is_none());
    }

    #[test]
    fn test_settable_fields_are_cached_per_call() {
        let schema = BeanSchema::new().with_bean(
            BeanDefinition::new("Leaf").field(FieldDefinition::new("count", TypeDescriptor::Int)),
        );
        let mut config = MockConfig::new().with_schema(schema);

        let first = config.settable_fields("Leaf", &[]).unwrap();
        let second = config.settable_fields("Leaf", &[]).unwrap();
        assert!(Rc::ptr_eq(&first, &second));

        config.clear_cache();
        let third = config.settable_fields("Leaf", &[]).unwrap();
        assert!(!Rc::ptr_eq(&first, &third));
        assert!(config.settable_fields("Missing", &[]).is_err());
    }
}
