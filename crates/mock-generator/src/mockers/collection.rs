//! Container mockers: list, set, map and option.
//!
//! These are registered by default under the raw type names `list`, `array`,
//! `set`, `map` and `option`. Each provider checks the number of type
//! arguments and builds a mocker that dispatches its element types.

use crate::config::MockConfig;
use crate::error::MockError;
use crate::mocker::{BaseMocker, Mocker};
use crate::random;
use mock_core::{MockValue, TypeDescriptor};

fn expect_args<const N: usize>(
    raw: &str,
    type_args: &[TypeDescriptor],
) -> Result<[TypeDescriptor; N], MockError> {
    <[TypeDescriptor; N]>::try_from(type_args.to_vec()).map_err(|args| {
        let shown = if args.is_empty() {
            raw.to_string()
        } else {
            TypeDescriptor::parameterized(raw, args).to_string()
        };
        MockError::UnsupportedType(format!("{shown} (expected {N} type argument(s))"))
    })
}

fn next_len(config: &mut MockConfig) -> Result<usize, MockError> {
    let size = config.size_range();
    random::next_size(config.rng(), size.min, size.max)
}

/// `list<T>`: `size_range` elements.
#[derive(Debug, Clone)]
pub struct ListMocker {
    element: TypeDescriptor,
}

impl ListMocker {
    pub fn new(element: TypeDescriptor) -> Self {
        Self { element }
    }
}

impl Mocker for ListMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        let len = next_len(config)?;
        let element = BaseMocker::new(self.element.clone());
        let items = (0..len)
            .map(|_| element.mock(config))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MockValue::List(items))
    }
}

/// `set<T>`: up to `size_range` distinct elements.
#[derive(Debug, Clone)]
pub struct SetMocker {
    element: TypeDescriptor,
}

impl SetMocker {
    pub fn new(element: TypeDescriptor) -> Self {
        Self { element }
    }
}

impl Mocker for SetMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        let len = next_len(config)?;
        let element = BaseMocker::new(self.element.clone());
        let mut items: Vec<MockValue> = Vec::with_capacity(len);
        for _ in 0..len {
            let item = element.mock(config)?;
            if !items.contains(&item) {
                items.push(item);
            }
        }
        Ok(MockValue::Set(items))
    }
}

/// `map<K, V>`: up to `size_range` entries with distinct keys.
#[derive(Debug, Clone)]
pub struct MapMocker {
    key: TypeDescriptor,
    value: TypeDescriptor,
}

impl MapMocker {
    pub fn new(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self { key, value }
    }
}

impl Mocker for MapMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        let len = next_len(config)?;
        let key_mocker = BaseMocker::new(self.key.clone());
        let value_mocker = BaseMocker::new(self.value.clone());
        let mut entries: Vec<(MockValue, MockValue)> = Vec::with_capacity(len);
        for _ in 0..len {
            let key = key_mocker.mock(config)?;
            let value = value_mocker.mock(config)?;
            if entries.iter().any(|(k, _)| *k == key) {
                continue;
            }
            entries.push((key, value));
        }
        Ok(MockValue::Map(entries))
    }
}

/// `option<T>`: `Null` half of the time.
#[derive(Debug, Clone)]
pub struct OptionMocker {
    inner: TypeDescriptor,
}

impl OptionMocker {
    pub fn new(inner: TypeDescriptor) -> Self {
        Self { inner }
    }
}

impl Mocker for OptionMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        if random::next_bool(config.rng()) {
            BaseMocker::new(self.inner.clone()).mock(config)
        } else {
            Ok(MockValue::Null)
        }
    }
}

pub fn list_provider(type_args: &[TypeDescriptor]) -> Result<Box<dyn Mocker>, MockError> {
    let [element] = expect_args::<1>("list", type_args)?;
    Ok(Box::new(ListMocker::new(element)))
}

pub fn set_provider(type_args: &[TypeDescriptor]) -> Result<Box<dyn Mocker>, MockError> {
    let [element] = expect_args::<1>("set", type_args)?;
    Ok(Box::new(SetMocker::new(element)))
}

pub fn map_provider(type_args: &[TypeDescriptor]) -> Result<Box<dyn Mocker>, MockError> {
    let [key, value] = expect_args::<2>("map", type_args)?;
    Ok(Box::new(MapMocker::new(key, value)))
}

pub fn option_provider(type_args: &[TypeDescriptor]) -> Result<Box<dyn Mocker>, MockError> {
    let [inner] = expect_args::<1>("option", type_args)?;
    Ok(Box::new(OptionMocker::new(inner)))
}
