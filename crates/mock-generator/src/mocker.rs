//! The `Mocker` capability and the type dispatcher.
//!
//! [`BaseMocker`] classifies a [`TypeDescriptor`] into a [`Strategy`] and hands
//! it to the matching mocker. The order is fixed, first match wins:
//!
//! 1. well-known value type -> leaf mocker
//! 2. parameterized type -> [`GenericMocker`]
//! 3. name registered in the [`MockerRegistry`](crate::MockerRegistry) -> that mocker
//! 4. enum declared in the schema -> [`EnumMocker`]
//! 5. bean declared in the schema -> [`BeanMocker`]
//!
//! Anything else is [`MockError::UnsupportedType`].

use crate::config::MockConfig;
use crate::error::MockError;
use crate::mockers::bean::BeanMocker;
use crate::mockers::date::DateMocker;
use crate::mockers::enumeration::EnumMocker;
use crate::mockers::generic::GenericMocker;
use crate::mockers::primitive::{
    BigDecimalMocker, BigIntegerMocker, BooleanMocker, ByteMocker, CharacterMocker, DoubleMocker,
    FloatMocker, IntegerMocker, LongMocker, ShortMocker,
};
use crate::mockers::text::StringMocker;
use mock_core::{BeanRef, MockValue, TypeDescriptor};
use tracing::{debug, trace};

/// Produces one value per call.
///
/// Every strategy of the engine implements this single operation; custom
/// strategies implement it too and are registered by type name.
pub trait Mocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError>;
}

/// The strategy the dispatcher selected for a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// Well-known value type
    Leaf(TypeDescriptor),
    /// Parameterized type to peel
    Generic {
        raw: String,
        args: Vec<TypeDescriptor>,
    },
    /// Registered custom mocker
    Custom(String),
    /// Enum from the schema
    Enum(String),
    /// Bean from the schema
    Bean(String),
    /// Nothing can produce this type
    Unsupported(String),
}

/// Type dispatcher.
#[derive(Debug, Clone)]
pub struct BaseMocker {
    descriptor: TypeDescriptor,
    type_args: Vec<TypeDescriptor>,
}

impl BaseMocker {
    pub fn new(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor,
            type_args: Vec::new(),
        }
    }

    /// Dispatcher for a raw type together with the type arguments peeled off it.
    pub fn with_args(descriptor: TypeDescriptor, type_args: Vec<TypeDescriptor>) -> Self {
        Self {
            descriptor,
            type_args,
        }
    }

    /// Select the strategy for this descriptor.
    pub fn classify(&self, config: &MockConfig) -> Strategy {
        match &self.descriptor {
            d if d.is_well_known() => Strategy::Leaf(d.clone()),
            TypeDescriptor::Parameterized { raw, args } => Strategy::Generic {
                raw: raw.clone(),
                args: args.clone(),
            },
            d => {
                let name = d.raw_name();
                if self.type_args.is_empty() {
                    if let Some(leaf) = TypeDescriptor::well_known(name) {
                        return Strategy::Leaf(leaf);
                    }
                }
                if config.registry().contains(name) {
                    Strategy::Custom(name.to_string())
                } else if config.schema().get_enum(name).is_some() {
                    Strategy::Enum(name.to_string())
                } else if config.schema().get_bean(name).is_some() {
                    Strategy::Bean(name.to_string())
                } else {
                    Strategy::Unsupported(self.display_name())
                }
            }
        }
    }

    /// Whether some strategy exists for a raw type name.
    pub fn resolves(raw: &str, config: &MockConfig) -> bool {
        config.registry().contains(raw)
            || config.schema().get_enum(raw).is_some()
            || config.schema().get_bean(raw).is_some()
    }

    fn display_name(&self) -> String {
        if self.type_args.is_empty() {
            self.descriptor.to_string()
        } else {
            TypeDescriptor::parameterized(self.descriptor.raw_name(), self.type_args.clone())
                .to_string()
        }
    }
}

impl Mocker for BaseMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        let strategy = self.classify(config);
        trace!("Dispatching {} as {:?}", self.descriptor, strategy);

        match strategy {
            Strategy::Leaf(descriptor) => mock_leaf(&descriptor, config),
            Strategy::Generic { raw, args } => GenericMocker::new(raw, args).mock(config),
            Strategy::Custom(name) => {
                let provider = config
                    .registry()
                    .get(&name)
                    .ok_or_else(|| MockError::UnsupportedType(name.clone()))?;
                provider.provide(&self.type_args)?.mock(config)
            }
            Strategy::Enum(name) => EnumMocker::new(name).mock(config),
            Strategy::Bean(name) => BeanMocker::with_args(name, self.type_args.clone()).mock(config),
            Strategy::Unsupported(name) => Err(MockError::UnsupportedType(name)),
        }
    }
}

fn mock_leaf(descriptor: &TypeDescriptor, config: &mut MockConfig) -> Result<MockValue, MockError> {
    match descriptor {
        TypeDescriptor::Bool => BooleanMocker.mock(config),
        TypeDescriptor::Char => CharacterMocker.mock(config),
        TypeDescriptor::Byte => ByteMocker.mock(config),
        TypeDescriptor::Short => ShortMocker.mock(config),
        TypeDescriptor::Int => IntegerMocker.mock(config),
        TypeDescriptor::Long => LongMocker.mock(config),
        TypeDescriptor::Float => FloatMocker.mock(config),
        TypeDescriptor::Double => DoubleMocker.mock(config),
        TypeDescriptor::BigInteger => BigIntegerMocker.mock(config),
        TypeDescriptor::BigDecimal => BigDecimalMocker.mock(config),
        TypeDescriptor::Date => DateMocker::from_config(config)?.mock(config),
        TypeDescriptor::String => StringMocker.mock(config),
        other => Err(MockError::UnsupportedType(other.to_string())),
    }
}

/// Produce a value of the given type.
///
/// This is one top-level invocation: the instance cache starts empty and is
/// discarded when the call returns, whatever the outcome.
pub fn mock_type(
    descriptor: &TypeDescriptor,
    config: &mut MockConfig,
) -> Result<MockValue, MockError> {
    config.clear_cache();
    debug!("Mocking {}", descriptor);
    let result = BaseMocker::new(descriptor.clone()).mock(config);
    config.clear_cache();
    result
}

/// Produce a bean by type name.
pub fn mock_bean(type_name: &str, config: &mut MockConfig) -> Result<BeanRef, MockError> {
    match mock_type(&TypeDescriptor::named(type_name), config)? {
        MockValue::Bean(bean) => Ok(bean),
        other => Err(MockError::Conversion {
            target: type_name.to_string(),
            found: other.kind(),
        }),
    }
}
