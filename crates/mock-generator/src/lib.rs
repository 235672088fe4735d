//! Random object-graph generator for the beanmock engine.
//!
//! This crate produces populated values of arbitrary types described by a
//! [`TypeDescriptor`](mock_core::TypeDescriptor): primitives, strings, dates,
//! containers and user-defined beans from a [`BeanSchema`](mock_core::BeanSchema),
//! including beans that reference themselves or each other.
//!
//! # Architecture
//!
//! ```text
//! TypeDescriptor + MockConfig
//!          │
//!          ▼
//! ┌─────────────────────┐
//! │     BaseMocker      │  classify: Leaf > Generic > Custom > Enum > Bean
//! └──┬──────┬──────┬────┘
//!    │      │      │
//!    ▼      ▼      ▼
//!  leaf  Generic  BeanMocker ──── instance cache (per call, keyed by type name)
//!        Mocker       │
//!          │          └── fields ──► BaseMocker (recursive)
//!          └── registry (list, set, map, option, custom)
//! ```
//!
//! # Example
//!
//! ```rust
//! use mock_core::{BeanDefinition, BeanSchema, FieldDefinition, TypeDescriptor};
//! use mock_generator::{mock_bean, MockConfig};
//!
//! let schema = BeanSchema::new().with_bean(
//!     BeanDefinition::new("Node")
//!         .field(FieldDefinition::new("next", TypeDescriptor::named("Node")))
//!         .field(FieldDefinition::new("count", TypeDescriptor::Int)),
//! );
//!
//! let mut config = MockConfig::new()
//!     .with_schema(schema)
//!     .with_seed(42)
//!     .with_enabled_circle(true);
//!
//! let node = mock_bean("Node", &mut config).unwrap();
//! assert!(node.get_bean("next").unwrap().ptr_eq(&node));
//! node.release_graph();
//! ```
//!
//! # Mockers
//!
//! - `bool`, `char`, `byte`, `short`, `int`, `long`, `float`, `double` - uniform in the configured range or seed
//! - `big_integer`, `big_decimal` - from the long and double ranges
//! - `date` - uniform instant in the configured date range
//! - `string` - fragments of the string seed, length in the size range
//! - `list<T>`, `array<T>`, `set<T>`, `map<K, V>`, `option<T>` - registered containers
//! - schema enums and beans, generic beans such as `Page<T>`

pub mod config;
pub mod error;
pub mod mocker;
pub mod mockers;
pub mod random;
pub mod registry;
pub mod typed;

// Re-exports for convenience
pub use config::{DateRange, MockConfig, MockRange, MockSettings};
pub use error::MockError;
pub use mocker::{mock_bean, mock_type, BaseMocker, Mocker, Strategy};
pub use registry::{MockerProvider, MockerRegistry};
pub use typed::{mock, Mockable};
