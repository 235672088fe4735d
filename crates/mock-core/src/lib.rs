//! Core types for the beanmock engine.
//!
//! This crate provides the foundational types used by the generator:
//!
//! - [`TypeDescriptor`] - Runtime type handle, the dispatch key of the engine
//! - [`MockValue`] - Dynamic generated value graph
//! - [`BeanRef`] - Shared handle to a bean instance (identity semantics)
//! - [`BeanSchema`] - Bean and enum definitions loaded from YAML or built in code
//!
//! # Architecture
//!
//! ```text
//! mock-core (this crate)
//!    │
//!    └─── mock-generator  (dispatcher, leaf/bean/generic mockers)
//!            │
//!            └─── beanmock (CLI: render generated graphs as JSON)
//! ```
//!
//! # Example
//!
//! ```rust
//! use mock_core::{BeanDefinition, BeanSchema, FieldDefinition, TypeDescriptor};
//!
//! let schema = BeanSchema::new().with_bean(
//!     BeanDefinition::new("Node")
//!         .field(FieldDefinition::new("next", TypeDescriptor::named("Node")))
//!         .field(FieldDefinition::new("count", TypeDescriptor::Int)),
//! );
//!
//! let fields = schema.settable_fields("Node", &[]).unwrap();
//! assert_eq!(fields.len(), 2);
//! ```

pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use schema::{
    BeanDefinition, BeanSchema, EnumDefinition, FieldDefinition, FieldDescriptor, SchemaError,
};
pub use types::{TypeDescriptor, TypeParseError};
pub use values::{BeanInstance, BeanRef, MockValue};
