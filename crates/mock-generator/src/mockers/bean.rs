//! Bean mocker.
//!
//! Builds a user-defined bean: construct it through the schema, record it in
//! the call-local instance cache, then populate every settable, non-excluded
//! field by re-entering the dispatcher.
//!
//! The instance is cached *before* its fields are populated. With cycle
//! protection on, a field that refers back to a type already under
//! construction receives that same instance, which is what terminates cyclic
//! type graphs (`Node { next: Node }` yields `node.next == node`).
//!
//! The cache is keyed by type name only. Two unrelated fields of the same bean
//! type within one call therefore share one instance.

use crate::config::MockConfig;
use crate::error::MockError;
use crate::mocker::{BaseMocker, Mocker};
use mock_core::{BeanRef, FieldDescriptor, MockValue, TypeDescriptor};
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct BeanMocker {
    type_name: String,
    type_args: Vec<TypeDescriptor>,
}

impl BeanMocker {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self::with_args(type_name, Vec::new())
    }

    /// Mocker for a generic bean applied to type arguments.
    pub fn with_args(type_name: impl Into<String>, type_args: Vec<TypeDescriptor>) -> Self {
        Self {
            type_name: type_name.into(),
            type_args,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Whether a field has to keep its default value.
    fn skip_field(&self, field: &FieldDescriptor, config: &MockConfig) -> bool {
        if field.excluded {
            trace!("Skipping excluded field {}.{}", field.owner, field.name);
            return true;
        }

        match &field.declared_type {
            // Containers nobody can produce stay at their default.
            TypeDescriptor::Parameterized { raw, .. } if !BaseMocker::resolves(raw, config) => {
                debug!(
                    "No mocker for {} on {}.{}, leaving default",
                    field.declared_type, field.owner, field.name
                );
                true
            }
            // Parameters of a raw generic bean are never bound.
            TypeDescriptor::Named(name) if self.is_unbound_param(&field.owner, name, config) => {
                debug!(
                    "Type parameter {} of {}.{} is unbound, leaving default",
                    name, field.owner, field.name
                );
                true
            }
            _ => false,
        }
    }

    fn is_unbound_param(&self, owner: &str, name: &str, config: &MockConfig) -> bool {
        if BaseMocker::resolves(name, config) {
            return false;
        }
        config
            .schema()
            .get_bean(owner)
            .is_some_and(|bean| bean.type_params.iter().any(|p| p == name))
    }
}

impl Mocker for BeanMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        if config.is_enabled_circle() {
            if let Some(cached) = config.cached_bean(&self.type_name) {
                trace!("Reusing cached {} instance", self.type_name);
                return Ok(MockValue::Bean(cached));
            }
        }

        let instance = config
            .schema()
            .instantiate(&self.type_name, &self.type_args)
            .map_err(|source| MockError::Construction {
                type_name: self.type_name.clone(),
                source,
            })?;
        let bean = BeanRef::new(instance);
        config.cache_bean(self.type_name.clone(), bean.clone());

        let fields = config.settable_fields(&self.type_name, &self.type_args)?;
        for field in fields.iter() {
            if self.skip_field(field, config) {
                continue;
            }
            let value = BaseMocker::new(field.declared_type.clone()).mock(config)?;
            bean.set(&field.name, value);
        }

        Ok(MockValue::Bean(bean))
    }
}
