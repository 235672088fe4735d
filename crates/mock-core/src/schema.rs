//! Bean schema definitions for the beanmock engine.
//!
//! A schema is the introspection facility of the engine: it lists the
//! user-defined bean types (with their parent, fields, exclusion markers and
//! setter accessibility) and the enum types the engine may be asked to build.
//!
//! ## Type Hierarchy
//!
//! - `FieldDefinition` - a declared field of a bean
//! - `BeanDefinition` - a bean type with optional parent and type parameters
//! - `EnumDefinition` - an enum type and its variants
//! - `BeanSchema` - collection of bean and enum definitions
//! - `FieldDescriptor` - a settable field resolved over an inheritance chain

use crate::types::TypeDescriptor;
use crate::values::{BeanInstance, MockValue};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Bean not found in schema
    #[error("Bean not found: {0}")]
    BeanNotFound(String),

    /// Bean cannot be constructed with a zero-argument constructor
    #[error("Bean '{0}' is abstract and has no zero-argument constructor")]
    AbstractBean(String),

    /// Parent type is not declared
    #[error("Bean '{bean}' extends unknown parent '{parent}'")]
    UnknownParent { bean: String, parent: String },

    /// A bean is its own ancestor
    #[error("Inheritance cycle through bean '{0}'")]
    InheritanceCycle(String),

    /// Enum without variants
    #[error("Enum '{0}' declares no variants")]
    EmptyEnum(String),

    /// Two definitions share a name
    #[error("Duplicate type definition: {0}")]
    DuplicateType(String),

    /// Generic bean applied to the wrong number of type arguments
    #[error("Bean '{bean}' expects {expected} type argument(s), found {found}")]
    TypeArity {
        bean: String,
        expected: usize,
        found: usize,
    },
}

// ============================================================================
// Definitions
// ============================================================================

fn default_true() -> bool {
    true
}

/// A declared field of a bean.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,

    /// Declared type
    #[serde(rename = "type")]
    pub field_type: TypeDescriptor,

    /// Exclusion marker: the engine leaves this field at its default
    #[serde(default, alias = "mock_ignore")]
    pub ignore: bool,

    /// Whether the field has an accessible setter
    #[serde(default = "default_true")]
    pub setter: bool,
}

impl FieldDefinition {
    /// Create a settable, non-excluded field.
    pub fn new(name: impl Into<String>, field_type: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            field_type,
            ignore: false,
            setter: true,
        }
    }

    /// Create a field carrying the exclusion marker.
    pub fn ignored(name: impl Into<String>, field_type: TypeDescriptor) -> Self {
        Self {
            ignore: true,
            ..Self::new(name, field_type)
        }
    }

    /// Create a field with no accessible setter.
    pub fn read_only(name: impl Into<String>, field_type: TypeDescriptor) -> Self {
        Self {
            setter: false,
            ..Self::new(name, field_type)
        }
    }
}

/// A user-defined bean type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BeanDefinition {
    /// Type name (the cache key of the cycle-breaking cache)
    pub name: String,

    /// Parent bean; `None` means the bean extends the implicit root type
    #[serde(default, rename = "extends", alias = "parent")]
    pub parent: Option<String>,

    /// Type parameter names for generic beans such as `Page<T>`
    #[serde(default)]
    pub type_params: Vec<String>,

    /// Abstract beans and interfaces cannot be constructed
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    /// Fields declared on this type (not inherited ones)
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl BeanDefinition {
    /// Create a concrete bean with no parent and no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            type_params: Vec::new(),
            is_abstract: false,
            fields: Vec::new(),
        }
    }

    /// Set the parent type.
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Add a field.
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a type parameter.
    pub fn type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(name.into());
        self
    }

    /// Mark the bean abstract.
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }
}

/// An enum type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnumDefinition {
    /// Type name
    pub name: String,

    /// Variant names
    pub variants: Vec<String>,
}

impl EnumDefinition {
    /// Create an enum definition.
    pub fn new<I, S>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }
}

/// A settable field resolved over a bean's inheritance chain.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// The bean type that declares the field
    pub owner: String,
    /// Field name
    pub name: String,
    /// Declared type, with generic parameters substituted
    pub declared_type: TypeDescriptor,
    /// Whether the field carries the exclusion marker
    pub excluded: bool,
}

fn default_version() -> u32 {
    1
}

/// Collection of bean and enum definitions.
///
/// # YAML Format
///
/// ```yaml
/// version: 1
/// beans:
///   - name: Animal
///     abstract: true
///     fields:
///       - name: name
///         type: string
///   - name: Dog
///     extends: Animal
///     fields:
///       - name: friends
///         type: list<Dog>
///       - name: secret
///         type: string
///         ignore: true
/// enums:
///   - name: Color
///     variants: [RED, GREEN]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeanSchema {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Bean definitions
    #[serde(default)]
    pub beans: Vec<BeanDefinition>,

    /// Enum definitions
    #[serde(default)]
    pub enums: Vec<EnumDefinition>,

    /// Cached bean lookup (not serialized)
    #[serde(skip)]
    bean_map: HashMap<String, usize>,

    /// Cached enum lookup (not serialized)
    #[serde(skip)]
    enum_map: HashMap<String, usize>,
}

impl BeanSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self {
            version: default_version(),
            ..Self::default()
        }
    }

    /// Load schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse schema from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let mut schema: BeanSchema = serde_yaml::from_str(yaml)?;
        schema.build_maps();
        Ok(schema)
    }

    /// Build the internal lookup maps.
    fn build_maps(&mut self) {
        self.bean_map = self
            .beans
            .iter()
            .enumerate()
            .map(|(idx, bean)| (bean.name.clone(), idx))
            .collect();
        self.enum_map = self
            .enums
            .iter()
            .enumerate()
            .map(|(idx, def)| (def.name.clone(), idx))
            .collect();
    }

    /// Add a bean definition, replacing any bean with the same name.
    pub fn add_bean(&mut self, bean: BeanDefinition) {
        match self.bean_map.get(&bean.name) {
            Some(&idx) => self.beans[idx] = bean,
            None => {
                self.bean_map.insert(bean.name.clone(), self.beans.len());
                self.beans.push(bean);
            }
        }
    }

    /// Add an enum definition, replacing any enum with the same name.
    pub fn add_enum(&mut self, def: EnumDefinition) {
        match self.enum_map.get(&def.name) {
            Some(&idx) => self.enums[idx] = def,
            None => {
                self.enum_map.insert(def.name.clone(), self.enums.len());
                self.enums.push(def);
            }
        }
    }

    /// Builder form of [`add_bean`](Self::add_bean).
    pub fn with_bean(mut self, bean: BeanDefinition) -> Self {
        self.add_bean(bean);
        self
    }

    /// Builder form of [`add_enum`](Self::add_enum).
    pub fn with_enum(mut self, def: EnumDefinition) -> Self {
        self.add_enum(def);
        self
    }

    /// Get a bean definition by name.
    pub fn get_bean(&self, name: &str) -> Option<&BeanDefinition> {
        self.bean_map.get(name).and_then(|&idx| self.beans.get(idx))
    }

    /// Get an enum definition by name.
    pub fn get_enum(&self, name: &str) -> Option<&EnumDefinition> {
        self.enum_map.get(name).and_then(|&idx| self.enums.get(idx))
    }

    /// Get all bean names in the schema.
    pub fn bean_names(&self) -> Vec<&str> {
        self.beans.iter().map(|b| b.name.as_str()).collect()
    }

    /// The bean and its ancestors, most-derived first, root excluded.
    pub fn inheritance_chain(&self, name: &str) -> Result<Vec<&BeanDefinition>, SchemaError> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self
            .get_bean(name)
            .ok_or_else(|| SchemaError::BeanNotFound(name.to_string()))?;

        loop {
            if !seen.insert(current.name.as_str()) {
                return Err(SchemaError::InheritanceCycle(current.name.clone()));
            }
            chain.push(current);
            let Some(parent) = current.parent.as_deref() else {
                break;
            };
            current = self
                .get_bean(parent)
                .ok_or_else(|| SchemaError::UnknownParent {
                    bean: current.name.clone(),
                    parent: parent.to_string(),
                })?;
        }

        Ok(chain)
    }

    /// Every field of the chain with generic parameters substituted.
    ///
    /// A field name already seen on a more derived type shadows the parent's.
    fn resolved_fields(
        &self,
        name: &str,
        type_args: &[TypeDescriptor],
    ) -> Result<Vec<(String, FieldDefinition)>, SchemaError> {
        let chain = self.inheritance_chain(name)?;
        let bindings = bind_type_params(chain[0], type_args)?;

        let mut seen = HashSet::new();
        let mut fields = Vec::new();
        for bean in chain {
            for field in &bean.fields {
                if !seen.insert(field.name.as_str()) {
                    continue;
                }
                let mut resolved = field.clone();
                resolved.field_type = field.field_type.substitute(&bindings);
                fields.push((bean.name.clone(), resolved));
            }
        }
        Ok(fields)
    }

    /// Collect the settable fields of a bean over its inheritance chain.
    pub fn settable_fields(
        &self,
        name: &str,
        type_args: &[TypeDescriptor],
    ) -> Result<Vec<FieldDescriptor>, SchemaError> {
        Ok(self
            .resolved_fields(name, type_args)?
            .into_iter()
            .filter(|(_, field)| field.setter)
            .map(|(owner, field)| FieldDescriptor {
                owner,
                name: field.name,
                declared_type: field.field_type,
                excluded: field.ignore,
            })
            .collect())
    }

    /// Construct an instance through the zero-argument constructor.
    ///
    /// Every field of the chain starts at its declared default.
    pub fn instantiate(
        &self,
        name: &str,
        type_args: &[TypeDescriptor],
    ) -> Result<BeanInstance, SchemaError> {
        let bean = self
            .get_bean(name)
            .ok_or_else(|| SchemaError::BeanNotFound(name.to_string()))?;
        if bean.is_abstract {
            return Err(SchemaError::AbstractBean(name.to_string()));
        }

        let fields = self
            .resolved_fields(name, type_args)?
            .into_iter()
            .map(|(_, field)| {
                let initial = MockValue::default_for(&field.field_type);
                (field.name, initial)
            })
            .collect();
        Ok(BeanInstance::new(name, fields))
    }

    /// Check the schema for structural errors.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut names = HashSet::new();
        for name in self
            .beans
            .iter()
            .map(|b| &b.name)
            .chain(self.enums.iter().map(|e| &e.name))
        {
            if !names.insert(name.as_str()) || TypeDescriptor::well_known(name).is_some() {
                return Err(SchemaError::DuplicateType(name.clone()));
            }
        }

        for bean in &self.beans {
            self.inheritance_chain(&bean.name)?;
        }

        if let Some(empty) = self.enums.iter().find(|e| e.variants.is_empty()) {
            return Err(SchemaError::EmptyEnum(empty.name.clone()));
        }

        Ok(())
    }
}

fn bind_type_params(
    bean: &BeanDefinition,
    type_args: &[TypeDescriptor],
) -> Result<HashMap<String, TypeDescriptor>, SchemaError> {
    // Raw use of a generic bean leaves its parameters unbound.
    if type_args.is_empty() {
        return Ok(HashMap::new());
    }
    if type_args.len() != bean.type_params.len() {
        return Err(SchemaError::TypeArity {
            bean: bean.name.clone(),
            expected: bean.type_params.len(),
            found: type_args.len(),
        });
    }
    Ok(bean
        .type_params
        .iter()
        .cloned()
        .zip(type_args.iter().cloned())
        .collect())
}
