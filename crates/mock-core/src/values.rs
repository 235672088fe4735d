//! Value representations for the beanmock engine.
//!
//! `MockValue` is the dynamic value graph produced by the engine. Bean nodes are
//! shared handles (`BeanRef`) so that the identity of an instance survives being
//! referenced from several places, including from inside itself.

use crate::types::TypeDescriptor;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// A generated value.
///
/// Equality is structural for every variant except `Bean`, which compares by
/// identity: two bean values are equal only when they are the same instance.
#[derive(Debug, Clone, PartialEq)]
pub enum MockValue {
    /// Absent value (default of every non-primitive type)
    Null,
    /// Boolean value
    Bool(bool),
    /// Single character
    Char(char),
    /// 8-bit signed integer
    Byte(i8),
    /// 16-bit signed integer
    Short(i16),
    /// 32-bit signed integer
    Int(i32),
    /// 64-bit signed integer
    Long(i64),
    /// 32-bit floating point
    Float(f32),
    /// 64-bit floating point
    Double(f64),
    /// Wide integer
    BigInteger(i128),
    /// Exact decimal
    BigDecimal(Decimal),
    /// UTC timestamp
    Date(DateTime<Utc>),
    /// Text
    String(String),
    /// Ordered elements (lists and arrays)
    List(Vec<MockValue>),
    /// Elements without duplicates
    Set(Vec<MockValue>),
    /// Key/value entries without duplicate keys
    Map(Vec<(MockValue, MockValue)>),
    /// Enum variant name
    Enum(String),
    /// Bean instance
    Bean(BeanRef),
}

impl MockValue {
    /// The value a freshly constructed field of the given type holds.
    ///
    /// Primitive types default to zero; everything else defaults to `Null`.
    pub fn default_for(descriptor: &TypeDescriptor) -> Self {
        match descriptor {
            TypeDescriptor::Bool => Self::Bool(false),
            TypeDescriptor::Char => Self::Char('\0'),
            TypeDescriptor::Byte => Self::Byte(0),
            TypeDescriptor::Short => Self::Short(0),
            TypeDescriptor::Int => Self::Int(0),
            TypeDescriptor::Long => Self::Long(0),
            TypeDescriptor::Float => Self::Float(0.0),
            TypeDescriptor::Double => Self::Double(0.0),
            _ => Self::Null,
        }
    }

    /// Short name of the variant, used in conversion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
            Self::Byte(_) => "byte",
            Self::Short(_) => "short",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::BigInteger(_) => "big_integer",
            Self::BigDecimal(_) => "big_decimal",
            Self::Date(_) => "date",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
            Self::Enum(_) => "enum",
            Self::Bean(_) => "bean",
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Short(i) => Some(*i as i32),
            Self::Byte(i) => Some(*i as i32),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Long(i) => Some(*i),
            other => other.as_i32().map(i64::from),
        }
    }

    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(f) => Some(*f),
            Self::Float(f) => Some(*f as f64),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a bean handle.
    pub fn as_bean(&self) -> Option<&BeanRef> {
        match self {
            Self::Bean(bean) => Some(bean),
            _ => None,
        }
    }

    /// Try to get the elements of a list or set.
    pub fn as_elements(&self) -> Option<&[MockValue]> {
        match self {
            Self::List(items) | Self::Set(items) => Some(items),
            _ => None,
        }
    }
}

/// A constructed bean: its type name and its fields in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct BeanInstance {
    type_name: String,
    fields: Vec<(String, MockValue)>,
}

impl BeanInstance {
    /// Create an instance with the given fields at their initial values.
    pub fn new(type_name: impl Into<String>, fields: Vec<(String, MockValue)>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    /// The bean's type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Get a field value by name.
    pub fn get(&self, field: &str) -> Option<&MockValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Assign a field. Returns `false` when the bean has no such field.
    pub fn set(&mut self, field: &str, value: MockValue) -> bool {
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, slot)) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Iterate over `(name, value)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &MockValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Shared, mutable handle to a bean instance.
///
/// Cloning the handle does not clone the bean. Equality is identity.
#[derive(Clone)]
pub struct BeanRef(Rc<RefCell<BeanInstance>>);

impl BeanRef {
    /// Wrap a freshly constructed instance.
    pub fn new(instance: BeanInstance) -> Self {
        Self(Rc::new(RefCell::new(instance)))
    }

    /// Borrow the instance.
    ///
    /// Panics if the instance is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, BeanInstance> {
        self.0.borrow()
    }

    /// Mutably borrow the instance.
    pub fn borrow_mut(&self) -> RefMut<'_, BeanInstance> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same instance.
    pub fn ptr_eq(&self, other: &BeanRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Stable identity of the instance for the lifetime of the handle.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    /// The bean's type name.
    pub fn type_name(&self) -> String {
        self.borrow().type_name().to_string()
    }

    /// Clone out a field value.
    pub fn get(&self, field: &str) -> Option<MockValue> {
        self.borrow().get(field).cloned()
    }

    /// Shortcut for a bean-valued field.
    pub fn get_bean(&self, field: &str) -> Option<BeanRef> {
        self.borrow().get(field).and_then(MockValue::as_bean).cloned()
    }

    /// Assign a field through the setter. Returns `false` for unknown fields.
    pub fn set(&self, field: &str, value: MockValue) -> bool {
        self.borrow_mut().set(field, value)
    }

    /// Reset every bean or container field reachable from this instance to `Null`.
    ///
    /// Cyclic graphs are reference cycles and are only reclaimed once broken.
    pub fn release_graph(&self) {
        let mut visited = HashSet::new();
        release(&MockValue::Bean(self.clone()), &mut visited);
    }
}

fn release(value: &MockValue, visited: &mut HashSet<usize>) {
    match value {
        MockValue::Bean(bean) => {
            if !visited.insert(bean.id()) {
                return;
            }
            let mut children = Vec::new();
            for (_, slot) in bean.borrow_mut().fields.iter_mut() {
                if matches!(
                    slot,
                    MockValue::Bean(_) | MockValue::List(_) | MockValue::Set(_) | MockValue::Map(_)
                ) {
                    children.push(std::mem::replace(slot, MockValue::Null));
                }
            }
            for child in &children {
                release(child, visited);
            }
        }
        MockValue::List(items) | MockValue::Set(items) => {
            for item in items {
                release(item, visited);
            }
        }
        MockValue::Map(entries) => {
            for (key, value) in entries {
                release(key, visited);
                release(value, visited);
            }
        }
        _ => {}
    }
}

impl PartialEq for BeanRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for BeanRef {}

// Shallow on purpose: a derived impl would recurse forever on cyclic graphs.
impl fmt::Debug for BeanRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(instance) => write!(f, "BeanRef({}@{:#x})", instance.type_name(), self.id()),
            Err(_) => write!(f, "BeanRef(<borrowed>@{:#x})", self.id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> BeanRef {
        BeanRef::new(BeanInstance::new(
            "Node",
            vec![
                ("next".to_string(), MockValue::Null),
                ("count".to_string(), MockValue::Int(0)),
            ],
        ))
    }

    #[test]
    fn test_default_for() {
        assert_eq!(MockValue::default_for(&TypeDescriptor::Int), MockValue::Int(0));
        assert_eq!(
            MockValue::default_for(&TypeDescriptor::Bool),
            MockValue::Bool(false)
        );
        assert_eq!(MockValue::default_for(&TypeDescriptor::String), MockValue::Null);
        assert_eq!(
            MockValue::default_for(&TypeDescriptor::named("Node")),
            MockValue::Null
        );
    }

    #[test]
    fn test_bean_set_and_get() {
        let bean = node();
        assert!(bean.set("count", MockValue::Int(7)));
        assert!(!bean.set("missing", MockValue::Int(7)));
        assert_eq!(bean.get("count"), Some(MockValue::Int(7)));
        assert_eq!(bean.type_name(), "Node");
    }

    #[test]
    fn test_bean_equality_is_identity() {
        let a = node();
        let b = node();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(*a.borrow(), *b.borrow());
    }

    #[test]
    fn test_self_reference_debug_terminates() {
        let bean = node();
        bean.set("next", MockValue::Bean(bean.clone()));
        let rendered = format!("{:?}", bean.borrow());
        assert!(rendered.contains("BeanRef(Node@"));
        assert!(bean.get_bean("next").unwrap().ptr_eq(&bean));
    }

    #[test]
    fn test_release_graph_breaks_cycle() {
        let bean = node();
        bean.set("next", MockValue::Bean(bean.clone()));
        assert_eq!(Rc::strong_count(&bean.0), 2);

        bean.release_graph();
        assert_eq!(bean.get("next"), Some(MockValue::Null));
        assert_eq!(bean.get("count"), Some(MockValue::Int(0)));
        assert_eq!(Rc::strong_count(&bean.0), 1);
    }

    #[test]
    fn test_numeric_accessors() {
        assert_eq!(MockValue::Short(3).as_i32(), Some(3));
        assert_eq!(MockValue::Int(3).as_i64(), Some(3));
        assert_eq!(MockValue::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(MockValue::Enum("RED".into()).as_str(), Some("RED"));
        assert!(MockValue::Null.is_null());
    }
}
