//! Registry of mockers keyed by type name.
//!
//! This is the extension point of the dispatcher: container mockers are
//! registered here by default, and callers register concrete mockers for
//! abstract beans or for types the schema does not describe.

use crate::error::MockError;
use crate::mocker::Mocker;
use crate::mockers::collection;
use mock_core::TypeDescriptor;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builds a mocker for a registered type, given the type arguments it was used with.
pub trait MockerProvider: Send + Sync {
    fn provide(&self, type_args: &[TypeDescriptor]) -> Result<Box<dyn Mocker>, MockError>;
}

struct FnProvider<F>(F);

impl<F> MockerProvider for FnProvider<F>
where
    F: Fn(&[TypeDescriptor]) -> Result<Box<dyn Mocker>, MockError> + Send + Sync,
{
    fn provide(&self, type_args: &[TypeDescriptor]) -> Result<Box<dyn Mocker>, MockError> {
        (self.0)(type_args)
    }
}

struct FixedProvider<M>(M);

impl<M> MockerProvider for FixedProvider<M>
where
    M: Mocker + Clone + Send + Sync + 'static,
{
    fn provide(&self, _type_args: &[TypeDescriptor]) -> Result<Box<dyn Mocker>, MockError> {
        Ok(Box::new(self.0.clone()))
    }
}

/// Type name to mocker provider table.
#[derive(Clone, Default)]
pub struct MockerRegistry {
    providers: HashMap<String, Arc<dyn MockerProvider>>,
}

impl MockerRegistry {
    /// A registry with no providers at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with the container mockers: `list`, `array`, `set`, `map`, `option`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register_fn("list", collection::list_provider);
        registry.register_fn("array", collection::list_provider);
        registry.register_fn("set", collection::set_provider);
        registry.register_fn("map", collection::map_provider);
        registry.register_fn("option", collection::option_provider);
        registry
    }

    /// Register a provider, replacing any previous one for the name.
    pub fn register<P>(&mut self, name: impl Into<String>, provider: P)
    where
        P: MockerProvider + 'static,
    {
        self.providers.insert(name.into(), Arc::new(provider));
    }

    /// Register a provider function.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, provider: F)
    where
        F: Fn(&[TypeDescriptor]) -> Result<Box<dyn Mocker>, MockError> + Send + Sync + 'static,
    {
        self.register(name, FnProvider(provider));
    }

    /// Register a mocker that ignores type arguments.
    pub fn register_mocker<M>(&mut self, name: impl Into<String>, mocker: M)
    where
        M: Mocker + Clone + Send + Sync + 'static,
    {
        self.register(name, FixedProvider(mocker));
    }

    /// Remove a provider. Returns whether one was registered.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.providers.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn MockerProvider>> {
        self.providers.get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for MockerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockerRegistry")
            .field("names", &self.names())
            .finish()
    }
}
