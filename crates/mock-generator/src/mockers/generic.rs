//! Parameterized type mocker.

use crate::config::MockConfig;
use crate::error::MockError;
use crate::mocker::{BaseMocker, Mocker};
use mock_core::{MockValue, TypeDescriptor};
use tracing::trace;

/// Peels a parameterized type into its raw type and type arguments and
/// re-enters the dispatcher with both, so `list<Node>` reaches the `list`
/// mocker knowing its element type and `Page<int>` reaches the bean mocker
/// with `T = int`.
#[derive(Debug, Clone)]
pub struct GenericMocker {
    raw: String,
    type_args: Vec<TypeDescriptor>,
}

impl GenericMocker {
    pub fn new(raw: impl Into<String>, type_args: Vec<TypeDescriptor>) -> Self {
        Self {
            raw: raw.into(),
            type_args,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn type_args(&self) -> &[TypeDescriptor] {
        &self.type_args
    }
}

impl Mocker for GenericMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        trace!("Resolving {} with {} type argument(s)", self.raw, self.type_args.len());
        BaseMocker::with_args(TypeDescriptor::named(self.raw.as_str()), self.type_args.clone())
            .mock(config)
    }
}
