//! Error types for mock generation.

use mock_core::SchemaError;
use thiserror::Error;

/// Errors that can occur while generating a value.
///
/// Every variant aborts the whole top-level call; no partial instance is returned.
#[derive(Error, Debug)]
pub enum MockError {
    /// A configured range cannot be sampled.
    #[error("Invalid {kind} range [{min}, {max}]: {reason}")]
    InvalidRange {
        kind: &'static str,
        min: String,
        max: String,
        reason: &'static str,
    },

    /// A candidate sequence (char seed, string seed, enum variants) is empty.
    #[error("{0} seed is empty")]
    EmptySeed(String),

    /// A date bound could not be resolved to an instant.
    #[error("Invalid date '{0}': expected RFC 3339 or YYYY-MM-DD")]
    InvalidDate(String),

    /// The bean could not be built through its zero-argument constructor.
    #[error("Failed to construct bean '{type_name}': {source}")]
    Construction {
        type_name: String,
        #[source]
        source: SchemaError,
    },

    /// No strategy can produce the type.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// A generated value does not fit the requested Rust type.
    #[error("Cannot convert {found} value to {target}")]
    Conversion { target: String, found: &'static str },

    /// Schema lookup failure.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
}

impl MockError {
    /// Whether the error comes from the configuration rather than the types.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidRange { .. } | Self::EmptySeed(_) | Self::InvalidDate(_)
        )
    }
}
