//! Domain error types for the Model Mapper module.
//!
//! Bootstrap errors never leave the module: the offending candidate is logged and
//! skipped, and bootstrapping carries on with the rest.

use thiserror::Error;

/// Why a bootstrap candidate could not be turned into a mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    /// The registered name is not a plain type identifier.
    #[error("Invalid model type name: '{0}'")]
    InvalidTypeName(String),

    /// Stripping the group and version prefixes left nothing for the kind.
    #[error("Model type name '{0}' has no kind after its group and version prefixes")]
    EmptyKind(String),
}

impl BootstrapError {
    /// Creates an `InvalidTypeName` error.
    #[must_use]
    pub fn invalid_type_name(name: impl Into<String>) -> Self {
        Self::InvalidTypeName(name.into())
    }

    /// Creates an `EmptyKind` error.
    #[must_use]
    pub fn empty_kind(name: impl Into<String>) -> Self {
        Self::EmptyKind(name.into())
    }
}
