//! Public error types for the `model-mapper` module.
//!
//! Lookups never fail: a missing mapping is an absent result. The only error that
//! crosses the module boundary is a failed discovery round-trip.

use thiserror::Error;

/// Errors reported by a `Discovery` implementation and propagated unchanged by
/// `ModelMapper::refresh`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    /// The discovery endpoint could not be reached.
    #[error("Discovery transport failed: {0}")]
    Transport(String),

    /// The discovery payload could not be decoded.
    #[error("Discovery response could not be decoded: {0}")]
    Decode(String),

    /// Any other discovery failure.
    #[error("Discovery failed: {0}")]
    Other(String),
}

impl DiscoveryError {
    /// Creates a `Transport` error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a `Decode` error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Creates an `Other` error.
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Returns `true` if this is a transport error.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if this is a decode error.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
