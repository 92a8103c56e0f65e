//! Infrastructure layer for the Model Mapper module.
//!
//! Contains the concurrent storage primitives used by the registry.

pub mod storage;

pub use storage::StripedBiMap;
