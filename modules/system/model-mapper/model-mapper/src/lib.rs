//! Model Mapper Module Implementation
//!
//! Maps API resource identifiers (GVK and GVR) to the model types that represent
//! them, and back. The public identifier and discovery types are defined in
//! `model-mapper-sdk` and re-exported here.
//!
//! ## Architecture
//!
//! - **Bootstrap layer**: GVKs derived from model type names at startup; read-only fallback
//! - **Dynamic layer**: lock-striped bidirectional maps filled by `register` and discovery
//! - **Discovery sync**: TTL-gated refresh of plural names and namespaced flags
//! - **Default instance**: `ModelMapper::global()`, bootstrapped from `submit_model!` entries

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

// === PUBLIC API (from SDK) ===
pub use model_mapper_sdk::{
    ApiResource, Discovery, DiscoveryError, GroupVersion, GroupVersionKind, GroupVersionResource,
    KubernetesListObject, KubernetesObject, TypeHandle,
};

// === REGISTRY ===
pub use domain::{BootstrapError, ModelCandidate, ModelCategory, ModelMapper};

// === CONFIGURATION ===
pub mod config;
pub use config::{DEFAULT_DISCOVERY_REFRESH_INTERVAL, ModelMapperConfig};

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod domain;
mod infra;

// Used by `submit_model!`.
#[doc(hidden)]
pub use inventory;
