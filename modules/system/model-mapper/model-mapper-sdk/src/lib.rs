//! Model Mapper SDK
//!
//! This crate provides the public contract of the `model-mapper` module:
//! - `GroupVersionKind` / `GroupVersionResource` identifier keys
//! - `TypeHandle`, the opaque token for a concrete model type
//! - `ApiResource`, the descriptor returned by API discovery
//! - `Discovery` trait implemented by the discovery transport
//! - `DiscoveryError` for discovery failures
//!
//! ## Usage
//!
//! ```ignore
//! use model_mapper_sdk::{Discovery, TypeHandle};
//!
//! let mapper = model_mapper::ModelMapper::global();
//! mapper.refresh(&discovery, interval).await?;
//!
//! let ty = mapper.lookup_type_by_gvk("apps", "v1", "Deployment");
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root for convenience
pub use api::Discovery;
pub use error::DiscoveryError;
pub use models::{
    ApiResource, GroupVersion, GroupVersionKind, GroupVersionResource, KubernetesListObject,
    KubernetesObject, TypeHandle,
};
