//! Domain layer for the Model Mapper module.
//!
//! Contains the naming-convention bootstrap, the registry itself, and the
//! discovery reconciliation.

pub mod bootstrap;
mod discovery_sync;
pub mod error;
pub mod naming;
pub mod service;

pub use bootstrap::{BootstrapMap, ModelCandidate, ModelCategory};
pub use error::BootstrapError;
pub use naming::NamingConvention;
pub use service::ModelMapper;
