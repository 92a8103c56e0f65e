//! Storage implementations for the Model Mapper module.

mod striped_bimap;

pub use striped_bimap::StripedBiMap;
