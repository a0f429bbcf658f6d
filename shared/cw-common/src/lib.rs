//! Coworking Common Library
//!
//! Shared entity types consumed by the access policy engine and by the
//! storage/API collaborators that own these records.

pub mod types;

pub use types::*;
