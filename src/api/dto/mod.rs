//! Data Transfer Objects for query parameters and system responses.
//!
//! Analytics view-models from [`crate::domain`] are serialized directly;
//! only request shapes and catalog responses live here.

pub mod query_dto;
pub mod system_dto;

pub use query_dto::*;
pub use system_dto::*;
