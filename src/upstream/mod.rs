//! Upstream boundary: data source trait, HTTP client, and envelope
//! unwrapping.

pub mod client;
pub mod envelope;
pub mod source;

pub use client::UpstreamClient;
pub use source::{DataSource, StaticDataSource};
