//! Service layer: business logic orchestration.
//!
//! [`AnalyticsService`] fetches records through a
//! [`crate::upstream::DataSource`] and hands them to the pure analyzers in
//! [`crate::domain`].

pub mod analytics_service;

pub use analytics_service::AnalyticsService;
