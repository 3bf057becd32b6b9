//! # campaign-analytics
//!
//! REST service behind a campaign dashboard: turns raw community messages
//! and quest-progress records into conversation trees, topic statistics,
//! and funnel metrics.
//!
//! All analytics are pure functions in [`domain`]; this crate fetches the
//! records from upstream services and recomputes every view on request.
//!
//! ## Architecture
//!
//! ```text
//! Dashboard (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── AnalyticsService (service/)
//!     │
//!     ├── ConversationAnalyzer, FunnelAggregator (domain/)
//!     │
//!     └── DataSource → UpstreamClient (upstream/)
//!             │
//!             └── conversation + quest REST services
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod upstream;
