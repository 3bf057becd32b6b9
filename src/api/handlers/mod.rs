//! REST endpoint handlers organized by resource.

pub mod conversations;
pub mod funnel;
pub mod system;
pub mod users;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(conversations::routes())
        .merge(funnel::routes())
        .merge(users::routes())
}
