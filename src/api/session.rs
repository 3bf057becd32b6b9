//! Request extractor turning bearer headers into a [`Session`].

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{DateTime, Utc};

use crate::app_state::AppState;
use crate::domain::Session;
use crate::error::AnalyticsError;

/// Optional header carrying the session expiry as RFC 3339.
pub const SESSION_EXPIRES_HEADER: &str = "x-session-expires-at";

/// Session supplied with the request, if any.
///
/// Rejects with 401 when `require_session` is set and no bearer token is
/// present. A present but malformed `Authorization` header is always
/// rejected.
#[derive(Debug, Clone, Default)]
pub struct RequestSession(pub Option<Session>);

impl RequestSession {
    /// Borrows the inner session.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.0.as_ref()
    }
}

impl FromRequestParts<AppState> for RequestSession {
    type Rejection = AnalyticsError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(AUTHORIZATION) else {
            if state.require_session {
                return Err(AnalyticsError::MissingSession(
                    "authorization header required".to_string(),
                ));
            }
            return Ok(Self(None));
        };

        let raw = raw.to_str().map_err(|_| {
            AnalyticsError::MissingSession("authorization header is not ASCII".to_string())
        })?;
        let mut session = Session::from_authorization(raw)?;

        if let Some(expiry) = parts.headers.get(SESSION_EXPIRES_HEADER) {
            let expires_at = expiry
                .to_str()
                .ok()
                .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
                .ok_or_else(|| {
                    AnalyticsError::InvalidRequest(format!(
                        "{SESSION_EXPIRES_HEADER} must be an RFC 3339 timestamp"
                    ))
                })?;
            session = session.with_expiry(expires_at.with_timezone(&Utc));
        }

        Ok(Self(Some(session)))
    }
}
