//! Explicit session credential forwarded to upstream services.
//!
//! The wallet sign-in flow lives in the browser; this crate only receives
//! the resulting bearer token and passes it along with each fetch.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::AnalyticsError;

/// Bearer credential obtained from wallet authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a session without a known expiry.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires_at: None,
        }
    }

    /// Sets the expiry instant.
    #[must_use]
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Parses an `Authorization` header value of the form `Bearer <token>`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::MissingSession`] if the scheme is not
    /// `Bearer` or the token is empty.
    pub fn from_authorization(header: &str) -> Result<Self, AnalyticsError> {
        let (scheme, token) = header.trim().split_once(' ').ok_or_else(|| {
            AnalyticsError::MissingSession("malformed authorization header".to_string())
        })?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(AnalyticsError::MissingSession(format!(
                "unsupported authorization scheme: {scheme}"
            )));
        }
        let token = token.trim();
        if token.is_empty() {
            return Err(AnalyticsError::MissingSession("empty bearer token".to_string()));
        }
        Ok(Self::new(token))
    }

    /// Returns the bearer token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the expiry instant, if known.
    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Returns `true` if the session has a known expiry at or before `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    /// Fails with [`AnalyticsError::SessionExpired`] if the session has
    /// lapsed.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::SessionExpired`] when expired.
    pub fn ensure_valid(&self, now: DateTime<Utc>) -> Result<(), AnalyticsError> {
        if self.is_expired_at(now) {
            return Err(AnalyticsError::SessionExpired);
        }
        Ok(())
    }
}

// Keep the token out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
