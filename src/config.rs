//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::time::Duration;

/// Top-level service configuration.
///
/// Loaded once at startup via [`AnalyticsConfig::from_env`].
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Endpoint returning the conversation message array.
    pub conversations_url: String,

    /// Endpoint returning the quest user array.
    pub quest_users_url: String,

    /// Per-request timeout for upstream calls, in seconds.
    pub upstream_timeout_secs: u64,

    /// Optional static API key sent as `x-api-key` to upstream services.
    pub upstream_api_key: Option<String>,

    /// Reject `/api/v1` requests that carry no bearer session.
    pub require_session: bool,

    /// Overall timeout for an inbound request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            conversations_url: "http://localhost:8080/conversations".to_string(),
            quest_users_url: "http://localhost:8080/quests/users".to_string(),
            upstream_timeout_secs: 10,
            upstream_api_key: None,
            require_session: false,
            request_timeout_secs: 30,
        }
    }
}

impl AnalyticsConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to [`AnalyticsConfig::default`] values when a variable is
    /// not set. Calls `dotenvy::dotenv().ok()` to optionally load a `.env`
    /// file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr: SocketAddr = match std::env::var("LISTEN_ADDR") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.listen_addr,
        };

        let conversations_url =
            std::env::var("CONVERSATIONS_URL").unwrap_or(defaults.conversations_url);
        let quest_users_url = std::env::var("QUEST_USERS_URL").unwrap_or(defaults.quest_users_url);

        let upstream_timeout_secs =
            parse_env("UPSTREAM_TIMEOUT_SECS", defaults.upstream_timeout_secs);
        let upstream_api_key = std::env::var("UPSTREAM_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let require_session = parse_env_bool("REQUIRE_SESSION", defaults.require_session);
        let request_timeout_secs =
            parse_env("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs);

        Ok(Self {
            listen_addr,
            conversations_url,
            quest_users_url,
            upstream_timeout_secs,
            upstream_api_key,
            require_session,
            request_timeout_secs,
        })
    }

    /// Upstream timeout as a [`Duration`].
    #[must_use]
    pub const fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Inbound request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    parse_bool(std::env::var(key).ok().as_deref(), default)
}

fn parse_bool(raw: Option<&str>, default: bool) -> bool {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));
        assert!(!config.require_session);
        assert!(config.upstream_api_key.is_none());
    }

    #[test]
    fn bool_parsing_is_case_insensitive() {
        assert!(parse_bool(Some("TRUE"), false));
        assert!(parse_bool(Some("True"), false));
        assert!(parse_bool(Some("1"), false));
        assert!(!parse_bool(Some("False"), true));
        assert!(!parse_bool(Some("0"), true));
        assert!(parse_bool(Some("maybe"), true));
        assert!(!parse_bool(None, false));
    }

    #[test]
    fn missing_numeric_env_uses_default() {
        assert_eq!(parse_env("CAMPAIGN_ANALYTICS_TEST_UNSET_VAR", 42u64), 42);
    }
}
