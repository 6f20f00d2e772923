//! Auth configuration: API base URL, storage key, route paths, timings.
//!
//! SYSTEM CONTEXT
//! ==============
//! Values are baked in at compile time (`IMOB_API_URL`, `IMOB_TOKEN_KEY`) since
//! the WASM bundle has no process environment at runtime. The resolved config
//! is provided to the component tree via context.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Default session-storage key for the bearer token.
pub const DEFAULT_TOKEN_KEY: &str = "jwt_access_token";

/// Default REST API base path.
pub const DEFAULT_API_URL: &str = "/api";

/// Tokens expiring within this many seconds are refreshed proactively.
pub const REFRESH_LOOKAHEAD_SECS: i64 = 5 * 60;

/// Poll interval for callers waiting on an in-flight session check.
pub const SESSION_POLL_MS: u32 = 100;

/// Fixed application routes used as redirect targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthPaths {
    pub sign_in: String,
    pub sign_up: String,
    pub forgot_password: String,
    pub reset_password: String,
    pub verify_email: String,
    pub forbidden: String,
    pub dashboard: String,
}

impl Default for AuthPaths {
    fn default() -> Self {
        Self {
            sign_in: "/auth/sign-in".to_owned(),
            sign_up: "/auth/sign-up".to_owned(),
            forgot_password: "/auth/forgot-password".to_owned(),
            reset_password: "/auth/reset-password".to_owned(),
            verify_email: "/auth/verify-email".to_owned(),
            forbidden: "/403".to_owned(),
            dashboard: "/dashboard".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthConfig {
    pub api_url: String,
    pub token_key: String,
    pub paths: AuthPaths,
    pub refresh_lookahead_secs: i64,
    pub session_poll_ms: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            token_key: DEFAULT_TOKEN_KEY.to_owned(),
            paths: AuthPaths::default(),
            refresh_lookahead_secs: REFRESH_LOOKAHEAD_SECS,
            session_poll_ms: SESSION_POLL_MS,
        }
    }
}

impl AuthConfig {
    /// Resolve from compile-time `IMOB_API_URL` / `IMOB_TOKEN_KEY`, falling
    /// back to defaults for anything unset or blank.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(option_env!("IMOB_API_URL"), option_env!("IMOB_TOKEN_KEY"))
    }

    fn from_values(api_url: Option<&str>, token_key: Option<&str>) -> Self {
        let defaults = Self::default();
        let pick = |value: Option<&str>, fallback: String| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map_or(fallback, str::to_owned)
        };
        Self {
            api_url: pick(api_url, defaults.api_url).trim_end_matches('/').to_owned(),
            token_key: pick(token_key, defaults.token_key),
            ..defaults
        }
    }
}
