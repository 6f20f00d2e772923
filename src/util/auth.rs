//! Shared redirect-target helpers for the auth guards and pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guards and sign-in pages must agree on how the originally requested path
//! travels through the `returnTo` query parameter.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

/// Query parameter carrying the path to resume after sign-in.
pub const RETURN_TO_PARAM: &str = "returnTo";

/// Path plus query string of the current location, as carried in `returnTo`.
///
/// `search` may come with or without its leading `?`.
pub fn location_path(pathname: &str, search: &str) -> String {
    match search.trim_start_matches('?') {
        "" => pathname.to_owned(),
        query => format!("{pathname}?{query}"),
    }
}

/// Sign-in URL that brings the user back to `current_path` afterwards.
pub fn sign_in_href(sign_in: &str, current_path: &str) -> String {
    format!("{sign_in}?{RETURN_TO_PARAM}={}", urlencoding::encode(current_path))
}

/// Keep a `returnTo` value only when it is a same-origin path.
///
/// `raw` is the value as the router's query map hands it over, already
/// percent-decoded once. Absolute URLs and protocol-relative `//host`
/// targets are rejected so a crafted sign-in link cannot bounce the user
/// off-site.
pub fn safe_return_to(raw: Option<&str>) -> Option<String> {
    let target = raw?.trim();
    let is_local = target.starts_with('/') && !target.starts_with("//") && !target.starts_with("/\\");
    is_local.then(|| target.to_owned())
}

/// Where a guest page sends a user who is already signed in.
pub fn post_login_target(return_to: Option<&str>, default_path: &str) -> String {
    safe_return_to(return_to).unwrap_or_else(|| default_path.to_owned())
}
