//! Client-side session lifecycle and route guarding.
//!
//! ARCHITECTURE
//! ============
//! `token` decodes claims, `storage` + `session` keep the bearer token in
//! `sessionStorage` and on the shared HTTP client, `holder` owns the auth
//! state machine, `context` publishes it to Leptos, and `guard` decides what
//! protected and guest-only routes may render.

pub mod context;
pub mod guard;
pub mod holder;
pub mod session;
pub mod storage;
pub mod token;

#[cfg(test)]
#[path = "fake_api_test.rs"]
pub(crate) mod fake_api_test;
