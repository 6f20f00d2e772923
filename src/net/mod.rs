//! Networking modules for the auth REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` owns the shared default `Authorization` header, `api` issues the
//! `/auth/*` calls, and `types` defines the wire schema.

pub mod api;
pub mod client;
pub mod types;
