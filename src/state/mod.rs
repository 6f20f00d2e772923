//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth` session status, `user` record) so
//! components can depend on small focused models.

pub mod auth;
pub mod user;
