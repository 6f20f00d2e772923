//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its form state and pure input validation; session changes
//! go through the auth context and redirects are left to the guards.

pub mod dashboard;
pub mod forbidden;
pub mod password;
pub mod sign_in;
pub mod sign_up;
pub mod verify_email;
