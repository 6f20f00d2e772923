//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read auth state from the context provider and decide what the
//! routed pages are allowed to show.

pub mod guards;
pub mod splash;
