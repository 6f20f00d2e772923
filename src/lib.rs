//! # imob-admin
//!
//! Leptos + WASM front end for the real-estate admin dashboard: session
//! lifecycle against the `/auth/*` REST API, and the route guards that keep
//! listing, sales and team screens behind sign-in.
//!
//! Decision logic (token decoding, the session state machine, guard
//! evaluation) is plain Rust and unit-tested natively; browser glue is gated
//! behind the `hydrate` feature.

pub mod app;
pub mod auth;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install panic/console logging and hydrate the app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger already installed: {e}");
    }
    leptos::mount::hydrate_body(app::App);
}
