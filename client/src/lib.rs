//! # client
//!
//! Leptos + WASM web client for the pantry API, plus the shared state,
//! HTTP client and plain-text renderers the `cli` front-end builds on.
//!
//! ARCHITECTURE
//! ============
//! `state` holds session, screen selection and form buffers; the web app
//! wraps them in signals and the CLI owns them directly. `net` talks HTTP
//! (`browser` from WASM, `api` natively), `render` turns records into
//! terminal text, and `i18n` supplies every user-facing string.

pub mod app;
pub mod components;
pub mod i18n;
pub mod net;
pub mod pages;
pub mod render;
pub mod state;
pub mod util;

/// WASM entry point: attach the app to the server-rendered markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
