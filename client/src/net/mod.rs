//! Networking for the pantry REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` is the native `reqwest` client used by the terminal front-end;
//! `browser` issues the same requests from the web app through `gloo-net`.
//! `error` turns every failure from either side into a value the UI can
//! localize.

#[cfg(not(target_arch = "wasm32"))]
pub mod api;
pub mod browser;
pub mod error;

#[cfg(not(target_arch = "wasm32"))]
pub use api::{ApiClient, IngredientQuery};
pub use error::ClientError;
