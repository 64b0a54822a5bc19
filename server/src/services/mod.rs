//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation and SQL so route handlers can stay focused
//! on protocol translation and auth plumbing. Row-scoped services take a
//! `&mut PgConnection` that already carries the caller's RLS identity.

pub mod ai;
pub mod auth;
pub mod dashboard;
pub mod ingredient;
pub mod meal_plan;
pub mod recipe;
pub mod session;
pub mod shopping;
pub mod store;
