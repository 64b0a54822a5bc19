//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the pantry screens while reading and writing the
//! shared `AuthState`, `UiState`, and `PanelData` signals provided by
//! `app::App`.

pub mod ai_panel;
pub mod auth_form;
pub mod dashboard_chart;
pub mod field;
pub mod ingredient_editor;
pub mod ingredient_table;
pub mod meal_plans;
pub mod nav;
pub mod notice;
pub mod photo_import;
pub mod shopping_list;
