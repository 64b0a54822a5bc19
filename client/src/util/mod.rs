//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `chart` and `text` are pure functions used by the renderers and forms.
//! `photo`, `session`, and `storage` isolate browser concerns from page and
//! component logic.

pub mod chart;
pub mod photo;
pub mod session;
pub mod storage;
pub mod text;
