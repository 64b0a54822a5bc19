//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! The app has one page. It owns route-scoped orchestration (panel
//! selection and data loading) and delegates rendering to `components`.

pub mod home;
