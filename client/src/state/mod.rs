//! Client-side state: session, screen selection, and form buffers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Plain data shared by both front-ends. Nothing here performs I/O; `net`
//! fills it, the web app wraps each piece in an `RwSignal`, and the CLI
//! owns it directly and prints through `render`.

pub mod auth;
pub mod forms;
pub mod ui;
