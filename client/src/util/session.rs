//! Signal-level glue between API results and the shared UI state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components hold `RwSignal<AuthState>` and `RwSignal<UiState>` from
//! context. These helpers apply one outcome to both signals and keep the
//! stored token in step with [`AuthState`].

use leptos::prelude::*;
use models::AuthResponse;

use crate::i18n::MessageKey;
use crate::net::ClientError;
use crate::state::auth::AuthState;
use crate::state::ui::{Panel, UiState};
use crate::util::storage;

/// Token of the signed-in user; empty when signed out.
pub fn token(auth: RwSignal<AuthState>) -> String {
    auth.get_untracked().token.unwrap_or_default()
}

/// Show `err`. An expired session also signs out and forgets the token.
pub fn report(ui: RwSignal<UiState>, auth: RwSignal<AuthState>, err: &ClientError) {
    let mut next = auth.get_untracked();
    ui.update(|u| u.notify_error(&mut next, err));
    if !next.is_authenticated() {
        storage::save_token(None);
    }
    if next != auth.get_untracked() {
        auth.set(next);
    }
}

/// Hold a fresh session and open the dashboard.
pub fn signed_in(ui: RwSignal<UiState>, auth: RwSignal<AuthState>, response: AuthResponse, key: MessageKey) {
    storage::save_token(Some(&response.token));
    auth.update(|a| a.sign_in(response));
    ui.update(|u| {
        u.open(Panel::Dashboard);
        u.notify(key);
    });
}

/// Drop the session locally.
pub fn signed_out(ui: RwSignal<UiState>, auth: RwSignal<AuthState>) {
    storage::save_token(None);
    auth.update(AuthState::sign_out);
    ui.update(|u| {
        u.screen = crate::state::ui::Screen::Login;
        u.notify(MessageKey::LogoutSuccess);
    });
}
