//! Sign-in state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Holds the bearer token returned by login or registration. The view
//! dispatcher reads [`AuthState::is_authenticated`] to decide between the
//! login screen and the main screen.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use models::{AuthResponse, UserProfile};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl AuthState {
    /// State restored from a stored token whose profile is not loaded yet.
    pub fn from_token(token: Option<String>) -> Self {
        let token = token.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty());
        Self { token, user: None }
    }

    /// True once a non-empty session token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn sign_in(&mut self, response: AuthResponse) {
        self.token = Some(response.token);
        self.user = Some(response.user);
    }

    pub fn sign_out(&mut self) {
        self.token = None;
        self.user = None;
    }

    /// Display name of the signed-in user, falling back to the email.
    pub fn display_name(&self) -> Option<&str> {
        let user = self.user.as_ref()?;
        if user.name.trim().is_empty() { Some(user.email.as_str()) } else { Some(user.name.as_str()) }
    }
}
