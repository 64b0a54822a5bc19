//! One-line status notice under the current view.

use leptos::prelude::*;

use crate::state::ui::{NoticeKind, UiState};

/// Click to dismiss.
#[component]
pub fn NoticeLine() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let class = move || {
        ui.with(|u| match u.message.as_ref().map(|m| m.kind) {
            Some(NoticeKind::Error) => "notice notice--error",
            _ => "notice",
        })
    };
    view! {
        <Show when=move || ui.with(|u| u.message.is_some())>
            <p class=class role="status" on:click=move |_| ui.update(UiState::clear_message)>
                {move || ui.with(|u| u.message.as_ref().map(|m| m.text.clone()).unwrap_or_default())}
            </p>
        </Show>
    }
}
