//! Labelled text input bound to a signal.

use leptos::prelude::*;

use crate::i18n::MessageKey;
use crate::state::ui::UiState;

#[component]
pub fn TextField(
    label: MessageKey,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional)] kind: Option<&'static str>,
) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    view! {
        <label class="field">
            <span class="field__label">{move || ui.with(|u| u.locale.text(label))}</span>
            <input
                class="field__input"
                type=kind.unwrap_or("text")
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </label>
    }
}
