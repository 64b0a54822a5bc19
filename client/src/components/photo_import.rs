//! Photo upload that recognizes ingredients and adds them to the pantry.

use leptos::prelude::*;
use models::{NewIngredient, RecognizedIngredients};

use crate::i18n::MessageKey;
use crate::render::PanelData;
use crate::render::ai::recognized_line;
use crate::state::auth::AuthState;
use crate::state::ui::UiState;
use crate::util::session;

#[component]
pub fn PhotoImport() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let data = expect_context::<RwSignal<PanelData>>();
    let busy = RwSignal::new(false);
    let found = RwSignal::new(None::<RecognizedIngredients>);
    let text = move |key: MessageKey| ui.with(|u| u.locale.text(key));

    let on_pick = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;
            let file = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            let Some(file) = file else {
                return;
            };
            busy.set(true);
            found.set(None);
            leptos::task::spawn_local(async move {
                let result = match crate::util::photo::read_file(file).await {
                    Ok(req) => crate::net::browser::recognize_ingredients(&session::token(auth), &req).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(result) => {
                        if result.ingredients.is_empty() {
                            ui.update(|u| u.notify(MessageKey::RecognizedNothing));
                        }
                        found.set(Some(result));
                    }
                    Err(e) => session::report(ui, auth, &e),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let on_add_all = move |_| {
        let today = models::date::today();
        let rows: Vec<NewIngredient> = found.with_untracked(|f| {
            f.as_ref()
                .map(|r| r.ingredients.iter().map(|i| i.to_new_ingredient(today)).collect())
                .unwrap_or_default()
        });
        if rows.is_empty() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let token = session::token(auth);
            for row in rows {
                match crate::net::browser::create_ingredient(&token, &row).await {
                    Ok(created) => data.update(|d| d.ingredients.push(created)),
                    Err(e) => {
                        session::report(ui, auth, &e);
                        busy.set(false);
                        return;
                    }
                }
            }
            found.set(None);
            ui.update(|u| u.notify(MessageKey::IngredientAdded));
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (rows, data);
    };

    let results = move || {
        let locale = ui.with(|u| u.locale);
        found.with(|f| {
            f.as_ref().filter(|r| !r.ingredients.is_empty()).map(|r| {
                let rows = r
                    .ingredients
                    .iter()
                    .map(|i| view! { <li>{recognized_line(i)}</li> })
                    .collect_view();
                let confidence = format!("{}: {:.1}/10", locale.text(MessageKey::LabelConfidence), r.confidence);
                view! {
                    <div class="photo-import__results">
                        <ul>{rows}</ul>
                        <p class="photo-import__confidence">{confidence}</p>
                        <button class="btn btn--primary" on:click=on_add_all disabled=move || busy.get()>
                            {locale.text(MessageKey::ActionAddAll)}
                        </button>
                    </div>
                }
            })
        })
    };

    view! {
        <section class="photo-import">
            <label class="field">
                <span class="field__label">{move || text(MessageKey::ActionRecognize)}</span>
                <input
                    class="field__input"
                    type="file"
                    accept="image/*"
                    aria-label=move || text(MessageKey::LabelPhoto)
                    on:change=on_pick
                    disabled=move || busy.get()
                />
            </label>
            <Show when=move || busy.get()>
                <p class="empty">{move || text(MessageKey::Loading)}</p>
            </Show>
            {results}
        </section>
    }
}
