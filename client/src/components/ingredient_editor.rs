//! Add or edit one ingredient.

use leptos::prelude::*;
use models::Ingredient;

use super::field::TextField;
use crate::i18n::MessageKey;
use crate::render::PanelData;
use crate::state::auth::AuthState;
use crate::state::forms::IngredientForm;
use crate::state::ui::UiState;
use crate::util::session;

type Getter = fn(&IngredientForm) -> &String;
type Setter = fn(&mut IngredientForm, String);

const FIELDS: [(MessageKey, &str, Getter, Setter); 7] = [
    (MessageKey::LabelName, "text", |f| &f.name, |f, v| f.name = v),
    (MessageKey::LabelQuantity, "text", |f| &f.quantity, |f, v| f.quantity = v),
    (MessageKey::LabelUnit, "text", |f| &f.unit, |f, v| f.unit = v),
    (MessageKey::LabelPurchaseDate, "date", |f| &f.purchase_date, |f, v| f.purchase_date = v),
    (MessageKey::LabelExpiry, "date", |f| &f.expiry_date, |f, v| f.expiry_date = v),
    (MessageKey::LabelLocation, "text", |f| &f.location, |f, v| f.location = v),
    (MessageKey::LabelCategory, "text", |f| &f.category, |f, v| f.category = v),
];

/// Creates a row while `editing` is empty, otherwise patches that row.
#[component]
pub fn IngredientEditor(editing: RwSignal<Option<Ingredient>>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let data = expect_context::<RwSignal<PanelData>>();
    let form = RwSignal::new(IngredientForm::default());
    let busy = RwSignal::new(false);
    let text = move |key: MessageKey| ui.with(|u| u.locale.text(key));

    Effect::new(move || {
        let next = editing.with(|e| e.as_ref().map(IngredientForm::from_ingredient).unwrap_or_default());
        form.set(next);
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let typed = form.get_untracked();
        let target = editing.get_untracked().map(|i| i.id);
        let checked = match target {
            Some(_) => typed.to_patch().map(|p| (None, Some(p))),
            None => typed.to_request().map(|n| (Some(n), None)),
        };
        let (create, patch) = match checked {
            Ok(parts) => parts,
            Err(key) => {
                ui.update(|u| u.notify_invalid(key));
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::browser;
            let token = session::token(auth);
            let result = match (target, create, patch) {
                (Some(id), _, Some(patch)) => browser::update_ingredient(&token, id, &patch)
                    .await
                    .map(|row| (row, MessageKey::IngredientUpdated)),
                (_, Some(create), _) => browser::create_ingredient(&token, &create)
                    .await
                    .map(|row| (row, MessageKey::IngredientAdded)),
                _ => {
                    busy.set(false);
                    return;
                }
            };
            match result {
                Ok((row, key)) => {
                    data.update(|d| match d.ingredients.iter_mut().find(|i| i.id == row.id) {
                        Some(slot) => *slot = row,
                        None => d.ingredients.push(row),
                    });
                    editing.set(None);
                    form.set(IngredientForm::default());
                    ui.update(|u| u.notify(key));
                }
                Err(e) => session::report(ui, auth, &e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (target, create, patch, auth, data);
    };

    view! {
        <form class="ingredient-editor" on:submit=on_submit>
            {FIELDS
                .into_iter()
                .map(|(label, kind, get, set)| {
                    view! {
                        <TextField
                            label=label
                            kind=kind
                            value=Signal::derive(move || form.with(|f| get(f).clone()))
                            on_input=Callback::new(move |v| form.update(|f| set(f, v)))
                        />
                    }
                })
                .collect_view()}
            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                {move || {
                    if editing.with(Option::is_some) { text(MessageKey::ActionSave) } else { text(MessageKey::ActionAdd) }
                }}
            </button>
            <Show when=move || editing.with(Option::is_some)>
                <button class="btn" type="button" on:click=move |_| editing.set(None)>
                    {move || text(MessageKey::ActionCancel)}
                </button>
            </Show>
        </form>
    }
}
