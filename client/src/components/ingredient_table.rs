//! Ingredient table with expiry countdowns, edit, and delete.

use leptos::prelude::*;
use models::expiry;
use models::ingredient::format_quantity;
use models::Ingredient;
use uuid::Uuid;

use crate::i18n::MessageKey;
use crate::render::PanelData;
use crate::render::ingredients::{status_key, status_marker};
use crate::state::auth::AuthState;
use crate::state::ui::UiState;
use crate::util::session;

/// Rows come from `PanelData::ingredients`; the edit button hands the row
/// to `editing`.
#[component]
pub fn IngredientTable(editing: RwSignal<Option<Ingredient>>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let data = expect_context::<RwSignal<PanelData>>();

    let on_delete = move |id: Uuid| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::browser::delete_ingredient(&session::token(auth), id).await {
                Ok(()) => {
                    data.update(|d| d.ingredients.retain(|i| i.id != id));
                    ui.update(|u| u.notify(MessageKey::IngredientDeleted));
                }
                Err(e) => session::report(ui, auth, &e),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, auth, data);
    };

    move || {
        let locale = ui.with(|u| u.locale);
        let today = models::date::today();
        let (items, soon_days) = data.with(|d| (d.ingredients.clone(), d.soon_days));
        if items.is_empty() {
            return view! { <p class="empty">{locale.text(MessageKey::EmptyList)}</p> }.into_any();
        }
        let rows = items
            .into_iter()
            .map(|item| {
                let status = item.status(today, soon_days);
                let countdown = expiry::days_left(item.expiry_date, today)
                    .map_or_else(|| locale.text(MessageKey::StatusNoExpiry).to_owned(), expiry::d_day_label);
                let id = item.id;
                let quantity = format!("{} {}", format_quantity(item.quantity), item.unit);
                let (name, location) = (item.name.clone(), item.location.clone());
                view! {
                    <tr class=format!("ingredient ingredient--{}", status.as_str())>
                        <td title=locale.text(status_key(status))>{status_marker(status)}</td>
                        <td>{name}</td>
                        <td>{quantity.trim().to_owned()}</td>
                        <td>{location}</td>
                        <td>{countdown}</td>
                        <td>
                            <button class="btn" on:click=move |_| editing.set(Some(item.clone()))>
                                {locale.text(MessageKey::ActionEdit)}
                            </button>
                            <button class="btn btn--danger" on:click=move |_| on_delete(id)>
                                {locale.text(MessageKey::ActionDelete)}
                            </button>
                        </td>
                    </tr>
                }
            })
            .collect_view();
        view! {
            <table class="ingredients">
                <thead>
                    <tr>
                        <th></th>
                        <th>{locale.text(MessageKey::LabelName)}</th>
                        <th>{locale.text(MessageKey::LabelQuantity)}</th>
                        <th>{locale.text(MessageKey::LabelLocation)}</th>
                        <th>{locale.text(MessageKey::LabelExpiry)}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        }
        .into_any()
    }
}
