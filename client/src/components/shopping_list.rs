//! Shopping list: add, tick off, and remove items.

use leptos::prelude::*;
use models::ShoppingItem;
use uuid::Uuid;

use super::field::TextField;
use crate::i18n::MessageKey;
use crate::render::PanelData;
use crate::state::auth::AuthState;
use crate::state::forms::ShoppingForm;
use crate::state::ui::UiState;
use crate::util::session;

/// Replace the row with the same id, or append a new one. Adding an item
/// already on the list comes back as the merged row.
fn upsert(items: &mut Vec<ShoppingItem>, item: ShoppingItem) {
    match items.iter_mut().find(|i| i.id == item.id) {
        Some(slot) => *slot = item,
        None => items.push(item),
    }
}

#[component]
pub fn ShoppingList() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let data = expect_context::<RwSignal<PanelData>>();
    let form = RwSignal::new(ShoppingForm::default());
    let text = move |key: MessageKey| ui.with(|u| u.locale.text(key));

    let on_add = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let input = match form.with_untracked(ShoppingForm::to_request) {
            Ok(input) => input,
            Err(key) => {
                ui.update(|u| u.notify_invalid(key));
                return;
            }
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::browser::add_shopping_item(&session::token(auth), &input).await {
                Ok(item) => {
                    data.update(|d| upsert(&mut d.shopping, item));
                    form.set(ShoppingForm::default());
                    ui.update(|u| u.notify(MessageKey::Saved));
                }
                Err(e) => session::report(ui, auth, &e),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (input, auth, data);
    };

    let on_toggle = move |id: Uuid, is_purchased: bool| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::browser::set_purchased(&session::token(auth), id, is_purchased).await {
                Ok(item) => data.update(|d| upsert(&mut d.shopping, item)),
                Err(e) => session::report(ui, auth, &e),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, is_purchased);
    };

    let on_delete = move |id: Uuid| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::browser::delete_shopping_item(&session::token(auth), id).await {
                Ok(()) => {
                    data.update(|d| d.shopping.retain(|i| i.id != id));
                    ui.update(|u| u.notify(MessageKey::Deleted));
                }
                Err(e) => session::report(ui, auth, &e),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    };

    let rows = move || {
        let locale = ui.with(|u| u.locale);
        let items = data.with(|d| d.shopping.clone());
        if items.is_empty() {
            return view! { <p class="empty">{locale.text(MessageKey::EmptyList)}</p> }.into_any();
        }
        items
            .into_iter()
            .map(|item| {
                let id = item.id;
                let purchased = item.is_purchased;
                let quantity = item.quantity.map(models::ingredient::format_quantity).unwrap_or_default();
                let class = if purchased { "shopping-item shopping-item--done" } else { "shopping-item" };
                view! {
                    <li class=class>
                        <label>
                            <input type="checkbox" prop:checked=purchased on:change=move |_| on_toggle(id, !purchased)/>
                            <span>{item.item_name}</span>
                            <span class="shopping-item__qty">{format!("{quantity} {}", item.unit).trim().to_owned()}</span>
                        </label>
                        <button class="btn btn--danger" on:click=move |_| on_delete(id)>
                            {locale.text(MessageKey::ActionDelete)}
                        </button>
                    </li>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <form class="shopping-form" on:submit=on_add>
            <TextField
                label=MessageKey::LabelName
                value=Signal::derive(move || form.with(|f| f.item_name.clone()))
                on_input=Callback::new(move |v| form.update(|f| f.item_name = v))
            />
            <TextField
                label=MessageKey::LabelQuantity
                value=Signal::derive(move || form.with(|f| f.quantity.clone()))
                on_input=Callback::new(move |v| form.update(|f| f.quantity = v))
            />
            <TextField
                label=MessageKey::LabelUnit
                value=Signal::derive(move || form.with(|f| f.unit.clone()))
                on_input=Callback::new(move |v| form.update(|f| f.unit = v))
            />
            <button class="btn btn--primary" type="submit">{move || text(MessageKey::ActionAdd)}</button>
        </form>
        <ul class="shopping-list">{rows}</ul>
    }
}

#[cfg(test)]
#[path = "shopping_list_test.rs"]
mod shopping_list_test;
