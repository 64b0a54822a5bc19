//! AI panels: recipe ideas from preferences and allergies, meal planning,
//! nutrition analysis, and price estimates.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`AskForm`] backs every panel; each panel shows and submits only
//! its own fields. The latest reply lands in `PanelData::ai_reply`, which
//! the page clears whenever the panel changes.

use leptos::prelude::*;
use models::AiReply;

use super::field::TextField;
use crate::i18n::MessageKey;
use crate::render::PanelData;
use crate::state::auth::AuthState;
use crate::state::forms::AskForm;
use crate::state::ui::{Panel, UiState};
use crate::util::session;

type Getter = fn(&AskForm) -> &String;
type Setter = fn(&mut AskForm, String);
type Field = (MessageKey, Getter, Setter);

fn field(label: MessageKey, get: Getter, set: Setter) -> Field {
    (label, get, set)
}

fn fields(panel: Panel) -> Vec<Field> {
    let preferences = field(
        MessageKey::LabelPreferences,
        |f| &f.preferences.preferences_text,
        |f, v| f.preferences.preferences_text = v,
    );
    let allergies =
        field(MessageKey::LabelAllergies, |f| &f.preferences.allergies_text, |f, v| f.preferences.allergies_text = v);
    match panel {
        Panel::Recommend => vec![preferences, allergies],
        Panel::MealPlan => vec![
            field(MessageKey::LabelDays, |f| &f.days, |f, v| f.days = v),
            field(MessageKey::LabelGoals, |f| &f.goals, |f, v| f.goals = v),
            preferences,
            allergies,
        ],
        Panel::Nutrition => vec![
            field(MessageKey::LabelMeals, |f| &f.meals_text, |f, v| f.meals_text = v),
            field(MessageKey::LabelNotes, |f| &f.notes, |f, v| f.notes = v),
        ],
        Panel::Price => vec![field(MessageKey::LabelItems, |f| &f.items_text, |f, v| f.items_text = v)],
        Panel::Dashboard | Panel::Ingredients | Panel::Shopping => Vec::new(),
    }
}

#[component]
pub fn AiPanel(panel: Panel) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let data = expect_context::<RwSignal<PanelData>>();
    let form = RwSignal::new(AskForm::default());
    let busy = RwSignal::new(false);
    let text = move |key: MessageKey| ui.with(|u| u.locale.text(key));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let typed = form.get_untracked();
        let meal_plan = if panel == Panel::MealPlan {
            match typed.meal_plan_request() {
                Ok(req) => Some(req),
                Err(key) => {
                    ui.update(|u| u.notify_invalid(key));
                    return;
                }
            }
        } else {
            None
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::browser;
            let token = session::token(auth);
            let reply = match (panel, meal_plan) {
                (Panel::MealPlan, Some(req)) => browser::plan_meals(&token, &req).await,
                (Panel::Nutrition, _) => browser::analyze_nutrition(&token, &typed.nutrition_request()).await,
                (Panel::Price, _) => browser::estimate_prices(&token, &typed.price_request()).await,
                _ => browser::recommend_recipes(&token, &typed.recommend_request()).await,
            };
            match reply {
                Ok(reply) => {
                    data.update(|d| d.ai_reply = Some(reply));
                    ui.update(UiState::clear_message);
                }
                Err(e) => session::report(ui, auth, &e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (typed, meal_plan, auth, data);
    };

    view! {
        <form class="ai-panel" on:submit=on_submit>
            {fields(panel)
                .into_iter()
                .map(|(label, get, set)| {
                    view! {
                        <TextField
                            label=label
                            value=Signal::derive(move || form.with(|f| get(f).clone()))
                            on_input=Callback::new(move |v| form.update(|f| set(f, v)))
                        />
                    }
                })
                .collect_view()}
            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                {move || if busy.get() { text(MessageKey::Loading) } else { text(MessageKey::ActionAsk) }}
            </button>
        </form>
        <AiReplyView/>
    }
}

/// Latest reply: suggested recipes as cards when the model sent them, the
/// raw text otherwise.
#[component]
fn AiReplyView() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let data = expect_context::<RwSignal<PanelData>>();
    move || {
        let locale = ui.with(|u| u.locale);
        data.with(|d| d.ai_reply.clone()).map(|reply: AiReply| {
            let recipes = reply.suggested_recipes();
            let cards = recipes
                .into_iter()
                .map(|recipe| {
                    let minutes = recipe
                        .cooking_time
                        .map(|m| format!("{m}{}", locale.text(MessageKey::LabelMinutes)))
                        .unwrap_or_default();
                    view! {
                        <article class="recipe-card">
                            <h4>{recipe.name}</h4>
                            <p class="recipe-card__meta">{minutes} " " {recipe.difficulty}</p>
                            <p>{recipe.description}</p>
                            <p class="recipe-card__ingredients">{recipe.ingredients}</p>
                        </article>
                    }
                })
                .collect_view();
            view! {
                <section class="ai-reply">
                    <h3>{locale.text(MessageKey::LabelSuggestedRecipes)}</h3>
                    <div class="ai-reply__cards">{cards}</div>
                    <pre class="ai-reply__text">{reply.text}</pre>
                    <p class="ai-reply__model">{format!("{}: {}", locale.text(MessageKey::LabelModel), reply.model)}</p>
                </section>
            }
        })
    }
}
