//! Upcoming meal plans.

use leptos::prelude::*;

use crate::i18n::MessageKey;
use crate::render::PanelData;
use crate::state::ui::UiState;

#[component]
pub fn MealPlanList() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let data = expect_context::<RwSignal<PanelData>>();
    move || {
        let locale = ui.with(|u| u.locale);
        let plans = data.with(|d| d.meal_plans.clone());
        let body = if plans.is_empty() {
            view! { <p class="empty">{locale.text(MessageKey::EmptyList)}</p> }.into_any()
        } else {
            let rows = plans
                .into_iter()
                .map(|plan| {
                    let name = plan.recipe_name.unwrap_or_default();
                    view! {
                        <li class="meal-plan">
                            <span class="meal-plan__date">{models::date::format_date(plan.plan_date)}</span>
                            <span class="meal-plan__type">{plan.meal_type}</span>
                            <span class="meal-plan__recipe">{name}</span>
                            <span class="meal-plan__notes">{plan.notes}</span>
                        </li>
                    }
                })
                .collect_view();
            view! { <ul class="meal-plans">{rows}</ul> }.into_any()
        };
        view! {
            <section class="meal-plans-section">
                <h3>{locale.text(MessageKey::TitleMealPlans)}</h3>
                {body}
            </section>
        }
    }
}
