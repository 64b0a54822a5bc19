//! Home page: login, registration, or one main-screen panel.
//!
//! ARCHITECTURE
//! ============
//! The `/:panel` route segment selects the panel through
//! [`UiState::open`]; what actually gets drawn is always
//! [`UiState::view`], so a signed-out user lands on the login form no
//! matter which URL they opened.
//!
//! SYSTEM CONTEXT
//! ==============
//! Panel data is fetched whenever the resolved view changes to a panel.
//! The view is memoized, so status notices and form edits do not refetch.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use models::Ingredient;

use crate::components::ai_panel::AiPanel;
use crate::components::auth_form::AuthForm;
use crate::components::dashboard_chart::DashboardChart;
use crate::components::ingredient_editor::IngredientEditor;
use crate::components::ingredient_table::IngredientTable;
use crate::components::meal_plans::MealPlanList;
use crate::components::nav::PanelNav;
use crate::components::notice::NoticeLine;
use crate::components::photo_import::PhotoImport;
use crate::components::shopping_list::ShoppingList;
use crate::render::PanelData;
use crate::state::auth::AuthState;
use crate::state::ui::{Panel, Screen, UiState, View};

/// Fetch what `panel` shows. AI panels start empty and load on demand.
fn load_panel(panel: Panel, auth: RwSignal<AuthState>, ui: RwSignal<UiState>, data: RwSignal<PanelData>) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        use crate::net::browser;
        use crate::util::session;

        let token = session::token(auth);
        let outcome = match panel {
            Panel::Dashboard => {
                let days = data.with_untracked(|d| d.soon_days);
                browser::dashboard(&token, Some(days))
                    .await
                    .map(|stats| data.update(|d| d.stats = Some(stats)))
            }
            Panel::Ingredients => browser::list_ingredients(&token)
                .await
                .map(|items| data.update(|d| d.ingredients = items)),
            Panel::MealPlan => browser::list_meal_plans(&token)
                .await
                .map(|plans| data.update(|d| d.meal_plans = plans)),
            Panel::Shopping => browser::shopping_list(&token)
                .await
                .map(|items| data.update(|d| d.shopping = items)),
            Panel::Recommend | Panel::Nutrition | Panel::Price => Ok(()),
        };
        if let Err(e) = outcome {
            session::report(ui, auth, &e);
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (panel, auth, ui, data);
}

fn panel_body(panel: Panel) -> AnyView {
    match panel {
        Panel::Dashboard => view! { <DashboardChart/> }.into_any(),
        Panel::Ingredients => {
            let editing = RwSignal::new(None::<Ingredient>);
            view! {
                <PhotoImport/>
                <IngredientEditor editing=editing/>
                <IngredientTable editing=editing/>
            }
            .into_any()
        }
        Panel::Recommend | Panel::Nutrition | Panel::Price => view! { <AiPanel panel=panel/> }.into_any(),
        Panel::MealPlan => view! {
            <AiPanel panel=panel/>
            <MealPlanList/>
        }
        .into_any(),
        Panel::Shopping => view! { <ShoppingList/> }.into_any(),
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let data = expect_context::<RwSignal<PanelData>>();
    let params = use_params_map();

    // Follow the route segment; unknown names keep the current panel.
    Effect::new(move || {
        let Some(raw) = params.read().get("panel") else {
            return;
        };
        let Ok(panel) = raw.parse::<Panel>() else {
            return;
        };
        let current = ui.with_untracked(|u| (u.screen, u.panel));
        if current != (Screen::Main, panel) {
            ui.update(|u| u.open(panel));
        }
    });

    let current_view = Memo::new(move |_| auth.with(|a| ui.with(|u| u.view(a))));

    Effect::new(move || {
        let View::Panel(panel) = current_view.get() else {
            return;
        };
        data.update(|d| d.ai_reply = None);
        load_panel(panel, auth, ui, data);
    });

    view! {
        <div class="pantry">
            {move || match current_view.get() {
                View::Login => view! { <AuthForm register=false/> }.into_any(),
                View::Register => view! { <AuthForm register=true/> }.into_any(),
                View::Panel(panel) => {
                    let title = move || ui.with(|u| u.locale.text(panel.title_key()));
                    view! {
                        <PanelNav/>
                        <main class="panel">
                            <h2>{title}</h2>
                            {panel_body(panel)}
                        </main>
                    }
                    .into_any()
                }
            }}
            <NoticeLine/>
        </div>
    }
}
