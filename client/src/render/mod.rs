//! Plain-text renderers, one per panel.
//!
//! ARCHITECTURE
//! ============
//! Renderers are pure `fn(&data, Locale) -> String`. The CLI prints their
//! output; [`render_panel`] picks the renderer for the selected panel so
//! exactly one panel is drawn per call. The web app draws the same
//! [`PanelData`] as markup in `components`.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

pub mod ai;
pub mod auth;
pub mod dashboard;
pub mod ingredients;
pub mod recipes;
pub mod shopping;

use models::{AiReply, DEFAULT_SOON_DAYS, DashboardStats, Ingredient, MealPlan, ShoppingItem};
use time::Date;

use crate::i18n::{Locale, MessageKey};
use crate::state::ui::Panel;

/// Everything the main screen may draw. Panels read only their own fields.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelData {
    pub stats: Option<DashboardStats>,
    pub ingredients: Vec<Ingredient>,
    pub soon_days: i64,
    /// Latest reply of the panel's AI call.
    pub ai_reply: Option<AiReply>,
    pub meal_plans: Vec<MealPlan>,
    pub shopping: Vec<ShoppingItem>,
}

impl Default for PanelData {
    fn default() -> Self {
        Self {
            stats: None,
            ingredients: Vec::new(),
            soon_days: DEFAULT_SOON_DAYS,
            ai_reply: None,
            meal_plans: Vec::new(),
            shopping: Vec::new(),
        }
    }
}

/// Title line plus the body of `panel`.
pub fn render_panel(panel: Panel, data: &PanelData, locale: Locale, today: Date) -> String {
    let body = match panel {
        Panel::Dashboard => match &data.stats {
            Some(stats) => dashboard::render_dashboard(stats, locale),
            None => empty(locale),
        },
        Panel::Ingredients => ingredients::render_ingredients(&data.ingredients, today, data.soon_days, locale),
        Panel::Recommend | Panel::Nutrition | Panel::Price => ai_body(data, locale),
        Panel::MealPlan => {
            let mut out = String::new();
            if data.ai_reply.is_some() {
                out.push_str(&ai_body(data, locale));
                out.push('\n');
            }
            out.push_str(&format!("{}\n", locale.text(MessageKey::TitleMealPlans)));
            out.push_str(&recipes::render_meal_plans(&data.meal_plans, locale));
            out
        }
        Panel::Shopping => shopping::render_shopping(&data.shopping, locale),
    };
    if panel == Panel::Dashboard && data.stats.is_some() {
        // The dashboard renderer prints its own title.
        return body;
    }
    format!("== {} ==\n{body}", locale.text(panel.title_key()))
}

fn ai_body(data: &PanelData, locale: Locale) -> String {
    data.ai_reply
        .as_ref()
        .map_or_else(|| empty(locale), |reply| ai::render_ai_reply(reply, locale))
}

fn empty(locale: Locale) -> String {
    format!("{}\n", locale.text(MessageKey::EmptyList))
}
