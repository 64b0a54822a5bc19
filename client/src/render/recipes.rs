//! Saved recipes and planned meals.

use std::fmt::Write as _;

use models::{MealPlan, Recipe};

use crate::i18n::{Locale, MessageKey};

pub fn render_recipes(recipes: &[Recipe], locale: Locale) -> String {
    if recipes.is_empty() {
        return format!("{}\n", locale.text(MessageKey::EmptyList));
    }
    let mut out = String::new();
    for recipe in recipes {
        let _ = write!(out, "- {}", recipe.name);
        if let Some(minutes) = recipe.cooking_time {
            let _ = write!(out, " ({minutes}{})", locale.text(MessageKey::LabelMinutes));
        }
        if !recipe.category.is_empty() {
            let _ = write!(out, " [{}]", recipe.category);
        }
        let _ = writeln!(out, "  {}", recipe.id);
    }
    out
}

/// Full recipe card.
pub fn render_recipe(recipe: &Recipe, locale: Locale) -> String {
    let mut out = render_recipes(std::slice::from_ref(recipe), locale);
    for text in [&recipe.description, &recipe.ingredients_list, &recipe.instructions, &recipe.nutrition_info] {
        if !text.trim().is_empty() {
            let _ = writeln!(out, "\n{}", text.trim());
        }
    }
    out
}

/// One line per planned meal, grouped by date in the order given.
pub fn render_meal_plans(plans: &[MealPlan], locale: Locale) -> String {
    if plans.is_empty() {
        return format!("{}\n", locale.text(MessageKey::EmptyList));
    }
    let mut out = String::new();
    let mut current = None;
    for plan in plans {
        if current != Some(plan.plan_date) {
            current = Some(plan.plan_date);
            let _ = writeln!(out, "{}", models::date::format_date(plan.plan_date));
        }
        let dish = plan.recipe_name.as_deref().filter(|n| !n.trim().is_empty()).unwrap_or("-");
        let _ = write!(out, "  {:<9} {dish}", plan.meal_type);
        if !plan.notes.trim().is_empty() {
            let _ = write!(out, " ({})", plan.notes.trim());
        }
        let _ = writeln!(out, "  {}", plan.id);
    }
    out
}
