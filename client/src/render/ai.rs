//! AI reply rendering: the model's text followed by the suggested recipe
//! list when the reply carried one.

#[cfg(test)]
#[path = "ai_test.rs"]
mod ai_test;

use std::fmt::Write as _;

use models::{AiReply, RecognizedIngredient, RecognizedIngredients};

use crate::i18n::{Locale, MessageKey};

pub fn render_ai_reply(reply: &AiReply, locale: Locale) -> String {
    let mut out = String::new();
    let recipes = reply.suggested_recipes();
    if recipes.is_empty() {
        let _ = writeln!(out, "{}", reply.text.trim());
    } else {
        let _ = writeln!(out, "{}", locale.text(MessageKey::LabelSuggestedRecipes));
        for (index, recipe) in recipes.iter().enumerate() {
            let mut meta = Vec::new();
            if let Some(minutes) = recipe.cooking_time {
                meta.push(format!("{minutes}{}", locale.text(MessageKey::LabelMinutes)));
            }
            if !recipe.difficulty.trim().is_empty() {
                meta.push(recipe.difficulty.trim().to_owned());
            }
            if !recipe.category.trim().is_empty() {
                meta.push(recipe.category.trim().to_owned());
            }
            if meta.is_empty() {
                let _ = writeln!(out, "{}. {}", index + 1, recipe.name);
            } else {
                let _ = writeln!(out, "{}. {} ({})", index + 1, recipe.name, meta.join(", "));
            }
            for line in [&recipe.description, &recipe.ingredients, &recipe.instructions] {
                if !line.trim().is_empty() {
                    let _ = writeln!(out, "   {}", line.trim());
                }
            }
        }
    }
    if !reply.model.is_empty() {
        let _ = writeln!(out, "\n[{}: {}]", locale.text(MessageKey::LabelModel), reply.model);
    }
    out
}

/// One recognized ingredient: name, amount, category and shelf life.
pub fn recognized_line(item: &RecognizedIngredient) -> String {
    let quantity = item.quantity.map(models::ingredient::format_quantity).unwrap_or_default();
    let shelf_life = item.estimated_expiry_days.map(|d| format!("+{d}d")).unwrap_or_default();
    let parts: [&str; 5] = [&item.name, &quantity, &item.unit, &item.category, &shelf_life];
    parts
        .into_iter()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_recognized(found: &RecognizedIngredients, locale: Locale) -> String {
    if found.ingredients.is_empty() {
        return format!("{}\n", locale.text(MessageKey::RecognizedNothing));
    }
    let mut out = String::new();
    for (index, item) in found.ingredients.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, recognized_line(item));
    }
    let _ = writeln!(out, "{}: {:.1}/10", locale.text(MessageKey::LabelConfidence), found.confidence);
    if !found.model.is_empty() {
        let _ = writeln!(out, "[{}: {}]", locale.text(MessageKey::LabelModel), found.model);
    }
    out
}
