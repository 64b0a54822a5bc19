//! Ingredient table with countdown labels and expiry markers.

#[cfg(test)]
#[path = "ingredients_test.rs"]
mod ingredients_test;

use std::fmt::Write as _;

use models::expiry::{self, ExpiryStatus};
use models::ingredient::format_quantity;
use models::Ingredient;
use time::Date;

use crate::i18n::{Locale, MessageKey};
use crate::util::text::{display_width, pad_display};

/// One-character marker shown before each row.
pub fn status_marker(status: ExpiryStatus) -> &'static str {
    match status {
        ExpiryStatus::Expired => "✖",
        ExpiryStatus::ExpiringSoon => "⚠",
        ExpiryStatus::Fresh => "✔",
        ExpiryStatus::Unknown => "·",
    }
}

pub fn status_key(status: ExpiryStatus) -> MessageKey {
    match status {
        ExpiryStatus::Expired => MessageKey::StatusExpired,
        ExpiryStatus::ExpiringSoon => MessageKey::StatusExpiringSoon,
        ExpiryStatus::Fresh => MessageKey::StatusFresh,
        ExpiryStatus::Unknown => MessageKey::StatusNoExpiry,
    }
}

/// Render `items` as an aligned table. `today` and `soon_days` drive the
/// markers and `D-n` labels.
pub fn render_ingredients(items: &[Ingredient], today: Date, soon_days: i64, locale: Locale) -> String {
    if items.is_empty() {
        return format!("{}\n", locale.text(MessageKey::EmptyList));
    }
    let header = [
        locale.text(MessageKey::LabelName).to_owned(),
        locale.text(MessageKey::LabelQuantity).to_owned(),
        locale.text(MessageKey::LabelLocation).to_owned(),
        locale.text(MessageKey::LabelExpiry).to_owned(),
        String::new(),
    ];
    let rows: Vec<(ExpiryStatus, [String; 5])> = items
        .iter()
        .map(|item| {
            let status = item.status(today, soon_days);
            let countdown = expiry::days_left(item.expiry_date, today)
                .map(expiry::d_day_label)
                .unwrap_or_else(|| locale.text(MessageKey::StatusNoExpiry).to_owned());
            let cells = [
                item.name.clone(),
                format!("{} {}", format_quantity(item.quantity), item.unit).trim().to_owned(),
                item.location.clone(),
                item.expiry_date.map(models::date::format_date).unwrap_or_else(|| "-".to_owned()),
                countdown,
            ];
            (status, cells)
        })
        .collect();

    let mut widths = header.each_ref().map(|h| display_width(h));
    for (_, cells) in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(display_width(cell));
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "  {}", join_row(&header, &widths));
    for (status, cells) in &rows {
        let _ = writeln!(out, "{} {}", status_marker(*status), join_row(cells, &widths));
    }
    out
}

fn join_row(cells: &[String; 5], widths: &[usize; 5]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad_display(cell, *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_owned()
}

/// Single-ingredient detail block.
pub fn render_ingredient(item: &Ingredient, today: Date, soon_days: i64, locale: Locale) -> String {
    let status = item.status(today, soon_days);
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", status_marker(status), item.label());
    let _ = writeln!(out, "  id: {}", item.id);
    if !item.category.is_empty() {
        let _ = writeln!(out, "  {}: {}", locale.text(MessageKey::LabelCategory), item.category);
    }
    if !item.location.is_empty() {
        let _ = writeln!(out, "  {}: {}", locale.text(MessageKey::LabelLocation), item.location);
    }
    let expiry_line = match (item.expiry_date, expiry::days_left(item.expiry_date, today)) {
        (Some(date), Some(days)) => format!("{} ({})", models::date::format_date(date), expiry::d_day_label(days)),
        _ => "-".to_owned(),
    };
    let _ = writeln!(
        out,
        "  {}: {expiry_line} [{}]",
        locale.text(MessageKey::LabelExpiry),
        locale.text(status_key(status))
    );
    out
}
