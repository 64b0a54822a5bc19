//! Shopping list, open items first.

use std::fmt::Write as _;

use models::ShoppingItem;
use models::ingredient::format_quantity;

use crate::i18n::{Locale, MessageKey};

pub fn render_shopping(items: &[ShoppingItem], locale: Locale) -> String {
    if items.is_empty() {
        return format!("{}\n", locale.text(MessageKey::EmptyList));
    }
    let mut out = String::new();
    for (purchased, key) in [(false, MessageKey::LabelOpen), (true, MessageKey::LabelPurchased)] {
        let group: Vec<&ShoppingItem> = items.iter().filter(|i| i.is_purchased == purchased).collect();
        if group.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}", locale.text(key));
        for item in group {
            let check = if item.is_purchased { "[x]" } else { "[ ]" };
            let _ = write!(out, "{check} {}", item.item_name);
            if let Some(quantity) = item.quantity {
                let _ = write!(out, " {}{}", format_quantity(quantity), item.unit);
            }
            let _ = writeln!(out, "  {}", item.id);
        }
    }
    out
}
