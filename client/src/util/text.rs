//! Free-text field parsing.

#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;

/// Split a comma-separated field into trimmed, non-empty entries.
///
/// Order is preserved and later case-insensitive duplicates are dropped, so
/// `"Peanut, milk, peanut"` yields `["Peanut", "milk"]`.
pub fn split_list(text: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for part in text.split(',') {
        let item = part.trim();
        if item.is_empty() {
            continue;
        }
        let key = item.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(item.to_owned());
    }
    out
}

/// Pad `text` with spaces to `width` display columns. Hangul and other wide
/// characters count as two columns.
pub fn pad_display(text: &str, width: usize) -> String {
    let used = display_width(text);
    let mut out = text.to_owned();
    for _ in used..width {
        out.push(' ');
    }
    out
}

/// Terminal column width of `text`.
pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| if is_wide(c) { 2 } else { 1 }).sum()
}

fn is_wide(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1100..=0x115F | 0x2E80..=0x303E | 0x3041..=0x33FF | 0x3400..=0x4DBF | 0x4E00..=0x9FFF
            | 0xA960..=0xA97F | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFF00..=0xFF60 | 0xFFE0..=0xFFE6
    )
}
