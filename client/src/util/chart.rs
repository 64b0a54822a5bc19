//! Dashboard chart math.
//!
//! DESIGN
//! ======
//! Percentages are computed once here so every renderer shows the same
//! numbers. A zero total yields zero percentages and never divides by zero;
//! empty segments are kept so legends stay stable between refreshes.

#[cfg(test)]
#[path = "chart_test.rs"]
mod chart_test;

use models::DashboardStats;

use crate::i18n::{Locale, MessageKey};

/// One labelled slice of a chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub label: String,
    pub count: i64,
    /// Share of the total, rounded to one decimal.
    pub percent: f64,
}

/// `count * 100 / total`, rounded to one decimal; 0 when `total` is 0.
#[allow(clippy::cast_precision_loss)]
pub fn percent(count: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let raw = count as f64 * 100.0 / total as f64;
    (raw * 10.0).round() / 10.0
}

/// Freshness breakdown: expired, expiring soon, fresh, no expiry.
pub fn segments(stats: &DashboardStats, locale: Locale) -> Vec<Segment> {
    let buckets = [
        (MessageKey::StatusExpired, stats.expired),
        (MessageKey::StatusExpiringSoon, stats.expiring_soon),
        (MessageKey::StatusFresh, stats.fresh),
        (MessageKey::StatusNoExpiry, stats.no_expiry),
    ];
    buckets
        .into_iter()
        .map(|(key, count)| Segment { label: locale.text(key).to_owned(), count, percent: percent(count, stats.total) })
        .collect()
}

/// Category breakdown, largest first; ties keep alphabetical order.
pub fn category_segments(stats: &DashboardStats) -> Vec<Segment> {
    map_segments(&stats.categories, stats.total)
}

/// Storage-location breakdown, largest first.
pub fn location_segments(stats: &DashboardStats) -> Vec<Segment> {
    map_segments(&stats.locations, stats.total)
}

fn map_segments(map: &std::collections::BTreeMap<String, i64>, total: i64) -> Vec<Segment> {
    let mut out: Vec<Segment> = map
        .iter()
        .map(|(label, &count)| Segment { label: label.clone(), count, percent: percent(count, total) })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

/// Text bar `width` cells wide, filled in proportion to `percent`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn bar(percent: f64, width: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
