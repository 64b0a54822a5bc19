//! Dashboard panel: freshness counts with percentage bars, then the
//! category and storage-location breakdowns.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::fmt::Write as _;

use models::DashboardStats;

use crate::i18n::{Locale, MessageKey};
use crate::util::chart::{self, Segment};
use crate::util::text::{display_width, pad_display};

/// Width of every percentage bar, in cells.
pub const BAR_WIDTH: usize = 20;

pub fn render_dashboard(stats: &DashboardStats, locale: Locale) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", locale.text(MessageKey::TitleDashboard));
    let _ = writeln!(out, "{}: {}", locale.text(MessageKey::LabelTotal), stats.total);
    push_segments(&mut out, &chart::segments(stats, locale));

    let categories = chart::category_segments(stats);
    if !categories.is_empty() {
        let _ = writeln!(out, "\n{}", locale.text(MessageKey::LabelCategories));
        push_segments(&mut out, &categories);
    }
    let locations = chart::location_segments(stats);
    if !locations.is_empty() {
        let _ = writeln!(out, "\n{}", locale.text(MessageKey::LabelLocations));
        push_segments(&mut out, &locations);
    }
    out
}

fn push_segments(out: &mut String, segments: &[Segment]) {
    let label_width = segments.iter().map(|s| display_width(&s.label)).max().unwrap_or(0);
    for segment in segments {
        let _ = writeln!(
            out,
            "{} {} {:>4} ({:>5.1}%)",
            pad_display(&segment.label, label_width),
            chart::bar(segment.percent, BAR_WIDTH),
            segment.count,
            segment.percent,
        );
    }
}
