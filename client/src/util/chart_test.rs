use super::*;
use std::collections::BTreeMap;

fn stats(expired: i64, soon: i64, fresh: i64, none: i64) -> DashboardStats {
    DashboardStats {
        total: expired + soon + fresh + none,
        expired,
        expiring_soon: soon,
        fresh,
        no_expiry: none,
        categories: BTreeMap::new(),
        locations: BTreeMap::new(),
        soon_days: 3,
    }
}

// =============================================================
// percent
// =============================================================

#[test]
fn percent_rounds_to_one_decimal() {
    assert!((percent(1, 3) - 33.3).abs() < 1e-9);
    assert!((percent(2, 3) - 66.7).abs() < 1e-9);
    assert!((percent(3, 3) - 100.0).abs() < 1e-9);
}

#[test]
fn percent_of_zero_total_is_zero() {
    assert!(percent(0, 0).abs() < f64::EPSILON);
    assert!(percent(5, 0).abs() < f64::EPSILON);
}

// =============================================================
// segments
// =============================================================

#[test]
fn segments_sum_to_about_100() {
    let segs = segments(&stats(1, 2, 3, 1), Locale::En);
    let sum: f64 = segs.iter().map(|s| s.percent).sum();
    assert!((sum - 100.0).abs() <= 0.2, "sum was {sum}");
}

#[test]
fn segments_keep_empty_buckets() {
    let segs = segments(&stats(0, 0, 4, 0), Locale::En);
    assert_eq!(segs.len(), 4);
    assert_eq!(segs[0].count, 0);
    assert!((segs[2].percent - 100.0).abs() < f64::EPSILON);
}

#[test]
fn segments_of_empty_dashboard_are_zero() {
    let segs = segments(&DashboardStats::default(), Locale::Ko);
    assert_eq!(segs.len(), 4);
    assert!(segs.iter().all(|s| s.percent.abs() < f64::EPSILON && s.count == 0));
}

#[test]
fn segment_labels_follow_locale() {
    assert_eq!(segments(&stats(1, 0, 0, 0), Locale::Ko)[0].label, "유통기한 지남");
    assert_eq!(segments(&stats(1, 0, 0, 0), Locale::En)[0].label, "Expired");
}

#[test]
fn category_segments_sorted_by_count() {
    let mut s = stats(0, 0, 5, 0);
    s.categories.insert("과일".into(), 1);
    s.categories.insert("채소".into(), 4);
    let segs = category_segments(&s);
    assert_eq!(segs[0].label, "채소");
    assert!((segs[0].percent - 80.0).abs() < f64::EPSILON);
    assert_eq!(segs[1].label, "과일");
}

// =============================================================
// bar
// =============================================================

#[test]
fn bar_fills_proportionally() {
    assert_eq!(bar(50.0, 10), "█████░░░░░");
    assert_eq!(bar(0.0, 4), "░░░░");
    assert_eq!(bar(100.0, 4), "████");
}

#[test]
fn bar_clamps_out_of_range() {
    assert_eq!(bar(150.0, 4), "████");
    assert_eq!(bar(-5.0, 4), "░░░░");
}
