//! Expiration-date comparison against the current date.

use serde::{Deserialize, Serialize};
use time::Date;

/// Default "expiring soon" window in days.
pub const DEFAULT_SOON_DAYS: i64 = 3;

/// Freshness bucket of an ingredient relative to a reference day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// Expiry date is before the reference day.
    Expired,
    /// Expires within the window, the reference day included.
    ExpiringSoon,
    /// Expires after the window.
    Fresh,
    /// No expiry date recorded.
    Unknown,
}

impl ExpiryStatus {
    /// Classify an optional expiry date against `today`.
    #[must_use]
    pub fn classify(expiry: Option<Date>, today: Date, soon_days: i64) -> Self {
        match days_left(expiry, today) {
            None => Self::Unknown,
            Some(days) if days < 0 => Self::Expired,
            Some(days) if days <= soon_days => Self::ExpiringSoon,
            Some(_) => Self::Fresh,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::ExpiringSoon => "expiring_soon",
            Self::Fresh => "fresh",
            Self::Unknown => "unknown",
        }
    }
}

/// Whole days from `today` until `expiry`; negative once expired.
#[must_use]
pub fn days_left(expiry: Option<Date>, today: Date) -> Option<i64> {
    expiry.map(|date| (date - today).whole_days())
}

/// Countdown label: `D-3`, `D-Day`, or `D+2` for two days past expiry.
#[must_use]
pub fn d_day_label(days: i64) -> String {
    match days {
        0 => "D-Day".to_owned(),
        d if d > 0 => format!("D-{d}"),
        d => format!("D+{}", d.unsigned_abs()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const TODAY: Date = date!(2024 - 06 - 10);

    #[test]
    fn yesterday_is_expired() {
        assert_eq!(ExpiryStatus::classify(Some(date!(2024 - 06 - 09)), TODAY, 3), ExpiryStatus::Expired);
    }

    #[test]
    fn today_and_window_edge_are_expiring_soon() {
        assert_eq!(ExpiryStatus::classify(Some(TODAY), TODAY, 3), ExpiryStatus::ExpiringSoon);
        assert_eq!(ExpiryStatus::classify(Some(date!(2024 - 06 - 13)), TODAY, 3), ExpiryStatus::ExpiringSoon);
    }

    #[test]
    fn past_window_is_fresh() {
        assert_eq!(ExpiryStatus::classify(Some(date!(2024 - 06 - 14)), TODAY, 3), ExpiryStatus::Fresh);
    }

    #[test]
    fn missing_date_is_unknown() {
        assert_eq!(ExpiryStatus::classify(None, TODAY, 3), ExpiryStatus::Unknown);
    }

    #[test]
    fn zero_window_only_counts_today() {
        assert_eq!(ExpiryStatus::classify(Some(TODAY), TODAY, 0), ExpiryStatus::ExpiringSoon);
        assert_eq!(ExpiryStatus::classify(Some(date!(2024 - 06 - 11)), TODAY, 0), ExpiryStatus::Fresh);
    }

    #[test]
    fn days_left_crosses_month_boundary() {
        assert_eq!(days_left(Some(date!(2024 - 07 - 01)), TODAY), Some(21));
        assert_eq!(days_left(Some(date!(2024 - 05 - 31)), TODAY), Some(-10));
    }

    #[test]
    fn d_day_labels() {
        assert_eq!(d_day_label(5), "D-5");
        assert_eq!(d_day_label(0), "D-Day");
        assert_eq!(d_day_label(-2), "D+2");
    }
}
