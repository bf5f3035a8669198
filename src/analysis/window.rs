use chrono::{DateTime, TimeDelta, Utc};

/// Trailing time window ending at the moment the pipeline was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    /// Spans too long for the calendar start at the earliest representable
    /// instant instead.
    pub fn trailing_days(now: DateTime<Utc>, days: i64) -> Self {
        let start = TimeDelta::try_days(days)
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Window { start, end: now }
    }

    /// Lower bound is inclusive. Timestamps after `end` still count, since
    /// only the age of a match is checked.
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start
    }

    /// Short date range, e.g. `03/03/24 - 03/10/24`.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%m/%d/%y"),
            self.end.format("%m/%d/%y")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn lower_bound_is_inclusive() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let window = Window::trailing_days(now, 7);
        assert!(window.contains(now - Duration::days(7)));
        assert!(!window.contains(now - Duration::days(7) - Duration::seconds(1)));
        assert!(window.contains(now + Duration::hours(1)));
    }

    #[test]
    fn oversized_span_saturates_instead_of_overflowing() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        for days in [1_000_000_000, i64::MAX] {
            let window = Window::trailing_days(now, days);
            assert_eq!(window.start, DateTime::<Utc>::MIN_UTC);
            assert!(window.contains(now - Duration::days(365 * 50)));
        }
    }

    #[test]
    fn label_spans_the_week() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(Window::trailing_days(now, 7).label(), "03/03/24 - 03/10/24");
    }
}
