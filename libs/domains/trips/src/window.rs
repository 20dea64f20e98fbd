use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::error::{TripError, TripResult};

/// Upper bound for `LastDays`.
pub const MAX_WINDOW_DAYS: u32 = 3650;

/// Analytics window as requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    /// Everything created within the last `n` days before `now`
    LastDays(u32),
    /// Inclusive calendar dates, UTC
    Range { start: NaiveDate, end: NaiveDate },
}

impl TimeWindow {
    /// Explicit range when both dates are present, otherwise `LastDays(period)`.
    pub fn from_query(
        period: Option<u32>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        default_period: u32,
    ) -> Self {
        match (start, end) {
            (Some(start), Some(end)) => TimeWindow::Range { start, end },
            _ => TimeWindow::LastDays(period.unwrap_or(default_period)),
        }
    }

    /// Resolve into concrete instants relative to `now`.
    pub fn resolve(&self, now: DateTime<Utc>) -> TripResult<TimeRange> {
        match *self {
            TimeWindow::LastDays(days) => {
                if days == 0 || days > MAX_WINDOW_DAYS {
                    return Err(TripError::Validation(format!(
                        "period must be between 1 and {} days",
                        MAX_WINDOW_DAYS
                    )));
                }
                Ok(TimeRange {
                    start: Some(now - Duration::days(i64::from(days))),
                    end: None,
                })
            }
            TimeWindow::Range { start, end } => TimeRange::from_dates(Some(start), Some(end)),
        }
    }
}

/// Span of instants with inclusive bounds. `None` means unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// `start` at 00:00:00 and `end` through the last nanosecond of its day.
    pub fn from_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> TripResult<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(TripError::Validation(format!(
                    "start date {} is after end date {}",
                    s, e
                )));
            }
        }

        Ok(Self {
            start: start.map(start_of_day),
            end: end.map(end_of_day).transpose()?,
        })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| instant >= start) && self.end.is_none_or(|end| instant <= end)
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> TripResult<DateTime<Utc>> {
    date.and_hms_nano_opt(23, 59, 59, 999_999_999)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| TripError::Validation(format!("invalid date {}", date)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_day_range_covers_the_whole_day() {
        let range = TimeWindow::Range {
            start: date(2024, 1, 1),
            end: date(2024, 1, 1),
        }
        .resolve(Utc::now())
        .unwrap();

        assert!(range.contains(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap()));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let result = TimeWindow::Range {
            start: date(2024, 2, 1),
            end: date(2024, 1, 1),
        }
        .resolve(Utc::now());

        assert!(matches!(result, Err(TripError::Validation(_))));
    }

    #[test]
    fn test_last_days_is_anchored_at_now() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        let range = TimeWindow::LastDays(30).resolve(now).unwrap();

        assert_eq!(range.start, Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()));
        assert_eq!(range.end, None);
        assert!(range.contains(now));
        assert!(!range.contains(Utc.with_ymd_and_hms(2024, 3, 1, 11, 59, 59).unwrap()));
    }

    #[test]
    fn test_last_days_bounds() {
        assert!(TimeWindow::LastDays(0).resolve(Utc::now()).is_err());
        assert!(TimeWindow::LastDays(MAX_WINDOW_DAYS + 1).resolve(Utc::now()).is_err());
    }

    #[test]
    fn test_from_query_needs_both_dates_for_a_range() {
        let start = Some(date(2024, 1, 1));

        assert_eq!(
            TimeWindow::from_query(Some(7), start, None, 30),
            TimeWindow::LastDays(7)
        );
        assert_eq!(TimeWindow::from_query(None, None, None, 30), TimeWindow::LastDays(30));
        assert_eq!(
            TimeWindow::from_query(Some(7), start, start, 30),
            TimeWindow::Range {
                start: date(2024, 1, 1),
                end: date(2024, 1, 1)
            }
        );
    }

    #[test]
    fn test_open_ended_ranges() {
        let range = TimeRange::from_dates(None, Some(date(2024, 1, 1))).unwrap();
        assert!(range.contains(Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap()));
        assert!(TimeRange::unbounded().contains(Utc::now()));
    }
}
