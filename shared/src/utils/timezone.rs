//! Business-timezone calendar arithmetic
//!
//! Timestamps are persisted as UTC instants. Every place that needs a
//! calendar date ("today's revenue", per-day chart buckets) goes through
//! these functions with an explicit timezone, so results never depend on
//! the server's local clock.

use chrono::{DateTime, Days, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Calendar date of `instant` in the business timezone
pub fn business_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// UTC instants bounding a business date, as a half-open range `[start, end)`
pub fn business_day_bounds(date: NaiveDate, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let next = date.checked_add_days(Days::new(1)).unwrap_or(date);
    (local_midnight(date, tz), local_midnight(next, tz))
}

/// `days` consecutive dates ending at `end` (inclusive), oldest first
pub fn date_window(end: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days)
        .rev()
        .filter_map(|offset| end.checked_sub_days(Days::new(u64::from(offset))))
        .collect()
}

/// Offset changes fall on quarter-hour boundaries in every tz database zone
const GAP_STEP_MINUTES: i64 = 15;
const GAP_MAX_STEPS: i64 = 24 * 60 / GAP_STEP_MINUTES;

fn local_midnight(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => t.with_timezone(&Utc),
        // Midnight skipped by a DST jump; the day starts at the first local
        // time that exists after the gap.
        LocalResult::None => (1..=GAP_MAX_STEPS)
            .map(|step| naive + Duration::minutes(step * GAP_STEP_MINUTES))
            .find_map(|local| tz.from_local_datetime(&local).earliest())
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_business_date_crosses_midnight_ahead_of_utc() {
        let tz = chrono_tz::Asia::Ho_Chi_Minh;
        // 18:30 UTC is 01:30 the next day in UTC+7
        assert_eq!(
            business_date(utc("2024-03-09T18:30:00Z"), tz),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
        assert_eq!(
            business_date(utc("2024-03-09T16:59:59Z"), tz),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
    }

    #[test]
    fn test_business_day_bounds_vietnam() {
        let tz = chrono_tz::Asia::Ho_Chi_Minh;
        let (start, end) = business_day_bounds(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(), tz);
        assert_eq!(start, utc("2024-03-09T17:00:00Z"));
        assert_eq!(end, utc("2024-03-10T17:00:00Z"));
    }

    #[test]
    fn test_business_day_bounds_with_dst_day() {
        // US spring-forward day is 23 hours long
        let tz = chrono_tz::America::New_York;
        let (start, end) = business_day_bounds(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(), tz);
        assert_eq!((end - start).num_hours(), 23);
    }

    #[test]
    fn test_business_day_bounds_when_midnight_is_skipped() {
        // Brazil sprang forward at local midnight: 2018-11-04 00:00 -03 became 01:00 -02
        let tz = chrono_tz::America::Sao_Paulo;
        let date = NaiveDate::from_ymd_opt(2018, 11, 4).unwrap();
        let (start, end) = business_day_bounds(date, tz);

        assert_eq!(start, utc("2018-11-04T03:00:00Z"));
        assert_eq!(business_date(start, tz), date);
        assert_eq!(
            business_date(start - Duration::seconds(1), tz),
            NaiveDate::from_ymd_opt(2018, 11, 3).unwrap()
        );
        assert_eq!((end - start).num_hours(), 23);
        assert_eq!(business_day_bounds(date.pred_opt().unwrap(), tz).1, start);
    }

    #[test]
    fn test_date_window_is_ascending_and_inclusive() {
        let end = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let window = date_window(end, 3);
        assert_eq!(
            window,
            vec![
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                end,
            ]
        );
        assert!(date_window(end, 0).is_empty());
    }
}
