//! Time and calendar utilities

use chrono::{
    DateTime, Datelike, Days, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Utc,
};

/// Current instant truncated to whole milliseconds
///
/// Stored timestamps carry millisecond precision so that a snapshot reload
/// yields exactly the values that were appended.
pub fn now_millis() -> DateTime<Utc> {
    truncate_to_millis(Utc::now())
}

/// Drop sub-millisecond precision
pub fn truncate_to_millis(instant: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(instant.timestamp_millis()).unwrap_or(instant)
}

/// Parse a history bound in the server's local time zone
pub fn parse_bound(raw: &str) -> Option<DateTime<Utc>> {
    parse_bound_in(raw, &Local)
}

/// Parse a history bound
///
/// Accepted forms:
/// - RFC 3339 instant (`2024-03-05T09:00:00Z`, `2024-03-05T09:00:00+07:00`)
/// - local date-time without offset (`2024-03-05T09:00`, seconds optional)
/// - plain date (`2024-03-05`), read as midnight UTC
///
/// Returns `None` for blank or unrecognised input.
pub fn parse_bound_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }

    const LOCAL_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(local_to_utc(tz, naive));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Resolve a wall-clock time to an instant
///
/// Ambiguous times (DST fall-back) take the earlier instant; times inside a
/// DST gap move forward by an hour.
fn local_to_utc<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    local_to_utc(tz, date.and_time(NaiveTime::MIN))
}

/// Half-open calendar window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    /// The local calendar day containing `now`
    pub fn day_of<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let today = now.date_naive();
        Self {
            start: start_of_day(&tz, today),
            end: start_of_day(&tz, today + Days::new(1)),
        }
    }

    /// The local calendar month containing `now`
    pub fn month_of<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let today = now.date_naive();
        let first = today - Days::new(u64::from(today.day0()));
        Self {
            start: start_of_day(&tz, first),
            end: start_of_day(&tz, first + Months::new(1)),
        }
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && *instant < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_truncate_to_millis() {
        let instant = utc(2024, 3, 5, 9, 0, 0) + Duration::nanoseconds(1_234_567);
        let truncated = truncate_to_millis(instant);
        assert_eq!(truncated, utc(2024, 3, 5, 9, 0, 0) + Duration::milliseconds(1));
    }

    #[test]
    fn test_parse_bound_rfc3339() {
        assert_eq!(
            parse_bound_in("2024-03-05T09:00:00Z", &Utc),
            Some(utc(2024, 3, 5, 9, 0, 0))
        );
        assert_eq!(
            parse_bound_in("2024-03-05T16:00:00+07:00", &Utc),
            Some(utc(2024, 3, 5, 9, 0, 0))
        );
    }

    #[test]
    fn test_parse_bound_local_datetime() {
        let jakarta = FixedOffset::east_opt(7 * 3600).unwrap();
        assert_eq!(
            parse_bound_in("2024-03-05T16:00", &jakarta),
            Some(utc(2024, 3, 5, 9, 0, 0))
        );
        assert_eq!(
            parse_bound_in("2024-03-05 16:00:30", &jakarta),
            Some(utc(2024, 3, 5, 9, 0, 30))
        );
    }

    #[test]
    fn test_parse_bound_date_only_is_utc_midnight() {
        let jakarta = FixedOffset::east_opt(7 * 3600).unwrap();
        assert_eq!(
            parse_bound_in("2024-03-05", &jakarta),
            Some(utc(2024, 3, 5, 0, 0, 0))
        );
    }

    #[test]
    fn test_parse_bound_rejects_garbage() {
        assert_eq!(parse_bound_in("", &Utc), None);
        assert_eq!(parse_bound_in("   ", &Utc), None);
        assert_eq!(parse_bound_in("yesterday", &Utc), None);
        assert_eq!(parse_bound_in("2024-13-40", &Utc), None);
    }

    #[test]
    fn test_day_window() {
        let now = utc(2024, 3, 5, 15, 30, 0);
        let window = Window::day_of(&now);
        assert_eq!(window.start, utc(2024, 3, 5, 0, 0, 0));
        assert_eq!(window.end, utc(2024, 3, 6, 0, 0, 0));
        assert!(window.contains(&window.start));
        assert!(!window.contains(&window.end));
    }

    #[test]
    fn test_day_window_in_offset_zone() {
        let jakarta = FixedOffset::east_opt(7 * 3600).unwrap();
        let now = jakarta.with_ymd_and_hms(2024, 3, 5, 1, 0, 0).unwrap();
        let window = Window::day_of(&now);
        assert_eq!(window.start, utc(2024, 3, 4, 17, 0, 0));
        assert_eq!(window.end, utc(2024, 3, 5, 17, 0, 0));
    }

    #[test]
    fn test_month_window_rolls_over_year() {
        let now = utc(2024, 12, 31, 23, 59, 59);
        let window = Window::month_of(&now);
        assert_eq!(window.start, utc(2024, 12, 1, 0, 0, 0));
        assert_eq!(window.end, utc(2025, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_month_window_leap_february() {
        let now = utc(2024, 2, 29, 12, 0, 0);
        let window = Window::month_of(&now);
        assert_eq!(window.start, utc(2024, 2, 1, 0, 0, 0));
        assert_eq!(window.end, utc(2024, 3, 1, 0, 0, 0));
    }
}
