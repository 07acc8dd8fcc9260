use chrono::{DateTime, TimeZone, Utc};

pub fn date_string<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%a %d %b %Y").to_string()
}

pub fn time_string<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%H:%M:%S").to_string()
}

/// Countdown to `expires_at` as `MM:SS`.
///
/// Clamped at `00:00` once expired. Minutes keep counting past 59, so a
/// 90 minute timer starts at `90:00`.
pub fn format_remaining(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let millis = (expires_at - now).num_milliseconds().max(0);
    let total_secs = millis / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_format_remaining() {
        let now = noon();
        assert_eq!(format_remaining(now + Duration::seconds(600), now), "10:00");
        assert_eq!(format_remaining(now + Duration::seconds(65), now), "01:05");
        assert_eq!(format_remaining(now + Duration::milliseconds(1999), now), "00:01");
    }

    #[test]
    fn test_format_remaining_clamps_when_expired() {
        let now = noon();
        assert_eq!(format_remaining(now, now), "00:00");
        assert_eq!(format_remaining(now - Duration::minutes(5), now), "00:00");
    }

    #[test]
    fn test_minutes_do_not_wrap() {
        let now = noon();
        assert_eq!(format_remaining(now + Duration::minutes(90), now), "90:00");
    }

    #[test]
    fn test_clock_strings() {
        let now = noon();
        assert_eq!(date_string(&now), "Sun 18 Oct 2026");
        assert_eq!(time_string(&now), "12:00:00");
    }
}
