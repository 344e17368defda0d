//! Data freshness
//!
//! Human-readable age of a data set, bucketed into whole hours or days.

use chrono::{DateTime, Utc};

use super::types::parse_timestamp;

const MS_PER_HOUR: i64 = 60 * 60 * 1000;

/// How old is the data, relative to now?
pub fn data_age(fetched_at: &str) -> String {
    data_age_at(fetched_at, Utc::now())
}

/// How old is the data, relative to `now`?
///
/// Whole-unit floor division, no rounding and no upper bound: a year-old file
/// is still "365 days ago". Unparseable and future timestamps read as
/// "Just now".
pub fn data_age_at(fetched_at: &str, now: DateTime<Utc>) -> String {
    let Some(fetched) = parse_timestamp(fetched_at) else {
        tracing::debug!(fetched_at, "Unparseable fetched_at timestamp");
        return "Just now".to_string();
    };

    let diff_ms = (now - fetched).num_milliseconds();
    let hours = diff_ms.div_euclid(MS_PER_HOUR);
    let days = hours.div_euclid(24);

    if days > 0 {
        format!("{} day{} ago", days, if days > 1 { "s" } else { "" })
    } else if hours > 0 {
        format!("{} hour{} ago", hours, if hours > 1 { "s" } else { "" })
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn stamp(dt: DateTime<Utc>) -> String {
        dt.to_rfc3339()
    }

    #[test]
    fn test_just_now() {
        let now = Utc::now();
        assert_eq!(data_age_at(&stamp(now), now), "Just now");
        assert_eq!(data_age_at(&stamp(now - Duration::minutes(59)), now), "Just now");
    }

    #[test]
    fn test_hours() {
        let now = Utc::now();
        assert_eq!(data_age_at(&stamp(now - Duration::hours(1)), now), "1 hour ago");
        assert_eq!(data_age_at(&stamp(now - Duration::hours(3)), now), "3 hours ago");
        assert_eq!(
            data_age_at(&stamp(now - Duration::hours(23) - Duration::minutes(59)), now),
            "23 hours ago"
        );
    }

    #[test]
    fn test_days() {
        let now = Utc::now();
        assert_eq!(data_age_at(&stamp(now - Duration::days(1)), now), "1 day ago");
        assert_eq!(data_age_at(&stamp(now - Duration::days(2)), now), "2 days ago");
        assert_eq!(data_age_at(&stamp(now - Duration::days(400)), now), "400 days ago");
    }

    #[test]
    fn test_future_and_garbage() {
        let now = Utc::now();
        assert_eq!(data_age_at(&stamp(now + Duration::hours(5)), now), "Just now");
        assert_eq!(data_age_at("not a date", now), "Just now");
    }

    #[test]
    fn test_pipeline_format() {
        // Producer writes naive UTC isoformat with a trailing Z
        let now = DateTime::parse_from_rfc3339("2024-01-17T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(data_age_at("2024-01-15T10:30:00.123456Z", now), "2 days ago");
    }

    #[test]
    fn test_data_age_uses_current_time() {
        let fetched = Utc::now() - Duration::hours(3);
        assert_eq!(data_age(&stamp(fetched)), "3 hours ago");
    }
}
