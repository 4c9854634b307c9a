//! Date helper functions

use chrono::{DateTime, TimeZone};

/// Format a date using a strftime pattern
///
/// # Examples
/// ```ignore
/// format_date(&date, "%m-%d-%Y") // -> "04-13-2017"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, pattern: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format(pattern).to_string()
}

/// Format date in full format (like "April 13, 2017")
pub fn full_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%B %d, %Y").to_string()
}

/// Generate a <time> HTML element
pub fn time_tag<Tz: TimeZone>(date: &DateTime<Tz>, pattern: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let datetime = date.format("%Y-%m-%dT%H:%M:%S%:z").to_string();
    format!(
        r#"<time datetime="{}">{}</time>"#,
        datetime,
        format_date(date, pattern)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn sample_date() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2017, 4, 13, 10, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&sample_date(), "%m-%d-%Y"), "04-13-2017");
        assert_eq!(format_date(&sample_date(), "%Y/%m/%d"), "2017/04/13");
    }

    #[test]
    fn test_full_date() {
        assert_eq!(full_date(&sample_date()), "April 13, 2017");
    }

    #[test]
    fn test_time_tag() {
        let tag = time_tag(&sample_date(), "%m-%d-%Y");
        assert!(tag.starts_with("<time datetime=\"2017-04-13T10:30:00+00:00\">"));
        assert!(tag.contains("04-13-2017"));
    }
}
