//! Calendar dates stored in page front matter.
//!
//! Only plain ISO dates (`YYYY-MM-DD`) are understood; there is no time of
//! day and no timezone.

use crate::docs::frontmatter::FrontMatter;
use chrono::{Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

/// Front matter key holding the last update date.
pub const UPDATED_KEY: &str = "updated";

static RE_YYYY_MM_DD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").unwrap());

/// Parse a value that starts with `YYYY-MM-DD`.
///
/// Anything after the date (a time, a comment) is ignored. Impossible
/// calendar dates such as `2026-01-32` yield `None`.
pub fn parse_ymd(value: &str) -> Option<NaiveDate> {
    let m = RE_YYYY_MM_DD.find(value.trim())?;
    NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok()
}

/// Date of the `updated` field, if present and well formed.
pub fn updated_date(fm: &FrontMatter) -> Option<NaiveDate> {
    fm.scalar(UPDATED_KEY).and_then(parse_ymd)
}

/// `YYYY-MM-DD`
pub fn format_ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Today's date on the local wall clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fm(text: &str) -> FrontMatter {
        FrontMatter::parse_lines(text.lines())
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_updated_date_present() {
        assert_eq!(
            updated_date(&fm("title: x\nupdated: 2026-01-20")),
            Some(ymd(2026, 1, 20))
        );
    }

    #[test]
    fn test_updated_date_absent() {
        assert_eq!(updated_date(&fm("title: x")), None);
        assert_eq!(updated_date(&FrontMatter::default()), None);
    }

    #[test]
    fn test_updated_date_quoted_and_suffixed() {
        assert_eq!(
            updated_date(&fm("updated: \"2026-03-05\"")),
            Some(ymd(2026, 3, 5))
        );
        assert_eq!(
            updated_date(&fm("updated: 2026-03-05T10:00:00Z")),
            Some(ymd(2026, 3, 5))
        );
    }

    #[test]
    fn test_invalid_dates_are_absent() {
        for value in [
            "2026-01-32",
            "2026-02-30",
            "2025-02-29",
            "2026-13-01",
            "26-01-01",
            "yesterday",
            "",
        ] {
            assert_eq!(parse_ymd(value), None, "{value}");
        }
    }

    #[test]
    fn test_leap_day() {
        assert_eq!(parse_ymd("2024-02-29"), Some(ymd(2024, 2, 29)));
    }

    #[test]
    fn test_list_value_is_absent() {
        assert_eq!(updated_date(&fm("updated:\n  - 2026-01-01")), None);
    }

    #[test]
    fn test_format_ymd() {
        assert_eq!(format_ymd(ymd(2026, 1, 5)), "2026-01-05");
    }
}
