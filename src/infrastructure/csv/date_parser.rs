// ============================================================
// DATE PARSER
// ============================================================
// Derive a calendar year from free-form published dates

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::domain::stats::Year;

const OFFSET_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%z",
];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

// Month-first wins for ambiguous numeric dates
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%Y.%m.%d",
    "%A, %B %d, %Y",
    "%Y%m%d",
];

// Day-less dates, completed with the first of the month
const YEAR_MONTH_FORMATS: &[&str] = &["%Y-%m", "%Y/%m"];

const ZONE_SUFFIXES: &[&str] = &["UTC", "GMT", "Z"];

/// Parse a published date into its calendar year.
///
/// Returns `None` for anything that is not a recognisable date; callers
/// treat that as "drop the row", not as an error. Offsets are kept as
/// written, so `2020-12-31T23:30:00-05:00` belongs to 2020.
pub fn parse_year(raw: &str) -> Option<Year> {
    let value = strip_zone_suffix(raw.trim());
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw.trim()) {
        return Some(dt.year());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw.trim()) {
        return Some(dt.year());
    }
    for format in OFFSET_DATE_TIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.year());
        }
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.year());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date.year());
        }
    }

    for format in YEAR_MONTH_FORMATS {
        let padded = format!("{}-01", value);
        if let Ok(date) = NaiveDate::parse_from_str(&padded, &format!("{}-%d", format)) {
            return Some(date.year());
        }
    }

    parse_bare_year(value)
}

/// Drop a trailing `UTC`, `GMT` or `Z` marker; the year is read as written.
fn strip_zone_suffix(value: &str) -> &str {
    ZONE_SUFFIXES
        .iter()
        .find_map(|suffix| value.strip_suffix(suffix))
        .map(str::trim_end)
        .unwrap_or(value)
}

fn parse_bare_year(value: &str) -> Option<Year> {
    if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
        value.parse().ok()
    } else {
        None
    }
}
