//! Best-effort timestamp parsing.
//!
//! [`parse_time`] tries an ordered cascade of layouts and returns the first
//! one that parses. Layouts without a zone are read in the local time zone,
//! zone abbreviations without a numeric offset are read as UTC, and layouts
//! without a year land in year 0.

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    /// Layout carries a numeric offset.
    Offset,
    /// Layout carries only an abbreviation such as `MST`.
    Abbreviation,
    /// Layout carries no zone at all.
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fill {
    None,
    Midnight,
    Year,
    Date,
}

#[derive(Debug, Clone, Copy)]
struct Layout {
    name: &'static str,
    format: &'static str,
    zone: Zone,
    fill: Fill,
}

const fn layout(name: &'static str, format: &'static str, zone: Zone, fill: Fill) -> Layout {
    Layout {
        name,
        format,
        zone,
        fill,
    }
}

/// Layouts tried before RFC3339, which goes through
/// `DateTime::parse_from_rfc3339`.
const LEADING: &[Layout] = &[
    layout("datetime", "%Y-%m-%d %H:%M:%S", Zone::Local, Fill::None),
    layout("date", "%Y-%m-%d", Zone::Local, Fill::Midnight),
];

/// Layouts tried after RFC3339. `%Z` skips any non-blank word, so each
/// numeric-offset layout comes before its abbreviation twin.
const TRAILING: &[Layout] = &[
    layout("go-string", "%Y-%m-%d %H:%M:%S%.f %z %Z", Zone::Offset, Fill::None),
    layout("time", "%H:%M:%S", Zone::Local, Fill::Date),
    layout("ansic", "%a %b %e %H:%M:%S %Y", Zone::Local, Fill::None),
    layout("ruby-date", "%a %b %d %H:%M:%S %z %Y", Zone::Offset, Fill::None),
    layout("unix-date", "%a %b %e %H:%M:%S %Z %Y", Zone::Abbreviation, Fill::None),
    layout("rfc822z", "%d %b %y %H:%M %z", Zone::Offset, Fill::None),
    layout("rfc822", "%d %b %y %H:%M %Z", Zone::Abbreviation, Fill::None),
    layout("rfc850", "%A, %d-%b-%y %H:%M:%S %Z", Zone::Abbreviation, Fill::None),
    layout("rfc1123z", "%a, %d %b %Y %H:%M:%S %z", Zone::Offset, Fill::None),
    layout("rfc1123", "%a, %d %b %Y %H:%M:%S %Z", Zone::Abbreviation, Fill::None),
    layout("kitchen", "%I:%M%p", Zone::Local, Fill::Date),
    layout("stamp", "%b %e %H:%M:%S%.f", Zone::Local, Fill::Year),
    layout("layout", "%m/%d %I:%M:%S%p '%y %z", Zone::Offset, Fill::None),
];

/// The zero timestamp, `0001-01-01T00:00:00Z`.
pub fn zero_time() -> DateTime<FixedOffset> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| DateTime::<FixedOffset>::from(Utc.from_utc_datetime(&naive)))
        .unwrap_or_default()
}

pub fn is_zero_time(t: &DateTime<FixedOffset>) -> bool {
    *t == zero_time()
}

/// Parse `text` with the first layout of the cascade that accepts it.
///
/// # Example
///
/// ```
/// use dataschema_value::time::parse_time;
///
/// let t = parse_time("2024-01-02T03:04:05Z").unwrap();
/// assert_eq!(t.to_rfc3339(), "2024-01-02T03:04:05+00:00");
/// assert!(parse_time("not a time").is_none());
/// ```
pub fn parse_time(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    LEADING
        .iter()
        .find_map(|layout| parse_layout(text, layout))
        .or_else(|| DateTime::parse_from_rfc3339(text).ok())
        .or_else(|| TRAILING.iter().find_map(|layout| parse_layout(text, layout)))
}

/// Parse `text` with a single strftime `format`.
///
/// A format without an offset is read in the local time zone; a format
/// without a time of day yields midnight.
pub fn parse_time_layout(text: &str, format: &str) -> Option<DateTime<FixedOffset>> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, text, StrftimeItems::new(format)).ok()?;
    if let Ok(t) = parsed.to_datetime() {
        return Some(t);
    }
    let naive = match parsed.to_naive_datetime_with_offset(0) {
        Ok(naive) => naive,
        Err(_) => parsed.to_naive_date().ok()?.and_hms_opt(0, 0, 0)?,
    };
    Some(localize(naive))
}

fn parse_layout(text: &str, layout: &Layout) -> Option<DateTime<FixedOffset>> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, text, StrftimeItems::new(layout.format)).ok()?;
    match layout.fill {
        Fill::None => {}
        Fill::Midnight => {
            parsed.set_hour(0).ok()?;
            parsed.set_minute(0).ok()?;
            parsed.set_second(0).ok()?;
        }
        Fill::Year => {
            parsed.set_year(0).ok()?;
        }
        Fill::Date => {
            parsed.set_year(0).ok()?;
            parsed.set_month(1).ok()?;
            parsed.set_day(1).ok()?;
        }
    }
    let parsed_time = match layout.zone {
        Zone::Offset => parsed.to_datetime().ok(),
        Zone::Abbreviation => {
            parsed.set_offset(0).ok()?;
            parsed.to_datetime().ok()
        }
        Zone::Local => parsed.to_naive_datetime_with_offset(0).ok().map(localize),
    };
    if parsed_time.is_some() {
        log::trace!("parsed {text:?} with layout {}", layout.name);
    }
    parsed_time
}

/// Read a wall-clock time in the local zone. Times skipped by a DST jump
/// fall back to UTC.
fn localize(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => local.into(),
        None => Utc.from_utc_datetime(&naive).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn ymd_hms(t: &DateTime<FixedOffset>) -> (i32, u32, u32, u32, u32, u32) {
        (t.year(), t.month(), t.day(), t.hour(), t.minute(), t.second())
    }

    #[test]
    fn test_zero_time() {
        assert_eq!(zero_time().to_rfc3339(), "0001-01-01T00:00:00+00:00");
        assert!(is_zero_time(&zero_time()));
    }

    #[test]
    fn test_datetime_layout_is_local() {
        let t = parse_time("2024-03-04 05:06:07").unwrap();
        assert_eq!(ymd_hms(&t), (2024, 3, 4, 5, 6, 7));
    }

    #[test]
    fn test_date_only_is_local_midnight() {
        let t = parse_time("2024-01-02").unwrap();
        assert_eq!(ymd_hms(&t), (2024, 1, 2, 0, 0, 0));
    }

    #[test]
    fn test_rfc3339_variants() {
        let t = parse_time("2024-01-02T03:04:05+08:00").unwrap();
        assert_eq!(t.offset().local_minus_utc(), 8 * 3600);
        let t = parse_time("2024-01-02T03:04:05.123456Z").unwrap();
        assert_eq!(t.nanosecond(), 123_456_000);
    }

    #[test]
    fn test_go_string_layout() {
        let t = parse_time("2024-01-02 03:04:05.5 -0700 MST").unwrap();
        assert_eq!(ymd_hms(&t), (2024, 1, 2, 3, 4, 5));
        assert_eq!(t.offset().local_minus_utc(), -7 * 3600);
    }

    #[test]
    fn test_time_only_layout() {
        let t = parse_time("13:14:15").unwrap();
        assert_eq!(ymd_hms(&t), (0, 1, 1, 13, 14, 15));
    }

    #[test]
    fn test_historical_layouts() {
        let t = parse_time("Tue Jan  2 15:04:05 2024").unwrap();
        assert_eq!(ymd_hms(&t), (2024, 1, 2, 15, 4, 5));

        let t = parse_time("Tue Jan 02 15:04:05 -0700 2024").unwrap();
        assert_eq!(t.offset().local_minus_utc(), -7 * 3600);

        let t = parse_time("02 Jan 24 15:04 -0700").unwrap();
        assert_eq!(ymd_hms(&t), (2024, 1, 2, 15, 4, 0));
        assert_eq!(t.offset().local_minus_utc(), -7 * 3600);

        let t = parse_time("02 Jan 24 15:04 UTC").unwrap();
        assert_eq!(t.offset().local_minus_utc(), 0);

        let t = parse_time("Tue, 02 Jan 2024 15:04:05 GMT").unwrap();
        assert_eq!(t.offset().local_minus_utc(), 0);
        assert_eq!(ymd_hms(&t), (2024, 1, 2, 15, 4, 5));
    }

    #[test]
    fn test_abbreviated_zone_layouts_are_utc() {
        let t = parse_time("Tue Jan  2 15:04:05 MST 2024").unwrap();
        assert_eq!(ymd_hms(&t), (2024, 1, 2, 15, 4, 5));
        assert_eq!(t.offset().local_minus_utc(), 0);

        let t = parse_time("Tuesday, 02-Jan-24 15:04:05 UTC").unwrap();
        assert_eq!(ymd_hms(&t), (2024, 1, 2, 15, 4, 5));
        assert_eq!(t.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_free_form_layout() {
        let t = parse_time("01/02 03:04:05PM '24 -0700").unwrap();
        assert_eq!(ymd_hms(&t), (2024, 1, 2, 15, 4, 5));
        assert_eq!(t.offset().local_minus_utc(), -7 * 3600);
    }

    #[test]
    fn test_kitchen_layout() {
        let t = parse_time("3:04PM").unwrap();
        assert_eq!((t.hour(), t.minute()), (15, 4));
    }

    #[test]
    fn test_stamp_layout() {
        let t = parse_time("Jan  2 15:04:05.000").unwrap();
        assert_eq!(ymd_hms(&t), (0, 1, 2, 15, 4, 5));
    }

    #[test]
    fn test_unparseable() {
        assert!(parse_time("").is_none());
        assert!(parse_time("yesterday").is_none());
        assert!(parse_time("2024-13-45").is_none());
    }

    #[test]
    fn test_single_layout() {
        let t = parse_time_layout("2024/05/06 07:08", "%Y/%m/%d %H:%M").unwrap();
        assert_eq!(ymd_hms(&t), (2024, 5, 6, 7, 8, 0));

        let t = parse_time_layout("06.05.2024", "%d.%m.%Y").unwrap();
        assert_eq!(ymd_hms(&t), (2024, 5, 6, 0, 0, 0));

        let t = parse_time_layout("2024/05/06 07:08 +0200", "%Y/%m/%d %H:%M %z").unwrap();
        assert_eq!(t.offset().local_minus_utc(), 2 * 3600);

        assert!(parse_time_layout("nope", "%Y").is_none());
    }
}
