//! Date parsing collaborator
//!
//! The engine never parses dates itself. Text that passes the shape check in
//! [`rules::date_shape`](crate::rules::date_shape) is handed to a
//! [`DateParser`]. The shape check is a strict subset of what a parser must
//! accept: any parser has to handle the four shaped layouts and may accept
//! more.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use coerce_core_types::ScalarKind;

use crate::errors::{CoerceError, Result};

/// Parses human-written date/time text into a UTC instant
pub trait DateParser: Send + Sync {
    /// Parse `text`
    ///
    /// # Errors
    ///
    /// Returns `CoerceError::Parse` when the text is not a date this parser
    /// understands.
    fn parse(&self, text: &str) -> Result<DateTime<Utc>>;
}

impl<F> DateParser for F
where
    F: Fn(&str) -> Result<DateTime<Utc>> + Send + Sync,
{
    fn parse(&self, text: &str) -> Result<DateTime<Utc>> {
        self(text)
    }
}

/// Default parser built on chrono
///
/// Accepts RFC 3339 (with `T` or a space separator), naive ISO date-times
/// (read as UTC), RFC 2822, `DD Mon YYYY HH:MM:SS TZA` with common zone
/// abbreviations, US-style `Mon D, YYYY H:MM[:SS] AM|PM`, and bare dates as
/// `YYYY-MM-DD` or `YYYY/MM/DD` (month and day may be unpadded).
///
/// # Example
/// ```
/// use coerce_core::dates::{ChronoDateParser, DateParser};
///
/// let parser = ChronoDateParser;
/// let t = parser.parse("2023-07-04T12:00:00+02:00").unwrap();
/// assert_eq!(t.to_rfc3339(), "2023-07-04T10:00:00+00:00");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoDateParser;

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%b %d, %Y %I:%M %p",
    "%b %d, %Y %I:%M:%S %p",
    "%b %d %Y %I:%M %p",
    "%b %d %Y %I:%M:%S %p",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

impl DateParser for ChronoDateParser {
    fn parse(&self, text: &str) -> Result<DateTime<Utc>> {
        let text = text.trim();

        if let Some(t) = parse_offset_date_time(text) {
            return Ok(t.with_timezone(&Utc));
        }

        if let Some(naive) = NAIVE_DATE_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        {
            return Ok(Utc.from_utc_datetime(&naive));
        }

        if let Some(t) = parse_zone_abbreviation(text) {
            return Ok(t.with_timezone(&Utc));
        }

        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| Utc.from_utc_datetime(&midnight))
            .ok_or_else(|| {
                CoerceError::parse(text, ScalarKind::Timestamp, "unrecognized date/time layout")
            })
    }
}

fn parse_offset_date_time(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_rfc3339(&text.replacen(' ', "T", 1)))
        .or_else(|_| DateTime::parse_from_rfc2822(text))
        .ok()
}

/// `DD Mon YYYY HH:MM:SS TZA` for abbreviations RFC 2822 does not know
fn parse_zone_abbreviation(text: &str) -> Option<DateTime<FixedOffset>> {
    let (local, zone) = text.rsplit_once(' ')?;
    let offset = FixedOffset::east_opt(zone_offset_seconds(zone)?)?;
    let naive = NaiveDateTime::parse_from_str(local, "%d %b %Y %H:%M:%S").ok()?;
    offset.from_local_datetime(&naive).single()
}

fn zone_offset_seconds(abbreviation: &str) -> Option<i32> {
    const HOUR: i32 = 3600;
    let offset = match abbreviation {
        "UT" | "UTC" | "GMT" | "WET" => 0,
        "CET" => HOUR,
        "EET" => 2 * HOUR,
        "MSK" => 3 * HOUR,
        "IST" => 5 * HOUR + 30 * 60,
        "HKT" => 8 * HOUR,
        "JST" | "KST" => 9 * HOUR,
        "EST" => -5 * HOUR,
        "EDT" => -4 * HOUR,
        "CST" => -6 * HOUR,
        "CDT" => -5 * HOUR,
        "MST" => -7 * HOUR,
        "MDT" => -6 * HOUR,
        "PST" => -8 * HOUR,
        "PDT" => -7 * HOUR,
        _ => return None,
    };
    Some(offset)
}
