//! Timestamp, weekday and business-day helpers.
//!
//! Schedule entries carry RFC 3339 timestamps (`2024-12-25T09:00:00+00:00`).
//! Every helper here is fallible: malformed input yields a [`ParseError`]
//! and it is up to the caller to decide whether that is fatal (command-line
//! dates) or recoverable (a single entry's display time, see [`EntryTime`]).

use super::error::ParseError;
use super::holidays::{is_weekend, HolidayCalendar, Holidays, Region};
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Weekday};
use tracing::warn;

/// Layout used when no layout is given: `2024-12-25 09:00`.
pub const DEFAULT_LAYOUT: &str = "%Y-%m-%d %H:%M";

/// Calendar date layout used on the command line and in API queries.
pub const DATE_LAYOUT: &str = "%Y-%m-%d";

/// Story points per sprint day off shift.
const POINTS_PER_DAY: f32 = 1.4;

/// Parses an RFC 3339 timestamp with an uppercase `T` separator and an
/// uppercase `Z` or numeric offset.
pub fn parse_timestamp(s: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    if !is_rfc3339_shape(s) {
        return Err(ParseError::Timestamp {
            input: s.to_string(),
            reason: "expected YYYY-MM-DDTHH:MM:SS with Z or a ±HH:MM offset".to_string(),
        });
    }
    DateTime::parse_from_rfc3339(s).map_err(|e| ParseError::Timestamp {
        input: s.to_string(),
        reason: e.to_string(),
    })
}

fn is_rfc3339_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 20
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[10] == b'T'
        && !s.ends_with('z')
}

/// Renders `t` with a strftime `layout`, falling back to [`DEFAULT_LAYOUT`].
pub fn format_timestamp(t: &DateTime<FixedOffset>, layout: &str) -> String {
    let layout = if layout.is_empty() { DEFAULT_LAYOUT } else { layout };
    t.format(layout).to_string()
}

pub fn convert_timestamp(s: &str, layout: &str) -> Result<String, ParseError> {
    Ok(format_timestamp(&parse_timestamp(s)?, layout))
}

/// Day of week of the timestamp, in the timestamp's own offset.
pub fn weekday_of(s: &str) -> Result<Weekday, ParseError> {
    Ok(parse_timestamp(s)?.weekday())
}

/// 0 = Sunday .. 6 = Saturday.
pub fn weekday_number(weekday: Weekday) -> u32 {
    weekday.num_days_from_sunday()
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Regions whose calendar marks the timestamp's date as a holiday.
pub fn holidays_of(s: &str, holidays: &Holidays) -> Result<Vec<Region>, ParseError> {
    Ok(holidays.regions_for(parse_timestamp(s)?.date_naive()))
}

/// Parses a strict `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, ParseError> {
    let date = NaiveDate::parse_from_str(s, DATE_LAYOUT).map_err(|e| ParseError::Date {
        input: s.to_string(),
        reason: e.to_string(),
    })?;
    // Exact layout only: no unpadded fields, signs or blanks
    if date.format(DATE_LAYOUT).to_string() != s {
        return Err(ParseError::Date {
            input: s.to_string(),
            reason: "expected zero-padded YYYY-MM-DD".to_string(),
        });
    }
    Ok(date)
}

/// Counts days in `[start, end]` that are neither weekend days nor holidays
/// in `calendar`.
pub fn count_business_days(start: &str, end: &str, calendar: &HolidayCalendar) -> Result<u32, ParseError> {
    business_days_between(parse_date(start)?, parse_date(end)?, calendar)
}

/// [`count_business_days`] over already parsed dates.
pub fn business_days_between(start: NaiveDate, end: NaiveDate, calendar: &HolidayCalendar) -> Result<u32, ParseError> {
    if start > end {
        return Err(ParseError::InvalidRange {
            start: start.format(DATE_LAYOUT).to_string(),
            end: end.format(DATE_LAYOUT).to_string(),
        });
    }

    let mut days = 0;
    let mut date = start;
    while date <= end {
        if !is_weekend(date) && !calendar.is_holiday(date) {
            days += 1;
        }
        date += Duration::days(1);
    }

    Ok(days)
}

/// Suggested sprint story points for the given number of days off shift.
///
/// One ideal week of five working days is worth seven points, so each day
/// off shift is worth 1.4 points. The result is truncated.
pub fn estimate_story_points(off_shift_days: u32) -> u32 {
    (off_shift_days as f32 * POINTS_PER_DAY) as u32
}

/// Display time of a schedule entry.
///
/// Keeps the raw wire string next to the parsed value so a malformed
/// timestamp is still shown (as-is) instead of dropping the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTime {
    pub raw: String,
    pub parsed: Option<DateTime<FixedOffset>>,
}

impl EntryTime {
    pub fn new(raw: &str) -> Self {
        let parsed = match parse_timestamp(raw) {
            Ok(t) => Some(t),
            Err(e) => {
                warn!("Showing raw entry time: {}", e);
                None
            }
        };

        Self {
            raw: raw.to_string(),
            parsed,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.parsed.is_some()
    }

    /// Formatted time, or the raw string when it did not parse.
    pub fn display(&self, layout: &str) -> String {
        match &self.parsed {
            Some(t) => format_timestamp(t, layout),
            None => self.raw.clone(),
        }
    }

    pub fn weekday(&self) -> Option<Weekday> {
        self.parsed.map(|t| t.weekday())
    }

    /// Full weekday name, empty when the time did not parse.
    pub fn weekday_name(&self) -> &'static str {
        self.weekday().map(weekday_name).unwrap_or("")
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Some(Weekday::Sat | Weekday::Sun))
    }

    /// Holiday regions of the entry's date, empty when the time did not parse.
    pub fn holidays(&self, holidays: &Holidays) -> Vec<Region> {
        self.parsed
            .map(|t| holidays.regions_for(t.date_naive()))
            .unwrap_or_default()
    }
}
