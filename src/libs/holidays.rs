//! Holiday calendars used to annotate schedule entries.
//!
//! Three regions are supported:
//!
//! - **UK**: England & Wales bank holidays computed from rules. A holiday
//!   falling on a weekend is substituted by the next free weekday.
//! - **US**: federal holidays computed from rules. Saturday holidays are
//!   also observed on the Friday before, Sunday holidays on the Monday after.
//! - **SG**: a fixed month/day table plus Good Friday, observed like US.
//!
//! The SG table drifts every year because most of its holidays follow lunar
//! or Islamic calendars. Any region's rules can be replaced by an explicit
//! list of dates from configuration, see [`Holidays::new`].
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use oncall::libs::holidays::{Holidays, Region};
//!
//! let holidays = Holidays::default();
//! let christmas = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
//! assert_eq!(holidays.regions_for(christmas), vec![Region::UK, Region::US, Region::SG]);
//! ```

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Region code of a holiday calendar.
///
/// The declaration order is the order codes are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Region {
    #[default]
    UK,
    US,
    SG,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::UK, Region::US, Region::SG];

    pub fn code(&self) -> &'static str {
        match self {
            Region::UK => "UK",
            Region::US => "US",
            Region::SG => "SG",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// How a holiday that lands on a weekend is observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Observance {
    /// Next weekday that is not already a holiday.
    Substitute,
    /// Saturday on the Friday before, Sunday on the Monday after.
    Nearest,
    /// Only the listed date.
    Exact,
}

/// A rule producing the holiday dates of a given year.
#[derive(Debug, Clone)]
pub enum HolidayRule {
    /// Same month and day every year.
    Fixed { month: u32, day: u32 },
    /// Same month and day every year starting at `since`.
    FixedSince { month: u32, day: u32, since: i32 },
    /// Offset in days from Easter Sunday.
    Easter(i64),
    /// `n`-th `weekday` of `month`.
    NthWeekday { month: u32, weekday: Weekday, n: u32 },
    /// Last `weekday` of `month`.
    LastWeekday { month: u32, weekday: Weekday },
    /// One specific date.
    Date(NaiveDate),
    /// Rule with year-specific exceptions.
    Custom(fn(i32) -> Option<NaiveDate>),
}

impl HolidayRule {
    fn date_in(&self, year: i32) -> Option<NaiveDate> {
        match *self {
            HolidayRule::Fixed { month, day } => NaiveDate::from_ymd_opt(year, month, day),
            HolidayRule::FixedSince { month, day, since } if year >= since => NaiveDate::from_ymd_opt(year, month, day),
            HolidayRule::FixedSince { .. } => None,
            HolidayRule::Easter(offset) => easter_sunday(year).map(|easter| easter + Duration::days(offset)),
            HolidayRule::NthWeekday { month, weekday, n } => nth_weekday_of_month(year, month, weekday, n),
            HolidayRule::LastWeekday { month, weekday } => last_weekday_of_month(year, month, weekday),
            HolidayRule::Date(date) if date.year() == year => Some(date),
            HolidayRule::Date(_) => None,
            HolidayRule::Custom(rule) => rule(year),
        }
    }
}

/// Holidays of a single region.
#[derive(Debug, Clone)]
pub struct HolidayCalendar {
    region: Region,
    rules: Vec<HolidayRule>,
    observance: Observance,
}

impl HolidayCalendar {
    /// England & Wales bank holidays.
    pub fn uk() -> Self {
        use HolidayRule::*;
        Self {
            region: Region::UK,
            rules: vec![
                Fixed { month: 1, day: 1 },
                Easter(-2),
                Easter(1),
                Custom(uk_early_may),
                Custom(uk_spring),
                LastWeekday { month: 8, weekday: Weekday::Mon },
                Fixed { month: 12, day: 25 },
                Fixed { month: 12, day: 26 },
                // One-off bank holidays
                Date(ymd(1999, 12, 31)),
                Date(ymd(2002, 6, 3)),
                Date(ymd(2011, 4, 29)),
                Date(ymd(2012, 6, 5)),
                Date(ymd(2022, 6, 3)),
                Date(ymd(2022, 9, 19)),
                Date(ymd(2023, 5, 8)),
            ],
            observance: Observance::Substitute,
        }
    }

    /// US federal holidays.
    pub fn us() -> Self {
        use HolidayRule::*;
        Self {
            region: Region::US,
            rules: vec![
                Fixed { month: 1, day: 1 },
                NthWeekday { month: 1, weekday: Weekday::Mon, n: 3 },
                NthWeekday { month: 2, weekday: Weekday::Mon, n: 3 },
                LastWeekday { month: 5, weekday: Weekday::Mon },
                FixedSince { month: 6, day: 19, since: 2021 },
                Fixed { month: 7, day: 4 },
                NthWeekday { month: 9, weekday: Weekday::Mon, n: 1 },
                NthWeekday { month: 10, weekday: Weekday::Mon, n: 2 },
                Fixed { month: 11, day: 11 },
                NthWeekday { month: 11, weekday: Weekday::Thu, n: 4 },
                Fixed { month: 12, day: 25 },
            ],
            observance: Observance::Nearest,
        }
    }

    /// Singapore public holidays from the built-in month/day table.
    pub fn sg() -> Self {
        use HolidayRule::*;
        let fixed = [
            (1, 1),   // New Year's Day
            (2, 5),   // Chinese New Year
            (2, 6),   // Chinese New Year
            (5, 1),   // Labour Day
            (5, 19),  // Vesak Day
            (5, 20),  // Vesak Day Holiday
            (6, 5),   // Hari Raya Puasa
            (8, 9),   // National Day
            (8, 11),  // Hari Raya Haji
            (8, 12),  // Hari Raya Haji Holiday
            (10, 27), // Deepavali
            (10, 28), // Deepavali Holiday
            (12, 25), // Christmas Day
        ];
        let mut rules: Vec<HolidayRule> = fixed.iter().map(|&(month, day)| Fixed { month, day }).collect();
        rules.push(Easter(-2));

        Self {
            region: Region::SG,
            rules,
            observance: Observance::Nearest,
        }
    }

    /// Calendar made of exactly the given dates.
    pub fn from_dates(region: Region, dates: &[NaiveDate]) -> Self {
        Self {
            region,
            rules: dates.iter().copied().map(HolidayRule::Date).collect(),
            observance: Observance::Exact,
        }
    }

    /// Built-in calendar of `region`.
    pub fn for_region(region: Region) -> Self {
        match region {
            Region::UK => Self::uk(),
            Region::US => Self::us(),
            Region::SG => Self::sg(),
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        // Observed dates may cross a year boundary
        (date.year() - 1..=date.year() + 1).any(|year| self.holidays_in(year).contains(&date))
    }

    /// All holiday dates generated for `year`, observed dates included.
    pub fn holidays_in(&self, year: i32) -> BTreeSet<NaiveDate> {
        let actual: BTreeSet<NaiveDate> = self.rules.iter().filter_map(|rule| rule.date_in(year)).collect();
        let mut holidays = actual.clone();

        match self.observance {
            Observance::Exact => {}
            Observance::Nearest => {
                for date in &actual {
                    match date.weekday() {
                        Weekday::Sat => {
                            holidays.insert(*date - Duration::days(1));
                        }
                        Weekday::Sun => {
                            holidays.insert(*date + Duration::days(1));
                        }
                        _ => {}
                    }
                }
            }
            Observance::Substitute => {
                for date in actual.iter().filter(|d| is_weekend(**d)) {
                    let mut substitute = *date + Duration::days(1);
                    while is_weekend(substitute) || holidays.contains(&substitute) {
                        substitute += Duration::days(1);
                    }
                    holidays.insert(substitute);
                }
            }
        }

        holidays
    }
}

/// The set of calendars an invocation checks, one per region.
#[derive(Debug, Clone)]
pub struct Holidays {
    calendars: Vec<HolidayCalendar>,
}

impl Holidays {
    /// Builds the calendars, replacing a region's built-in rules with the
    /// explicit dates listed in `overrides`.
    pub fn new(overrides: &BTreeMap<Region, Vec<NaiveDate>>) -> Self {
        let calendars = Region::ALL
            .iter()
            .map(|region| match overrides.get(region) {
                Some(dates) => HolidayCalendar::from_dates(*region, dates),
                None => HolidayCalendar::for_region(*region),
            })
            .collect();

        Self { calendars }
    }

    pub fn calendar(&self, region: Region) -> &HolidayCalendar {
        // Calendars are built from Region::ALL, in order
        &self.calendars[region as usize]
    }

    /// Regions for which `date` is a holiday, in UK, US, SG order.
    pub fn regions_for(&self, date: NaiveDate) -> Vec<Region> {
        self.calendars
            .iter()
            .filter(|calendar| calendar.is_holiday(date))
            .map(HolidayCalendar::region)
            .collect()
    }
}

impl Default for Holidays {
    fn default() -> Self {
        Self::new(&BTreeMap::new())
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Early May bank holiday, moved to VE Day in 1995 and 2020.
fn uk_early_may(year: i32) -> Option<NaiveDate> {
    match year {
        1995 | 2020 => NaiveDate::from_ymd_opt(year, 5, 8),
        _ => nth_weekday_of_month(year, 5, Weekday::Mon, 1),
    }
}

/// Spring bank holiday, moved for the 2002, 2012 and 2022 jubilees.
fn uk_spring(year: i32) -> Option<NaiveDate> {
    match year {
        2002 | 2012 => NaiveDate::from_ymd_opt(year, 6, 4),
        2022 => NaiveDate::from_ymd_opt(year, 6, 2),
        _ => last_weekday_of_month(year, 5, Weekday::Mon),
    }
}

/// The `n`-th occurrence of `weekday` in a month.
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let days_until =
        (weekday.num_days_from_monday() as i32 - first.weekday().num_days_from_monday() as i32).rem_euclid(7) as u32;
    let date = NaiveDate::from_ymd_opt(year, month, 1 + days_until + (n.checked_sub(1)?) * 7)?;
    (date.month() == month).then_some(date)
}

/// The last occurrence of `weekday` in a month.
pub fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let last_day = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?.pred_opt()?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?.pred_opt()?
    };
    let days_back =
        (last_day.weekday().num_days_from_monday() as i32 - weekday.num_days_from_monday() as i32).rem_euclid(7);

    last_day.checked_sub_signed(Duration::days(days_back as i64))
}

/// Easter Sunday by the anonymous Gregorian algorithm.
#[allow(clippy::many_single_char_names)]
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}
