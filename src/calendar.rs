use chrono::{Datelike, Duration, Local, Month, NaiveDate};
use num_traits::FromPrimitive;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};
use std::slice::Chunks;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

/// A day in the calendar, without any time of day attached.
pub type CalendarDate = NaiveDate;

pub const DAYS_PER_WEEK: usize = 7;

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    match month {
        Month::February if is_leap_year(year) => 29,
        Month::February => 28,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

fn month_from_number(number: u32) -> Month {
    Month::from_u32(number).expect("month number is always in 1..=12")
}

/// A month of a specific year.
///
/// This is what the calendar grid shows. Its first day serves as the
/// anchor for all grid computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthIndex {
    index: Month,
    year: i32,
}

impl MonthIndex {
    /// Builds the index, clamped to the months whose whole grid lies in
    /// chrono's date range.
    pub fn new(index: Month, year: i32) -> Self {
        MonthIndex { index, year }.clamp(MonthIndex::earliest(), MonthIndex::latest())
    }

    /// Builds the index from a 1-based month number. Months outside the
    /// supported range give `None`.
    pub fn from_ym(year: i32, month: u32) -> Option<Self> {
        Month::from_u32(month)
            .map(|index| MonthIndex { index, year })
            .filter(|m| (MonthIndex::earliest()..=MonthIndex::latest()).contains(m))
    }

    /// Earliest month that can be shown. The month of `NaiveDate::MIN`
    /// has no room for leading padding.
    pub fn earliest() -> Self {
        MonthIndex::from_total(MonthIndex::total_of(&NaiveDate::MIN) + 1)
    }

    /// Latest month that can be shown. The month of `NaiveDate::MAX` has
    /// no room for trailing padding.
    pub fn latest() -> Self {
        MonthIndex::from_total(MonthIndex::total_of(&NaiveDate::MAX) - 1)
    }

    fn total_of<T: Datelike>(date: &T) -> i64 {
        date.year() as i64 * 12 + date.month0() as i64
    }

    fn total(&self) -> i64 {
        self.year as i64 * 12 + self.index.number_from_month() as i64 - 1
    }

    fn from_total(total: i64) -> Self {
        MonthIndex {
            index: month_from_number(total.rem_euclid(12) as u32 + 1),
            year: total.div_euclid(12) as i32,
        }
    }

    pub fn month(&self) -> Month {
        self.index
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn first_day(&self) -> CalendarDate {
        NaiveDate::from_ymd_opt(self.year, self.index.number_from_month(), 1)
            .expect("month index is kept within chrono's date range")
    }

    pub fn num_days(&self) -> u32 {
        days_of_month(&self.index, self.year)
    }

    /// Weekday of the first day, counted from Sunday (0) to Saturday (6).
    pub fn first_weekday(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        date.year() == self.year && date.month() == self.index.number_from_month()
    }

    /// Moves `delta` months forwards (or backwards if negative), stopping
    /// at the ends of the supported range.
    pub fn shift(&self, delta: i64) -> Self {
        let total = self
            .total()
            .saturating_add(delta)
            .clamp(MonthIndex::earliest().total(), MonthIndex::latest().total());

        MonthIndex::from_total(total)
    }

    pub fn next(&self) -> Self {
        self.shift(1)
    }

    pub fn prev(&self) -> Self {
        self.shift(-1)
    }
}

impl Default for MonthIndex {
    fn default() -> Self {
        MonthIndex::from(Local::now().date_naive())
    }
}

impl<T: Datelike> From<T> for MonthIndex {
    fn from(m: T) -> Self {
        MonthIndex::new(month_from_number(m.month()), m.year())
    }
}

impl Add<u32> for MonthIndex {
    type Output = MonthIndex;
    fn add(self, rhs: u32) -> Self::Output {
        self.shift(rhs as i64)
    }
}

impl Sub<u32> for MonthIndex {
    type Output = MonthIndex;
    fn sub(self, rhs: u32) -> Self::Output {
        self.shift(-(rhs as i64))
    }
}

impl Ord for MonthIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total().cmp(&other.total())
    }
}

impl PartialOrd for MonthIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.index.name(), self.year)
    }
}

impl FromStr for MonthIndex {
    type Err = Error;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            Error::new(
                ErrorKind::MonthParse,
                &format!("expected YYYY-MM, got '{}'", s),
            )
        };

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;

        MonthIndex::from_ym(year, month).ok_or_else(invalid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: CalendarDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

impl DayCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// Lays out `visible` as a Sunday-first grid of whole weeks.
///
/// The grid starts with the trailing days of the previous month so that
/// day 1 lands on its weekday column, and is filled up with the leading
/// days of the next month until the last week is complete.
pub fn generate(
    visible: MonthIndex,
    selected: Option<CalendarDate>,
    today: CalendarDate,
) -> Vec<DayCell> {
    let leading = visible.first_weekday() as usize;
    let days = visible.num_days() as usize;
    let trailing = (DAYS_PER_WEEK - (leading + days) % DAYS_PER_WEEK) % DAYS_PER_WEEK;

    let start = visible.first_day() - Duration::days(leading as i64);

    start
        .iter_days()
        .take(leading + days + trailing)
        .map(|date| DayCell {
            date,
            is_current_month: visible.contains(&date),
            is_today: date == today,
            is_selected: selected == Some(date),
        })
        .collect()
}

/// Splits a generated grid into its weeks.
pub fn weeks(cells: &[DayCell]) -> Chunks<'_, DayCell> {
    cells.chunks(DAYS_PER_WEEK)
}
