use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar day. Equality and ordering are by day, never by time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey {
            year: self.year(),
            month: self.month(),
        }
    }

    /// Same year and month as `self`, on `day`. `None` when the month is too short.
    pub fn with_day(&self, day: u32) -> Option<Self> {
        self.0.with_day(day).map(Self)
    }

    pub fn first_of_month(&self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }

    pub fn add_days(&self, days: i64) -> Self {
        self.0
            .checked_add_signed(Duration::days(days))
            .map(Self)
            .unwrap_or(*self)
    }

    /// Shifts by whole months, clamping the day to the target month's length.
    pub fn add_months(&self, months: i32) -> Self {
        let year = self.year();
        let month = self.month() as i32;
        let new_total = month - 1 + months;
        let new_month = (new_total.rem_euclid(12) + 1) as u32;
        let new_year = year + new_total.div_euclid(12);
        let max_day = days_in_month(new_year, new_month);
        let new_day = self.day().min(max_day);
        Self::from_ymd(new_year, new_month, new_day).unwrap_or(*self)
    }

    pub fn add_years(&self, years: i32) -> Self {
        self.add_months(years * 12)
    }

    /// Column of this day in a Sunday-first week.
    pub fn weekday_from_sunday(&self) -> usize {
        self.0.weekday().num_days_from_sunday() as usize
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map(Self)
    }
}

/// A year/month pair, the granularity of the coarse picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn first_day(&self) -> Option<CalendarDate> {
        CalendarDate::from_ymd(self.year, self.month, 1)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid month '{0}', expected YYYY-MM")]
pub struct MonthKeyParseError(String);

impl FromStr for MonthKey {
    type Err = MonthKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MonthKeyParseError(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(err)?;
        let year: i32 = year.parse().map_err(|_| err())?;
        let month: u32 = month.parse().map_err(|_| err())?;
        if !(1..=12).contains(&month) {
            return Err(err());
        }
        Ok(MonthKey { year, month })
    }
}

// ── Calendar helpers ──────────────────────────────────────────────────────────

pub(crate) fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

pub(crate) fn short_month_name(month: u32) -> &'static str {
    let name = month_name(month);
    name.get(..3).unwrap_or(name)
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    match (
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
        NaiveDate::from_ymd_opt(year, month, 1),
    ) {
        (Some(next), Some(first)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

#[cfg(test)]
pub(crate) fn d(y: i32, m: u32, day: u32) -> CalendarDate {
    CalendarDate::from_ymd(y, m, day).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_by_calendar_day() {
        assert!(d(2024, 3, 5) < d(2024, 3, 10));
        assert!(d(2023, 12, 31) < d(2024, 1, 1));
        assert_eq!(d(2024, 3, 5), d(2024, 3, 5));
    }

    #[test]
    fn test_parse_and_display() {
        let date: CalendarDate = "2024-06-12".parse().unwrap();
        assert_eq!(date, d(2024, 6, 12));
        assert_eq!(date.to_string(), "2024-06-12");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("12/06/2024".parse::<CalendarDate>().is_err());
        assert!("2024-02-30".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn test_with_day_in_short_month() {
        assert_eq!(d(2024, 6, 1).with_day(30), Some(d(2024, 6, 30)));
        assert_eq!(d(2024, 6, 1).with_day(31), None);
    }

    #[test]
    fn test_add_months_forward() {
        assert_eq!(d(2025, 1, 15).add_months(1), d(2025, 2, 15));
    }

    #[test]
    fn test_add_months_across_year() {
        assert_eq!(d(2025, 11, 10).add_months(3), d(2026, 2, 10));
    }

    #[test]
    fn test_add_months_backward_across_year() {
        assert_eq!(d(2025, 2, 10).add_months(-3), d(2024, 11, 10));
    }

    #[test]
    fn test_add_months_clamps_month_end() {
        assert_eq!(d(2025, 1, 31).add_months(1), d(2025, 2, 28));
        assert_eq!(d(2024, 1, 31).add_months(1), d(2024, 2, 29));
    }

    #[test]
    fn test_add_years_from_leap_day() {
        assert_eq!(d(2024, 2, 29).add_years(1), d(2025, 2, 28));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "Unknown");
        assert_eq!(short_month_name(9), "Sep");
    }

    #[test]
    fn test_month_key_parse() {
        let key: MonthKey = "2024-03".parse().unwrap();
        assert_eq!(key, MonthKey { year: 2024, month: 3 });
        assert_eq!(key.to_string(), "2024-03");
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("March".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_weekday_from_sunday() {
        // 2024-03-03 was a Sunday
        assert_eq!(d(2024, 3, 3).weekday_from_sunday(), 0);
        assert_eq!(d(2024, 3, 9).weekday_from_sunday(), 6);
    }
}
