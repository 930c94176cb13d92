use chrono::{Datelike, Month, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar month an attendance sheet covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid YYYY-MM month")]
pub struct YearMonthParseError(String);

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// Named-month constructor; the month needs no validation.
    pub fn from_month(year: i32, month: Month) -> Self {
        Self {
            year,
            month: month.number_from_month(),
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Every calendar day of the month in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.month;
        self.first_day()
            .iter_days()
            .take_while(move |day| day.month() == month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = YearMonthParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || YearMonthParseError(raw.to_string());
        let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = YearMonthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// Parses month names ("June", "jun") and numbers ("6", "06").
pub fn parse_month(raw: &str) -> Option<Month> {
    let trimmed = raw.trim();
    if let Ok(number) = trimmed.parse::<u8>() {
        return Month::try_from(number).ok();
    }
    trimmed.parse::<Month>().ok()
}

// Fixed-date holidays observed every year: (month, day).
const ANNUAL_HOLIDAYS: &[(u32, u32)] = &[(1, 1), (12, 25)];

// Eid al-Fitr and Eid al-Adha closures.
const EID_HOLIDAYS: &[(i32, u32, u32)] = &[
    (2025, 3, 31),
    (2025, 4, 1),
    (2025, 4, 2),
    (2025, 6, 6),
    (2025, 6, 7),
    (2026, 3, 20),
    (2026, 3, 21),
    (2026, 5, 27),
    (2026, 5, 28),
];

/// Holiday table used to derive working days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendar {
    annual: Vec<(u32, u32)>,
    dated: Vec<NaiveDate>,
}

impl HolidayCalendar {
    pub fn standard() -> Self {
        let dated = EID_HOLIDAYS
            .iter()
            .filter_map(|&(year, month, day)| NaiveDate::from_ymd_opt(year, month, day))
            .collect();

        Self {
            annual: ANNUAL_HOLIDAYS.to_vec(),
            dated,
        }
    }

    pub fn empty() -> Self {
        Self {
            annual: Vec::new(),
            dated: Vec::new(),
        }
    }

    pub fn with_holiday(mut self, date: NaiveDate) -> Self {
        if !self.dated.contains(&date) {
            self.dated.push(date);
        }
        self
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.annual
            .iter()
            .any(|&(month, day)| date.month() == month && date.day() == day)
            || self.dated.contains(&date)
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        date.weekday() != Weekday::Sun && !self.is_holiday(date)
    }

    pub fn working_days(&self, month: YearMonth) -> Vec<NaiveDate> {
        month
            .days()
            .filter(|day| self.is_working_day(*day))
            .collect()
    }
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn parses_and_formats_year_month() {
        let month: YearMonth = "2025-06".parse().expect("parse");
        assert_eq!(YearMonth::from_month(2025, Month::June), month);
        assert_eq!(month.year(), 2025);
        assert_eq!(month.month(), 6);
        assert_eq!(month.to_string(), "2025-06");
        assert!("2025-13".parse::<YearMonth>().is_err());
        assert!("June".parse::<YearMonth>().is_err());
    }

    #[test]
    fn enumerates_every_day_of_month() {
        let february = YearMonth::new(2024, 2).expect("valid");
        assert_eq!(february.days().count(), 29);
        let december = YearMonth::new(2025, 12).expect("valid");
        assert_eq!(december.days().last(), Some(date(2025, 12, 31)));
    }

    #[test]
    fn working_days_skip_sundays_and_holidays() {
        let calendar = HolidayCalendar::standard();
        // June 2025: 30 days, 5 Sundays, Eid on Fri 6th and Sat 7th.
        let june = YearMonth::new(2025, 6).expect("valid");
        let days = calendar.working_days(june);
        assert_eq!(days.len(), 23);
        assert!(!days.contains(&date(2025, 6, 1)));
        assert!(!days.contains(&date(2025, 6, 6)));
        assert!(days.contains(&date(2025, 6, 2)));
    }

    #[test]
    fn annual_holidays_apply_to_any_year() {
        let calendar = HolidayCalendar::standard();
        assert!(calendar.is_holiday(date(2031, 12, 25)));
        assert!(calendar.is_holiday(date(2027, 1, 1)));
        assert!(!calendar.is_holiday(date(2027, 6, 6)));
        assert!(!HolidayCalendar::empty().is_holiday(date(2025, 12, 25)));
    }

    #[test]
    fn month_names_and_numbers_parse() {
        assert_eq!(parse_month("June"), Some(Month::June));
        assert_eq!(parse_month(" jan "), Some(Month::January));
        assert_eq!(parse_month("09"), Some(Month::September));
        assert_eq!(parse_month("13"), None);
        assert_eq!(parse_month("Smarch"), None);
    }
}
