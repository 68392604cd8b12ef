//! calendar arithmetic for monthly installments.
//!
//! all dates are plain calendar dates; payments are bucketed by the
//! (year, month) they fall in.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// a calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1 = january
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// following month, rolling the year after december
    pub fn succ(self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// the given day of this month, if it exists
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// months from `self` (inclusive) up to `end` (exclusive)
    pub fn until(self, end: YearMonth) -> impl Iterator<Item = YearMonth> {
        std::iter::successors(Some(self), |m| Some(m.succ())).take_while(move |m| *m < end)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// month in which the first installment falls for a loan starting on `start`
pub fn first_payment_month(start: NaiveDate) -> YearMonth {
    // loans started in august pay first in september
    if start.month() == 8 {
        return YearMonth::new(start.year(), 9);
    }
    YearMonth::from_date(start).succ()
}

/// add whole months, clamping to the last day of shorter months
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// full months elapsed from `start` to `now`; zero if `now` is before `start`.
///
/// a month only counts once the same day-of-month has been reached, so
/// jan 31 -> feb 28 is zero months and jan 31 -> mar 31 is two.
pub fn months_elapsed(start: NaiveDate, now: DateTime<Utc>) -> u32 {
    let today = now.date_naive();
    if today <= start {
        return 0;
    }

    let calendar_months = (today.year() - start.year()) * 12
        + today.month() as i32
        - start.month() as i32;
    let calendar_months = calendar_months.max(0) as u32;

    if add_months(start, calendar_months) > today {
        calendar_months.saturating_sub(1)
    } else {
        calendar_months
    }
}

/// whole days from `now` until midnight of `date`, truncated toward zero
pub fn days_until(date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let target = date.and_time(NaiveTime::MIN);
    (target - now.naive_utc()).num_days()
}

/// day-of-month range in which the installment is currently due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueWindow {
    pub start_day: u32,
    pub end_day: u32,
}

impl Default for DueWindow {
    fn default() -> Self {
        Self {
            start_day: 25,
            end_day: 30,
        }
    }
}

impl DueWindow {
    pub fn contains(&self, day: u32) -> bool {
        day >= self.start_day && day <= self.end_day
    }

    /// day is after the window closed
    pub fn has_passed(&self, day: u32) -> bool {
        day > self.end_day
    }

    /// date the window opens in `month`
    pub fn opens(&self, month: YearMonth) -> Option<NaiveDate> {
        month.day(self.start_day)
    }

    /// date the window closes in `month`; `None` when the month is too short
    /// to contain the configured end day (february for the default window)
    pub fn closes(&self, month: YearMonth) -> Option<NaiveDate> {
        month.day(self.end_day)
    }
}
