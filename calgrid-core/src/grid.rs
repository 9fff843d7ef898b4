//! Month grid derivation.
//!
//! Grids are Sunday-first and 7 columns wide. Cells are rederived from the
//! month on every render and never stored.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use crate::format::month_name;

/// One slot of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    /// Padding before the first day of the month.
    Blank,
    Day(NaiveDate),
}

impl CalendarCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            CalendarCell::Blank => None,
            CalendarCell::Day(d) => Some(*d),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, CalendarCell::Blank)
    }
}

/// A calendar month. This is the month cursor the views navigate with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    first: NaiveDate,
}

impl Month {
    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Month {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// `month` is 1-based.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Month { first })
    }

    /// Parse `YYYY-MM`.
    pub fn parse(s: &str) -> Option<Self> {
        let (year, month) = s.trim().split_once('-')?;
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn days_in_month(&self) -> u32 {
        // Day before the first of next month. Saturates at the end of chrono's range.
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map(|last| last.day())
            .unwrap_or(31)
    }

    /// Blank cells before day 1: 0 for Sunday up to 6 for Saturday.
    pub fn first_weekday_offset(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    /// Move by `delta` months, rolling the year over as needed.
    /// Out-of-range results leave the month unchanged.
    pub fn shift(&self, delta: i32) -> Self {
        let months = Months::new(delta.unsigned_abs());
        let shifted = if delta >= 0 {
            self.first.checked_add_months(months)
        } else {
            self.first.checked_sub_months(months)
        };
        shifted.map(Month::of).unwrap_or(*self)
    }

    pub fn next(&self) -> Self {
        self.shift(1)
    }

    pub fn prev(&self) -> Self {
        self.shift(-1)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.first
            .iter_days()
            .take(self.days_in_month() as usize)
    }

    /// Header text, e.g. `March 2024`.
    pub fn title(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", month_name(self.month()), self.year())
    }
}

/// Cells of the month grid for the month containing `reference`: leading
/// blanks up to the weekday of the 1st, then every day. No trailing padding.
pub fn month_grid_cells(reference: NaiveDate) -> Vec<CalendarCell> {
    let month = Month::of(reference);
    let offset = month.first_weekday_offset() as usize;

    let mut cells = Vec::with_capacity(offset + month.days_in_month() as usize);
    cells.extend(std::iter::repeat_n(CalendarCell::Blank, offset));
    cells.extend(month.days().map(CalendarCell::Day));
    cells
}

/// Every date of the month containing `reference`, ascending.
pub fn month_day_list(reference: NaiveDate) -> Vec<NaiveDate> {
    Month::of(reference).days().collect()
}
