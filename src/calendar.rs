use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};

use crate::error::UteroError;
use crate::models::{CalendarCell, CyclePrediction, DayCategory, DayClassification, MonthView};
use crate::prediction::add_days;

/// Cycles projected on each side of the reference cycle.
/// A fixed bound: days further out than this are never highlighted.
pub const PROJECTED_CYCLES: i64 = 6;

pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A displayed calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
    last: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, UteroError> {
        if !(1..=12).contains(&month) {
            return Err(UteroError::InvalidMonth { month });
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(UteroError::DateOutOfRange)?;
        let last = if month == 12 {
            NaiveDate::from_ymd_opt(year, 12, 31)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1).and_then(|d| d.pred_opt())
        }
        .ok_or(UteroError::DateOutOfRange)?;
        Ok(Self { first, last })
    }

    pub fn containing(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let last = if date.month() == 12 {
            date.with_day(31)
        } else {
            first
                .with_month(date.month() + 1)
                .and_then(|d| d.pred_opt())
        }
        .unwrap_or(date);
        Self { first, last }
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

    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.first..=self.last).contains(&date)
    }

    /// Move by `months`, crossing year boundaries as needed.
    pub fn shift(&self, months: i32) -> Result<Self, UteroError> {
        let index = i64::from(self.year()) * 12 + i64::from(self.month()) - 1 + i64::from(months);
        let year = i32::try_from(index.div_euclid(12)).map_err(|_| UteroError::DateOutOfRange)?;
        let month = index.rem_euclid(12) as u32 + 1;
        Self::new(year, month)
    }

    /// e.g. `"January 2024"`.
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

/// Classify a single calendar day against the projected cycles.
///
/// Period days win over ovulation, ovulation over the fertile window.
/// `is_today` is set whenever `day == today`, whatever the category.
pub fn classify(
    day: NaiveDate,
    prediction: Option<&CyclePrediction>,
    today: NaiveDate,
) -> DayClassification {
    let is_today = day == today;
    let category = prediction
        .and_then(|p| cycle_category(day, p))
        .unwrap_or(DayCategory::Plain);
    DayClassification { category, is_today }
}

fn cycle_category(day: NaiveDate, prediction: &CyclePrediction) -> Option<DayCategory> {
    let span = prediction.cycle_days();
    let offsets = projection_offsets(span);
    let period_tail = i64::from(prediction.period_length) - 1;

    let in_period = offsets.clone().any(|i| {
        let Some(start) = project(prediction.last_period_date, i, span) else {
            return false;
        };
        period_end(start, period_tail).is_some_and(|end| (start..=end).contains(&day))
    });
    if in_period {
        return Some(DayCategory::Period);
    }

    for i in offsets {
        if project(prediction.ovulation_date, i, span) == Some(day) {
            return Some(DayCategory::Ovulation);
        }
        let start = project(prediction.fertile_window_start, i, span);
        let end = project(prediction.fertile_window_end, i, span);
        if let (Some(start), Some(end)) = (start, end) {
            if (start..=end).contains(&day) {
                return Some(DayCategory::Fertile);
            }
        }
    }

    None
}

/// Last day of a period starting at `start`, saturating at the end of the
/// calendar. `None` for an empty period.
fn period_end(start: NaiveDate, tail: i64) -> Option<NaiveDate> {
    if tail < 0 {
        return None;
    }
    Some(add_days(start, tail).unwrap_or(NaiveDate::MAX))
}

/// A degenerate span cannot be scaled, so only the reference cycle is used.
fn projection_offsets(span: i64) -> RangeInclusive<i64> {
    if span > 0 {
        -PROJECTED_CYCLES..=PROJECTED_CYCLES
    } else {
        0..=0
    }
}

fn project(date: NaiveDate, offset: i64, span: i64) -> Option<NaiveDate> {
    add_days(date, offset.checked_mul(span)?)
}

/// Every day shown for `month`: whole Sunday-to-Saturday weeks, padded with
/// days from the neighbouring months.
pub fn month_grid(month: YearMonth) -> Result<Vec<NaiveDate>, UteroError> {
    let first = month.first_day();
    let last = month.last_day();
    let lead = i64::from(first.weekday().num_days_from_sunday());
    let trail = 6 - i64::from(last.weekday().num_days_from_sunday());
    let start = add_days(first, -lead).ok_or(UteroError::DateOutOfRange)?;
    let end = add_days(last, trail).ok_or(UteroError::DateOutOfRange)?;

    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

pub fn month_view(
    month: YearMonth,
    prediction: Option<&CyclePrediction>,
    today: NaiveDate,
) -> Result<MonthView, UteroError> {
    let cells: Vec<CalendarCell> = month_grid(month)?
        .into_iter()
        .map(|date| CalendarCell {
            date,
            day: date.day(),
            in_displayed_month: month.contains(date),
            classification: classify(date, prediction, today),
        })
        .collect();

    Ok(MonthView {
        year: month.year(),
        month: month.month(),
        title: month.title(),
        weekdays: WEEKDAYS.iter().map(|d| d.to_string()).collect(),
        weeks: cells.chunks(7).map(<[CalendarCell]>::to_vec).collect(),
        prediction: prediction.copied(),
    })
}
