use std::fmt;
use std::ops::RangeInclusive;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Accepted average cycle lengths, in days.
pub const CYCLE_LENGTH_RANGE: RangeInclusive<u32> = 15..=60;
/// Accepted period durations, in days.
pub const PERIOD_LENGTH_RANGE: RangeInclusive<u32> = 1..=10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CycleInputs {
    pub last_period_date: Option<NaiveDate>,
    pub cycle_length: u32,
    pub period_length: u32,
}

impl CycleInputs {
    /// Same inputs with both lengths pulled into their accepted ranges.
    pub fn clamped(self) -> Self {
        Self {
            last_period_date: self.last_period_date,
            cycle_length: clamp_cycle_length(i64::from(self.cycle_length)),
            period_length: clamp_period_length(i64::from(self.period_length)),
        }
    }
}

pub fn clamp_cycle_length(days: i64) -> u32 {
    clamp_to(days, &CYCLE_LENGTH_RANGE)
}

pub fn clamp_period_length(days: i64) -> u32 {
    clamp_to(days, &PERIOD_LENGTH_RANGE)
}

fn clamp_to(days: i64, range: &RangeInclusive<u32>) -> u32 {
    // Both bounds fit in u32, so the cast back is lossless.
    days.clamp(i64::from(*range.start()), i64::from(*range.end())) as u32
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CyclePrediction {
    pub last_period_date: NaiveDate,
    pub next_period_start_date: NaiveDate,
    pub ovulation_date: NaiveDate,
    pub fertile_window_start: NaiveDate,
    pub fertile_window_end: NaiveDate,
    pub period_length: u32,
}

impl CyclePrediction {
    /// Length of one projected cycle in days.
    pub fn cycle_days(&self) -> i64 {
        (self.next_period_start_date - self.last_period_date).num_days()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DayCategory {
    Period,
    Ovulation,
    Fertile,
    Plain,
}

/// How a calendar day is highlighted. `is_today` overlays any category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DayClassification {
    pub category: DayCategory,
    pub is_today: bool,
}

impl DayClassification {
    pub fn plain(is_today: bool) -> Self {
        Self {
            category: DayCategory::Plain,
            is_today,
        }
    }
}

impl fmt::Display for DayClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.category {
            DayCategory::Period => "Period",
            DayCategory::Ovulation => "Ovulation",
            DayCategory::Fertile => "Fertile",
            DayCategory::Plain if self.is_today => return f.write_str("Today"),
            DayCategory::Plain => "Plain",
        };
        if self.is_today {
            write!(f, "{label} + Today")
        } else {
            f.write_str(label)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub day: u32,
    pub in_displayed_month: bool,
    pub classification: DayClassification,
}

/// Data returned to frontend for a month view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub weekdays: Vec<String>,
    pub weeks: Vec<Vec<CalendarCell>>,
    pub prediction: Option<CyclePrediction>,
}

/// Human readable prediction dates, `"N/A"` when nothing is predicted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictionSummary {
    pub next_period: String,
    pub ovulation_day: String,
    pub fertile_window_start: String,
    pub fertile_window_end: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn clamps_lengths_to_ranges() {
        assert_eq!(clamp_cycle_length(10), 15);
        assert_eq!(clamp_cycle_length(28), 28);
        assert_eq!(clamp_cycle_length(90), 60);
        assert_eq!(clamp_period_length(-3), 1);
        assert_eq!(clamp_period_length(11), 10);
    }

    #[test]
    fn clamped_inputs_keep_date() {
        let inputs = CycleInputs {
            last_period_date: Some(date("2024-01-01")),
            cycle_length: 70,
            period_length: 0,
        };
        let clamped = inputs.clamped();
        assert_eq!(clamped.last_period_date, inputs.last_period_date);
        assert_eq!(clamped.cycle_length, 60);
        assert_eq!(clamped.period_length, 1);
    }

    #[test]
    fn cycle_days_spans_anchor_to_next_start() {
        let prediction = CyclePrediction {
            last_period_date: date("2024-01-01"),
            next_period_start_date: date("2024-01-29"),
            ovulation_date: date("2024-01-15"),
            fertile_window_start: date("2024-01-10"),
            fertile_window_end: date("2024-01-16"),
            period_length: 5,
        };
        assert_eq!(prediction.cycle_days(), 28);
    }

    #[test]
    fn classification_labels() {
        let period_today = DayClassification {
            category: DayCategory::Period,
            is_today: true,
        };
        assert_eq!(period_today.to_string(), "Period + Today");
        assert_eq!(DayClassification::plain(true).to_string(), "Today");
        assert_eq!(DayClassification::plain(false).to_string(), "Plain");
        let fertile = DayClassification {
            category: DayCategory::Fertile,
            is_today: false,
        };
        assert_eq!(fertile.to_string(), "Fertile");
    }
}
