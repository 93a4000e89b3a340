use chrono::{Duration, NaiveDate};

use crate::models::{CycleInputs, CyclePrediction, PredictionSummary, CYCLE_LENGTH_RANGE};

/// Days from ovulation to the next period. Fixed regardless of cycle length.
pub const LUTEAL_PHASE_DAYS: i64 = 14;
/// Fertile window opens this many days before ovulation.
pub const FERTILE_DAYS_BEFORE_OVULATION: i64 = 5;
/// Fertile window closes this many days after ovulation.
pub const FERTILE_DAYS_AFTER_OVULATION: i64 = 1;

/// Predict the next period, ovulation day and fertile window.
/// Returns `None` without an anchor date or with a cycle length outside 15..=60.
pub fn predict(inputs: &CycleInputs) -> Option<CyclePrediction> {
    let Some(last_period_date) = inputs.last_period_date else {
        tracing::trace!("no anchor date, skipping prediction");
        return None;
    };
    if !CYCLE_LENGTH_RANGE.contains(&inputs.cycle_length) {
        tracing::trace!(
            cycle_length = inputs.cycle_length,
            "cycle length out of range, skipping prediction"
        );
        return None;
    }

    let next_period_start_date = add_days(last_period_date, i64::from(inputs.cycle_length))?;
    let ovulation_date = add_days(next_period_start_date, -LUTEAL_PHASE_DAYS)?;
    let fertile_window_start = add_days(ovulation_date, -FERTILE_DAYS_BEFORE_OVULATION)?;
    let fertile_window_end = add_days(ovulation_date, FERTILE_DAYS_AFTER_OVULATION)?;

    Some(CyclePrediction {
        last_period_date,
        next_period_start_date,
        ovulation_date,
        fertile_window_start,
        fertile_window_end,
        period_length: inputs.period_length,
    })
}

/// `None` when the result falls outside chrono's representable range.
pub(crate) fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}

/// Format the prediction for display, e.g. `"January 15, 2024"`.
pub fn summarize(prediction: Option<&CyclePrediction>) -> PredictionSummary {
    PredictionSummary {
        next_period: format_date(prediction.map(|p| p.next_period_start_date)),
        ovulation_day: format_date(prediction.map(|p| p.ovulation_date)),
        fertile_window_start: format_date(prediction.map(|p| p.fertile_window_start)),
        fertile_window_end: format_date(prediction.map(|p| p.fertile_window_end)),
    }
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%B %-d, %Y").to_string(),
        None => "N/A".to_string(),
    }
}
