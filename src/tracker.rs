use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::{self, YearMonth};
use crate::config::AppSettings;
use crate::error::UteroError;
use crate::models::*;
use crate::prediction;

/// The current inputs, their derived prediction and the displayed month.
///
/// Every input change recomputes the prediction before returning, so
/// readers never observe a stale value.
#[derive(Debug, Clone)]
pub struct Tracker {
    inputs: CycleInputs,
    prediction: Option<CyclePrediction>,
    displayed: YearMonth,
}

#[derive(Serialize)]
struct Export<'a> {
    inputs: &'a CycleInputs,
    prediction: Option<&'a CyclePrediction>,
    summary: PredictionSummary,
}

impl Tracker {
    /// Start with the last period on `today` and the configured lengths.
    pub fn new(settings: &AppSettings, today: NaiveDate) -> Self {
        let inputs = CycleInputs {
            last_period_date: Some(today),
            cycle_length: settings.default_cycle_length,
            period_length: settings.default_period_length,
        }
        .clamped();
        let mut tracker = Self {
            inputs,
            prediction: None,
            displayed: YearMonth::containing(today),
        };
        tracker.recompute();
        tracker
    }

    pub fn inputs(&self) -> &CycleInputs {
        &self.inputs
    }

    pub fn prediction(&self) -> Option<&CyclePrediction> {
        self.prediction.as_ref()
    }

    /// Replace all inputs as given. Lengths are not clamped, so an
    /// out-of-range cycle length leaves no prediction.
    pub fn set_inputs(&mut self, inputs: CycleInputs) {
        self.inputs = inputs;
        self.recompute();
    }

    /// Replace all inputs at once, clamping both lengths into range.
    pub fn update_inputs(&mut self, inputs: CycleInputs) {
        self.set_inputs(inputs.clamped());
    }

    pub fn set_last_period_date(&mut self, date: Option<NaiveDate>) {
        self.inputs.last_period_date = date;
        self.recompute();
    }

    pub fn set_cycle_length(&mut self, days: i64) {
        self.inputs.cycle_length = clamp_cycle_length(days);
        self.recompute();
    }

    pub fn set_period_length(&mut self, days: i64) {
        self.inputs.period_length = clamp_period_length(days);
        self.recompute();
    }

    pub fn adjust_cycle_length(&mut self, delta: i64) {
        self.set_cycle_length(i64::from(self.inputs.cycle_length).saturating_add(delta));
    }

    pub fn adjust_period_length(&mut self, delta: i64) {
        self.set_period_length(i64::from(self.inputs.period_length).saturating_add(delta));
    }

    fn recompute(&mut self) {
        self.prediction = prediction::predict(&self.inputs);
        tracing::debug!(
            last_period_date = ?self.inputs.last_period_date,
            cycle_length = self.inputs.cycle_length,
            period_length = self.inputs.period_length,
            next_period = ?self.prediction.map(|p| p.next_period_start_date),
            "prediction recomputed"
        );
    }

    pub fn displayed_month(&self) -> YearMonth {
        self.displayed
    }

    pub fn show_month(&mut self, month: YearMonth) {
        self.displayed = month;
    }

    /// Move the displayed month by `months` (negative goes back).
    pub fn step_month(&mut self, months: i32) -> Result<YearMonth, UteroError> {
        self.displayed = self.displayed.shift(months)?;
        Ok(self.displayed)
    }

    pub fn show_current_month(&mut self, today: NaiveDate) -> YearMonth {
        self.displayed = YearMonth::containing(today);
        self.displayed
    }

    pub fn classify(&self, day: NaiveDate, today: NaiveDate) -> DayClassification {
        calendar::classify(day, self.prediction(), today)
    }

    pub fn month_view(&self, today: NaiveDate) -> Result<MonthView, UteroError> {
        calendar::month_view(self.displayed, self.prediction(), today)
    }

    pub fn summary(&self) -> PredictionSummary {
        prediction::summarize(self.prediction())
    }

    /// Inputs, prediction and summary as pretty JSON.
    pub fn export_json(&self) -> Result<String, UteroError> {
        let export = Export {
            inputs: &self.inputs,
            prediction: self.prediction(),
            summary: self.summary(),
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }
}
