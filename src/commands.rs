use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use tauri::State;

use crate::calendar::YearMonth;
use crate::config::AppSettings;
use crate::error::UteroError;
use crate::models::*;
use crate::tracker::Tracker;

/// App state holding the single tracker the webview renders from.
pub struct AppState {
    pub tracker: Mutex<Tracker>,
}

impl AppState {
    pub fn new(settings: &AppSettings) -> Self {
        Self::with_tracker(Tracker::new(settings, today()))
    }

    pub fn with_tracker(tracker: Tracker) -> Self {
        Self {
            tracker: Mutex::new(tracker),
        }
    }

    fn tracker(&self) -> Result<MutexGuard<'_, Tracker>, String> {
        self.tracker.lock().map_err(|e| e.to_string())
    }

    /// Replace all inputs with a single recompute.
    fn update_inputs(
        &self,
        last_period_date: &str,
        cycle_length: u32,
        period_length: u32,
    ) -> Result<Option<CyclePrediction>, String> {
        let last_period_date = parse_date(last_period_date).map_err(|e| e.to_string())?;
        let mut tracker = self.tracker()?;
        tracker.update_inputs(CycleInputs {
            last_period_date,
            cycle_length,
            period_length,
        });
        Ok(tracker.prediction().copied())
    }

    fn set_last_period_date(&self, date: &str) -> Result<Option<CyclePrediction>, String> {
        let date = parse_date(date).map_err(|e| e.to_string())?;
        let mut tracker = self.tracker()?;
        tracker.set_last_period_date(date);
        Ok(tracker.prediction().copied())
    }

    fn show_month(&self, year: i32, month: u32, today: NaiveDate) -> Result<MonthView, String> {
        let month = YearMonth::new(year, month).map_err(|e| e.to_string())?;
        let mut tracker = self.tracker()?;
        tracker.show_month(month);
        tracker.month_view(today).map_err(|e| e.to_string())
    }

    fn step_month(&self, months: i32, today: NaiveDate) -> Result<MonthView, String> {
        let mut tracker = self.tracker()?;
        let shown = tracker.step_month(months).map_err(|e| e.to_string())?;
        tracing::debug!(year = shown.year(), month = shown.month(), "month changed");
        tracker.month_view(today).map_err(|e| e.to_string())
    }

    fn classify_day(&self, date: &str, today: NaiveDate) -> Result<DayClassification, String> {
        let date = parse_date(date)
            .map_err(|e| e.to_string())?
            .ok_or("date is required")?;
        let tracker = self.tracker()?;
        Ok(tracker.classify(date, today))
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// `YYYY-MM-DD`, or an empty string for "no date".
fn parse_date(input: &str) -> Result<Option<NaiveDate>, UteroError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| UteroError::InvalidDate {
            input: input.to_string(),
        })
}

#[tauri::command]
pub fn get_inputs(state: State<'_, AppState>) -> Result<CycleInputs, String> {
    let tracker = state.tracker()?;
    Ok(*tracker.inputs())
}

#[tauri::command]
pub fn update_inputs(
    last_period_date: String,
    cycle_length: u32,
    period_length: u32,
    state: State<'_, AppState>,
) -> Result<Option<CyclePrediction>, String> {
    state.update_inputs(&last_period_date, cycle_length, period_length)
}

#[tauri::command]
pub fn set_last_period_date(
    date: String,
    state: State<'_, AppState>,
) -> Result<Option<CyclePrediction>, String> {
    state.set_last_period_date(&date)
}

#[tauri::command]
pub fn adjust_cycle_length(delta: i32, state: State<'_, AppState>) -> Result<CycleInputs, String> {
    let mut tracker = state.tracker()?;
    tracker.adjust_cycle_length(i64::from(delta));
    Ok(*tracker.inputs())
}

#[tauri::command]
pub fn adjust_period_length(
    delta: i32,
    state: State<'_, AppState>,
) -> Result<CycleInputs, String> {
    let mut tracker = state.tracker()?;
    tracker.adjust_period_length(i64::from(delta));
    Ok(*tracker.inputs())
}

#[tauri::command]
pub fn get_prediction(state: State<'_, AppState>) -> Result<Option<CyclePrediction>, String> {
    let tracker = state.tracker()?;
    Ok(tracker.prediction().copied())
}

#[tauri::command]
pub fn get_summary(state: State<'_, AppState>) -> Result<PredictionSummary, String> {
    let tracker = state.tracker()?;
    Ok(tracker.summary())
}

#[tauri::command]
pub fn get_month(state: State<'_, AppState>) -> Result<MonthView, String> {
    let tracker = state.tracker()?;
    tracker.month_view(today()).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn show_month(year: i32, month: u32, state: State<'_, AppState>) -> Result<MonthView, String> {
    state.show_month(year, month, today())
}

#[tauri::command]
pub fn previous_month(state: State<'_, AppState>) -> Result<MonthView, String> {
    state.step_month(-1, today())
}

#[tauri::command]
pub fn next_month(state: State<'_, AppState>) -> Result<MonthView, String> {
    state.step_month(1, today())
}

#[tauri::command]
pub fn current_month(state: State<'_, AppState>) -> Result<MonthView, String> {
    let today = today();
    let mut tracker = state.tracker()?;
    tracker.show_current_month(today);
    tracker.month_view(today).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn classify_day(date: String, state: State<'_, AppState>) -> Result<DayClassification, String> {
    state.classify_day(&date, today())
}

#[tauri::command]
pub fn export_prediction(state: State<'_, AppState>) -> Result<String, String> {
    let tracker = state.tracker()?;
    tracker.export_json().map_err(|e| e.to_string())
}
