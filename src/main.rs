// Prevents additional console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use utero_lib::commands::{self, AppState};
use utero_lib::config::AppSettings;
use utero_lib::logging;

fn main() {
    let (settings, config_error) = match AppSettings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (AppSettings::default(), Some(e)),
    };

    logging::init(&settings.log_filter);
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "falling back to default settings");
    }
    tracing::info!(
        cycle_length = settings.default_cycle_length,
        period_length = settings.default_period_length,
        "starting utero"
    );

    tauri::Builder::default()
        .manage(AppState::new(&settings))
        .invoke_handler(tauri::generate_handler![
            commands::get_inputs,
            commands::update_inputs,
            commands::set_last_period_date,
            commands::adjust_cycle_length,
            commands::adjust_period_length,
            commands::get_prediction,
            commands::get_summary,
            commands::get_month,
            commands::show_month,
            commands::previous_month,
            commands::next_month,
            commands::current_month,
            commands::classify_day,
            commands::export_prediction,
        ])
        .run(tauri::generate_context!())
        .expect("error while running utero");
}
