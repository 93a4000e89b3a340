//! Cycle prediction and calendar highlighting.
//!
//! [`prediction::predict`] turns the last period date, average cycle length
//! and period duration into a [`models::CyclePrediction`].
//! [`calendar::classify`] projects that prediction six cycles back and
//! forward to decide how each calendar day is highlighted, and
//! [`tracker::Tracker`] keeps the inputs, the prediction and the displayed
//! month together for a frontend.

pub mod calendar;
#[cfg(feature = "desktop")]
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod prediction;
pub mod tracker;

pub use calendar::{classify, month_view, YearMonth};
pub use error::UteroError;
pub use models::{CycleInputs, CyclePrediction, DayCategory, DayClassification};
pub use prediction::predict;
pub use tracker::Tracker;
