//! Weather data for SkyCast
//!
//! Fetches current conditions and the 3-hour forecast from OpenWeatherMap
//! and reduces the forecast to daily summaries.

pub mod aggregate;
pub mod display;
pub mod provider;
pub mod types;

pub use aggregate::{
    dominant, group_by_day, group_by_day_in, select_display_window, summarize,
    DailySummary, DayGroup, DISPLAY_WINDOW_DAYS,
};
pub use provider::OpenWeatherClient;
pub use skycast_core::UnitSystem;
pub use types::*;
