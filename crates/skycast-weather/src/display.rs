//! Formatting helpers shared by front ends.

use chrono::NaiveDate;
use skycast_core::UnitSystem;

use crate::aggregate::round_half_up;

/// Rounded temperature with unit, e.g. `22°C`
pub fn format_temperature(value: f64, unit: UnitSystem) -> String {
    format!("{}°{}", round_half_up(value), unit.temperature_symbol())
}

pub fn format_wind(speed: f64, unit: UnitSystem) -> String {
    format!("{} {}", speed, unit.wind_unit())
}

/// Visibility in kilometres with one decimal; `-` when the API omits it.
pub fn format_visibility(metres: Option<u32>) -> String {
    match metres {
        Some(m) => format!("{:.1} km", f64::from(m) / 1000.0),
        None => "-".to_string(),
    }
}

pub fn format_humidity(percent: u8) -> String {
    format!("{}%", percent)
}

/// Short weekday name for a forecast row, e.g. `Fri`
pub fn weekday_short(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Long date for the current-weather header, e.g. `Friday, March 1, 2024`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
