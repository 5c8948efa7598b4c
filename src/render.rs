//! Plain-text rendering of a report.

use std::fmt::Write;

use chrono::Local;
use skycast_weather::display::{
    format_humidity, format_temperature, format_visibility, format_wind, long_date, weekday_short,
};
use skycast_weather::{DailySummary, Report, UnitSystem};

pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    let current = &report.current;
    let unit = report.unit;
    let today = report.fetched_at.with_timezone(&Local).date_naive();

    let _ = writeln!(out, "{}", current.location_label());
    let _ = writeln!(out, "{}", long_date(today));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {}  {}  {}",
        current.weather_icon().glyph(),
        format_temperature(current.temperature, unit),
        current.description
    );
    let _ = writeln!(
        out,
        "  Feels like {}   Humidity {}   Wind {}   Visibility {}",
        format_temperature(current.feels_like, unit),
        format_humidity(current.humidity),
        format_wind(current.wind_speed, unit),
        format_visibility(current.visibility)
    );

    if !report.forecast.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Forecast");
        for day in &report.forecast {
            let _ = writeln!(out, "{}", render_day(day, unit));
        }
    }

    out
}

fn render_day(day: &DailySummary, unit: UnitSystem) -> String {
    format!(
        "  {:<4}{}  {:>6}  {}",
        weekday_short(day.date),
        day.weather_icon().glyph(),
        format!("{}°{}", day.display_temperature(), unit.temperature_symbol()),
        day.description
    )
}

pub fn render_favorites(favorites: &[String]) -> String {
    if favorites.is_empty() {
        return "No favorite cities yet.\n".to_string();
    }

    let mut out = String::from("Favorites\n");
    for (i, city) in favorites.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, city);
    }
    out
}
