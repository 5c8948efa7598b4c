use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skycast_core::UnitSystem;

use crate::aggregate::DailySummary;

/// Icon categories mapped from OpenWeatherMap icon codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    Sun,
    Moon,
    CloudSun,
    CloudMoon,
    #[default]
    Cloud,
    CloudRain,
    CloudLightning,
    CloudSnow,
}

impl WeatherIcon {
    /// Convert an OpenWeatherMap icon code (e.g. `"10d"`) to a WeatherIcon
    /// See: https://openweathermap.org/weather-conditions
    pub fn from_code(code: &str) -> Self {
        match code {
            "01d" => Self::Sun,
            "01n" => Self::Moon,
            "02d" => Self::CloudSun,
            "02n" => Self::CloudMoon,
            "03d" | "03n" | "04d" | "04n" => Self::Cloud,
            "09d" | "09n" | "10d" | "10n" => Self::CloudRain,
            "11d" | "11n" => Self::CloudLightning,
            "13d" | "13n" => Self::CloudSnow,
            "50d" | "50n" => Self::Cloud, // Mist
            _ => Self::Cloud,             // Unknown codes default to cloud
        }
    }

    /// Get icon name
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Moon => "moon",
            Self::CloudSun => "cloud_sun",
            Self::CloudMoon => "cloud_moon",
            Self::Cloud => "cloud",
            Self::CloudRain => "cloud_rain",
            Self::CloudLightning => "cloud_lightning",
            Self::CloudSnow => "cloud_snow",
        }
    }

    /// Terminal glyph for the icon
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Sun => "☀",
            Self::Moon => "☾",
            Self::CloudSun => "⛅",
            Self::CloudMoon => "☁",
            Self::Cloud => "☁",
            Self::CloudRain => "☂",
            Self::CloudLightning => "⚡",
            Self::CloudSnow => "❄",
        }
    }
}

/// One forecast data point (3-hour resolution)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Seconds since the Unix epoch
    pub timestamp: i64,
    pub temperature: f64,
    pub description: String,
    pub icon: String,
}

impl Sample {
    pub fn new(
        timestamp: i64,
        temperature: f64,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            temperature,
            description: description.into(),
            icon: icon.into(),
        }
    }
}

/// Current weather conditions for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    /// Visibility in metres
    pub visibility: Option<u32>,
    pub description: String,
    pub icon: String,
}

impl CurrentConditions {
    /// Label used for display and for favorites, e.g. "London, GB"
    pub fn location_label(&self) -> String {
        if self.country.is_empty() {
            self.city.clone()
        } else {
            format!("{}, {}", self.city, self.country)
        }
    }

    pub fn weather_icon(&self) -> WeatherIcon {
        WeatherIcon::from_code(&self.icon)
    }
}

/// Everything shown for one search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// City as typed by the user
    pub query: String,
    pub current: CurrentConditions,
    pub forecast: Vec<DailySummary>,
    pub unit: UnitSystem,
    pub fetched_at: DateTime<Utc>,
}
