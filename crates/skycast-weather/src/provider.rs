//! OpenWeatherMap client for the current weather and 5-day/3-hour forecast endpoints.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use skycast_core::{NetworkError, UnitSystem, WeatherConfig, WeatherError};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::types::{CurrentConditions, Sample};

const USER_AGENT: &str = concat!("SkyCast/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct ConditionPayload {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    name: String,
    #[serde(default)]
    sys: SysPayload,
    weather: Vec<ConditionPayload>,
    main: MainPayload,
    #[serde(default)]
    wind: WindPayload,
    visibility: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct SysPayload {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MainPayload {
    temp: f64,
    feels_like: Option<f64>,
    humidity: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
struct WindPayload {
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    list: Vec<ForecastEntryPayload>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntryPayload {
    dt: i64,
    main: MainPayload,
    weather: Vec<ConditionPayload>,
}

fn first_condition(weather: Vec<ConditionPayload>) -> Result<ConditionPayload, WeatherError> {
    weather.into_iter().next().ok_or_else(|| {
        NetworkError::InvalidResponse("response has no weather conditions".to_string()).into()
    })
}

impl TryFrom<CurrentPayload> for CurrentConditions {
    type Error = WeatherError;

    fn try_from(payload: CurrentPayload) -> Result<Self, Self::Error> {
        let condition = first_condition(payload.weather)?;
        Ok(Self {
            city: payload.name,
            country: payload.sys.country.unwrap_or_default(),
            temperature: payload.main.temp,
            feels_like: payload.main.feels_like.unwrap_or(payload.main.temp),
            humidity: payload.main.humidity.unwrap_or(0),
            wind_speed: payload.wind.speed,
            visibility: payload.visibility,
            description: condition.description,
            icon: condition.icon,
        })
    }
}

impl TryFrom<ForecastEntryPayload> for Sample {
    type Error = WeatherError;

    fn try_from(entry: ForecastEntryPayload) -> Result<Self, Self::Error> {
        let condition = first_condition(entry.weather)?;
        Ok(Sample::new(
            entry.dt,
            entry.main.temp,
            condition.description,
            condition.icon,
        ))
    }
}

/// Client for the OpenWeatherMap 2.5 API
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch current conditions for `city`.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_current(
        &self,
        city: &str,
        units: UnitSystem,
    ) -> Result<CurrentConditions, WeatherError> {
        let payload: CurrentPayload = self.get("weather", city, units).await?;
        let current = CurrentConditions::try_from(payload)?;

        tracing::info!("Fetched current weather for {}", current.location_label());
        Ok(current)
    }

    /// Fetch the 3-hour forecast samples for `city`, in feed order.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_forecast(
        &self,
        city: &str,
        units: UnitSystem,
    ) -> Result<Vec<Sample>, WeatherError> {
        let payload: ForecastPayload = self.get("forecast", city, units).await?;
        let samples = payload
            .list
            .into_iter()
            .map(Sample::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!("Fetched {} forecast samples for {}", samples.len(), city);
        Ok(samples)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
        units: UnitSystem,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!("GET {} (q={}, units={})", url, city, units.as_query());

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", units.as_query()),
            ])
            .send()
            .await?;

        Self::handle_response(response, city).await
    }

    /// Map the response status to a search error, or parse the body.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
        city: &str,
    ) -> Result<T, WeatherError> {
        let status = response.status();

        if status.is_success() {
            return response.json().await.map_err(|e| {
                NetworkError::InvalidResponse(format!("JSON parse error: {}", e)).into()
            });
        }

        match status {
            StatusCode::NOT_FOUND => Err(WeatherError::CityNotFound(city.to_string())),
            StatusCode::UNAUTHORIZED => Err(WeatherError::Unauthorized),
            _ => {
                let text = response.text().await.unwrap_or_default();
                tracing::warn!("Weather API returned {}: {}", status, text);
                Err(NetworkError::ServerError {
                    status: status.as_u16(),
                    message: text,
                }
                .into())
            }
        }
    }
}
