//! Search session: the state behind one dashboard.
//!
//! A `Session` owns the API client, the selected unit system, the favorites
//! list and the report currently on screen. Front ends drive it and receive
//! loading/error notifications through a [`Presenter`].

use chrono::Utc;
use skycast_core::{AppError, Config, ConfigError, FavoritesError, UnitSystem, WeatherError};
use skycast_weather::{group_by_day, select_display_window, OpenWeatherClient, Report};

use crate::favorites::{search_term, Favorites};
use crate::store::KeyValueStore;

/// Display hooks a front end provides.
pub trait Presenter {
    /// Show or hide the loading indicator.
    fn set_loading(&mut self, loading: bool);

    /// Show a transient, dismissible error message.
    fn show_error(&mut self, message: &str);

    /// Dismiss the current error message, if any.
    fn clear_error(&mut self);
}

pub struct Session<S: KeyValueStore> {
    client: OpenWeatherClient,
    unit: UnitSystem,
    forecast_days: usize,
    favorites: Favorites<S>,
    current: Option<Report>,
}

impl<S: KeyValueStore> Session<S> {
    /// Build a session from config, loading favorites from `store`.
    pub fn new(config: &Config, store: S) -> Result<Self, AppError> {
        if config.weather.api_key.trim().is_empty() {
            return Err(ConfigError::MissingSetting("weather.api_key".to_string()).into());
        }
        if config.weather.forecast_days == 0 {
            return Err(
                ConfigError::Invalid("weather.forecast_days must be at least 1".to_string()).into(),
            );
        }

        let client = OpenWeatherClient::new(&config.weather)?;
        let favorites = Favorites::load(store, config.favorites.storage_key.as_str())?;

        Ok(Self {
            client,
            unit: config.weather.units,
            forecast_days: config.weather.forecast_days,
            favorites,
            current: None,
        })
    }

    pub fn unit(&self) -> UnitSystem {
        self.unit
    }

    /// Report currently on screen
    pub fn current(&self) -> Option<&Report> {
        self.current.as_ref()
    }

    pub fn favorites(&self) -> &[String] {
        self.favorites.list()
    }

    /// Search for `query`: current weather, then the forecast.
    ///
    /// The loading indicator is shown for both requests and always hidden
    /// afterwards. Failures are reported through `presenter` and returned;
    /// the previous report stays current.
    pub async fn search<P: Presenter>(
        &mut self,
        query: &str,
        presenter: &mut P,
    ) -> Result<&Report, AppError> {
        let city = query.trim();
        if city.is_empty() {
            let err = WeatherError::EmptyInput;
            presenter.show_error(err.user_message());
            return Err(err.into());
        }

        presenter.set_loading(true);
        presenter.clear_error();

        let result = self.fetch_report(city).await;

        presenter.set_loading(false);

        match result {
            Ok(report) => {
                tracing::info!(
                    "Search for {} returned {} forecast days",
                    city,
                    report.forecast.len()
                );
                Ok(&*self.current.insert(report))
            }
            Err(e) => {
                tracing::warn!("Search for {} failed: {}", city, e);
                presenter.show_error(e.user_message());
                Err(e.into())
            }
        }
    }

    async fn fetch_report(&self, city: &str) -> Result<Report, WeatherError> {
        let current = self.client.fetch_current(city, self.unit).await?;
        let samples = self.client.fetch_forecast(city, self.unit).await?;

        let groups = group_by_day(&samples);
        let forecast = select_display_window(&groups, self.forecast_days);

        Ok(Report {
            query: city.to_string(),
            current,
            forecast,
            unit: self.unit,
            fetched_at: Utc::now(),
        })
    }

    /// Switch units. A report on screen is fetched again in the new unit.
    pub async fn set_unit<P: Presenter>(
        &mut self,
        unit: UnitSystem,
        presenter: &mut P,
    ) -> Result<Option<&Report>, AppError> {
        self.unit = unit;

        let Some(query) = self.current.as_ref().map(|r| r.query.clone()) else {
            return Ok(None);
        };
        if self.current.as_ref().is_some_and(|r| r.unit == unit) {
            return Ok(self.current.as_ref());
        }

        self.search(&query, presenter).await.map(Some)
    }

    /// Save the location on screen as a favorite.
    pub fn add_current_to_favorites(&mut self) -> Result<String, AppError> {
        let label = self
            .current
            .as_ref()
            .map(|r| r.current.location_label())
            .ok_or(FavoritesError::NoCitySelected)?;

        self.favorites.add(&label)?;
        Ok(label)
    }

    pub fn remove_favorite(&mut self, label: &str) -> Result<bool, AppError> {
        Ok(self.favorites.remove(label)?)
    }

    /// Search the city part of a favorite label.
    pub async fn search_favorite<P: Presenter>(
        &mut self,
        label: &str,
        presenter: &mut P,
    ) -> Result<&Report, AppError> {
        self.search(search_term(label), presenter).await
    }
}
