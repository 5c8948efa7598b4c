//! Centralized error types for SkyCast.
//!
//! Every error carries a `user_message()` suitable for the transient error
//! line shown to the user; the `Display` output keeps the technical detail
//! for logs.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Favorites error: {0}")]
    Favorites(#[from] FavoritesError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Weather(e) => e.user_message(),
            AppError::Favorites(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors from a city search.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Empty search input")]
    EmptyInput,

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Unauthorized - API key rejected")]
    Unauthorized,

    #[error("Request failed: {0}")]
    NetworkOrServerFailure(#[from] NetworkError),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::EmptyInput => "Please enter a city name",
            WeatherError::CityNotFound(_) => {
                "City not found. Please check the spelling and try again."
            }
            WeatherError::Unauthorized => {
                "Invalid API key. Please check your OpenWeatherMap API key."
            }
            WeatherError::NetworkOrServerFailure(_) => {
                "Failed to fetch weather data. Please try again later."
            }
        }
    }
}

/// Errors from editing the favorites list.
#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("Already a favorite: {0}")]
    DuplicateFavorite(String),

    #[error("No city selected")]
    NoCitySelected,
}

impl FavoritesError {
    pub fn user_message(&self) -> &'static str {
        match self {
            FavoritesError::DuplicateFavorite(_) => "City is already in favorites",
            FavoritesError::NoCitySelected => "No city selected to add to favorites",
        }
    }
}

/// Key-value store errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Store read failed: {0}")]
    ReadFailed(String),

    #[error("Store write failed: {0}")]
    WriteFailed(String),

    #[error("Store data corrupted: {0}")]
    Corruption(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::ReadFailed(_) => "Unable to read saved data.",
            StorageError::WriteFailed(_) => "Failed to save changes. Please try again.",
            StorageError::Corruption(_) => {
                "Saved data may be corrupted. Consider deleting the favorites file."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::MissingSetting(_) => {
                "A required setting is missing. Check your settings."
            }
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        WeatherError::NetworkOrServerFailure(e.into_network_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_non_empty() {
        let messages = [
            WeatherError::EmptyInput.user_message(),
            WeatherError::CityNotFound("x".into()).user_message(),
            WeatherError::Unauthorized.user_message(),
            WeatherError::NetworkOrServerFailure(NetworkError::Timeout).user_message(),
            FavoritesError::DuplicateFavorite("x".into()).user_message(),
            FavoritesError::NoCitySelected.user_message(),
            StorageError::WriteFailed("x".into()).user_message(),
            ConfigError::Invalid("x".into()).user_message(),
        ];

        for message in messages {
            assert!(!message.is_empty());
        }
    }

    #[test]
    fn test_app_error_conversion() {
        let err: AppError = FavoritesError::NoCitySelected.into();
        assert!(matches!(
            err,
            AppError::Favorites(FavoritesError::NoCitySelected)
        ));

        let err: AppError = WeatherError::Unauthorized.into();
        assert!(matches!(err, AppError::Weather(WeatherError::Unauthorized)));
    }

    #[test]
    fn test_user_message_propagation() {
        let err = AppError::Weather(WeatherError::CityNotFound("Atlantis".into()));
        assert_eq!(
            err.user_message(),
            "City not found. Please check the spelling and try again."
        );

        let err = AppError::Favorites(FavoritesError::DuplicateFavorite("London, GB".into()));
        assert_eq!(err.user_message(), "City is already in favorites");
    }

    #[test]
    fn test_network_error_wraps_into_weather_error() {
        let err: WeatherError = NetworkError::ServerError {
            status: 500,
            message: "boom".into(),
        }
        .into();
        assert!(matches!(err, WeatherError::NetworkOrServerFailure(_)));
        assert!(err.to_string().contains("500"));
    }
}
