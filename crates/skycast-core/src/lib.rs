pub mod config;
pub mod error;

pub use self::config::{
    Config, FavoritesConfig, UnitSystem, ValidationResult, WeatherConfig, API_KEY_PLACEHOLDER,
    MAX_FORECAST_DAYS,
};
pub use self::error::{
    AppError, ConfigError, FavoritesError, NetworkError, ReqwestErrorExt, StorageError,
    WeatherError,
};

use anyhow::Result;

/// Initialize logging. `RUST_LOG` overrides the default `info` filter.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("SkyCast core initialized");
    Ok(())
}
