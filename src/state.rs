// src/state.rs
use crate::config::AppConfig;
use crate::content::{Catalog, ContentError};
use crate::errors::ServerError;
use crate::loader::{ListingLoader, LoadedListings, LoaderError, LoaderSettings};
use crate::storage::NamespacedStorage;
use crate::weather::{WeatherClient, WeatherError, WeatherReport};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Everything a request handler can reach. Built once in `main`.
pub struct AppState {
    pub config: AppConfig,
    pub loader: ListingLoader,
    pub storage: NamespacedStorage,
    /// Neighborhoods, services, FAQ, members and courses.
    pub content: Catalog,
    /// `None` when weather is disabled; an error is rendered as a notice.
    pub weather: Option<Result<WeatherReport, WeatherError>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, StartupError> {
        let loader = ListingLoader::new(LoaderSettings::from(&config))?;
        let content = Catalog::embedded()?;
        let storage = NamespacedStorage::open(&config.storage_path, config.storage_prefix.clone());
        let weather = config.weather_enabled.then(|| fetch_weather(&config));

        Ok(Self {
            config,
            loader,
            storage,
            content,
            weather,
        })
    }

    /// The catalog, or a data error if not even the fallback is usable.
    pub fn listings(&self) -> Result<LoadedListings, ServerError> {
        self.loader
            .load()
            .map_err(|e| ServerError::DataError(e.to_string()))
    }
}

fn fetch_weather(config: &AppConfig) -> Result<WeatherReport, WeatherError> {
    let client = WeatherClient::new(config.latitude, config.longitude, config.http_timeout)?;
    let result = client.fetch();
    match &result {
        Ok(report) => tracing::info!(
            temperature_f = report.current.temperature_f,
            condition = report.current.condition.description,
            "weather loaded"
        ),
        Err(e) => tracing::warn!(error = %e, "weather unavailable"),
    }
    result
}
