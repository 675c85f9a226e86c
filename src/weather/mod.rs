mod client;
mod models;

pub use client::WeatherClient;
pub use models::{condition_for, Condition, CurrentConditions, ForecastDay, WeatherReport};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Invalid weather URL: {0}")]
    Url(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Weather API error: status {0}")]
    Status(u16),
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}
