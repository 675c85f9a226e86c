// client.rs
use crate::weather::models::{build_report, CurrentResponse, ForecastResponse, WeatherReport, FORECAST_DAYS};
use crate::weather::WeatherError;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const FORECAST_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";

pub struct WeatherClient {
    client: Client,
    latitude: f64,
    longitude: f64,
}

impl WeatherClient {
    pub fn new(latitude: f64, longitude: f64, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        Ok(Self {
            client,
            latitude,
            longitude,
        })
    }

    pub fn current_url(&self) -> Result<Url, WeatherError> {
        Url::parse_with_params(
            FORECAST_ENDPOINT,
            &[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("hourly", "relative_humidity_2m".to_string()),
                ("temperature_unit", "fahrenheit".to_string()),
                ("windspeed_unit", "mph".to_string()),
                ("timezone", "auto".to_string()),
            ],
        )
        .map_err(|e| WeatherError::Url(e.to_string()))
    }

    pub fn forecast_url(&self) -> Result<Url, WeatherError> {
        Url::parse_with_params(
            FORECAST_ENDPOINT,
            &[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,weathercode".to_string(),
                ),
                ("temperature_unit", "fahrenheit".to_string()),
                ("timezone", "auto".to_string()),
                ("forecast_days", FORECAST_DAYS.to_string()),
            ],
        )
        .map_err(|e| WeatherError::Url(e.to_string()))
    }

    /// Current conditions plus the short forecast. Either request failing
    /// fails the whole report.
    pub fn fetch(&self) -> Result<WeatherReport, WeatherError> {
        let current: CurrentResponse = self.get_json(self.current_url()?)?;
        let forecast: ForecastResponse = self.get_json(self.forecast_url()?)?;
        Ok(build_report(current, forecast, chrono::Utc::now()))
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, WeatherError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let text = resp
            .text()
            .map_err(|e| WeatherError::Network(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| WeatherError::JsonParse(e.to_string()))
    }
}
