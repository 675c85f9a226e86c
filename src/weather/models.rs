// models.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::Deserialize;

// Raw Open-Meteo payloads

#[derive(Debug, Deserialize)]
pub struct CurrentResponse {
    pub current_weather: CurrentWeather,
    #[serde(default)]
    pub hourly: Option<Hourly>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
    pub weathercode: u16,
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Hourly {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub relative_humidity_2m: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub daily: Daily,
}

#[derive(Debug, Default, Deserialize)]
pub struct Daily {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub weathercode: Vec<Option<u16>>,
}

// What the pages render

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub description: &'static str,
    pub icon: &'static str,
}

impl Condition {
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon)
    }
}

/// WMO weather interpretation code to a description and icon name.
pub fn condition_for(code: u16) -> Condition {
    let (description, icon) = match code {
        0 => ("Clear sky", "01d"),
        1 => ("Mainly clear", "01d"),
        2 => ("Partly cloudy", "02d"),
        3 => ("Overcast", "04d"),
        45 => ("Fog", "50d"),
        48 => ("Depositing rime fog", "50d"),
        51 => ("Light drizzle", "09d"),
        53 => ("Moderate drizzle", "09d"),
        55 => ("Dense drizzle", "09d"),
        56 => ("Light freezing drizzle", "09d"),
        57 => ("Dense freezing drizzle", "09d"),
        61 => ("Slight rain", "10d"),
        63 => ("Moderate rain", "10d"),
        65 => ("Heavy rain", "10d"),
        66 => ("Light freezing rain", "13d"),
        67 => ("Heavy freezing rain", "13d"),
        71 => ("Slight snow fall", "13d"),
        73 => ("Moderate snow fall", "13d"),
        75 => ("Heavy snow fall", "13d"),
        77 => ("Snow grains", "13d"),
        80 => ("Slight rain showers", "09d"),
        81 => ("Moderate rain showers", "09d"),
        82 => ("Violent rain showers", "09d"),
        85 => ("Slight snow showers", "13d"),
        86 => ("Heavy snow showers", "13d"),
        95 => ("Thunderstorm", "11d"),
        96 => ("Thunderstorm with slight hail", "11d"),
        99 => ("Thunderstorm with heavy hail", "11d"),
        _ => ("Unknown", "01d"),
    };
    Condition { description, icon }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature_f: i64,
    pub wind_mph: i64,
    pub humidity: i64,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub high_f: Option<i64>,
    pub low_f: Option<i64>,
    pub condition: Option<Condition>,
}

impl ForecastDay {
    /// "Mon", "Tue", ...
    pub fn weekday(&self) -> String {
        self.date.format("%a").to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
    pub fetched_at: DateTime<Utc>,
}

pub const FORECAST_DAYS: usize = 3;
const DEFAULT_HUMIDITY: i64 = 50;

pub fn build_report(
    current: CurrentResponse,
    forecast: ForecastResponse,
    fetched_at: DateTime<Utc>,
) -> WeatherReport {
    let humidity = current_humidity(&current);
    let now = current.current_weather;

    let daily = forecast.daily;
    let forecast = daily
        .time
        .iter()
        .enumerate()
        .filter_map(|(i, day)| {
            let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;
            let pick = |values: &[Option<f64>]| values.get(i).copied().flatten().map(|v| v.round() as i64);
            Some(ForecastDay {
                date,
                high_f: pick(&daily.temperature_2m_max),
                low_f: pick(&daily.temperature_2m_min),
                condition: daily.weathercode.get(i).copied().flatten().map(condition_for),
            })
        })
        .take(FORECAST_DAYS)
        .collect();

    WeatherReport {
        current: CurrentConditions {
            temperature_f: now.temperature.round() as i64,
            wind_mph: now.windspeed.round() as i64,
            humidity,
            condition: condition_for(now.weathercode),
        },
        forecast,
        fetched_at,
    }
}

/// Humidity for the hour of the current reading: the hourly entry with the
/// same timestamp, else the entry at that hour-of-day index, else 50%.
fn current_humidity(resp: &CurrentResponse) -> i64 {
    let Some(hourly) = &resp.hourly else {
        return DEFAULT_HUMIDITY;
    };
    let Some(time) = resp.current_weather.time.as_deref() else {
        return DEFAULT_HUMIDITY;
    };

    let index = hourly.time.iter().position(|t| t == time).or_else(|| {
        NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M")
            .ok()
            .map(|dt| dt.hour() as usize)
    });

    index
        .and_then(|i| hourly.relative_humidity_2m.get(i).copied().flatten())
        .map(|h| h.round() as i64)
        .unwrap_or(DEFAULT_HUMIDITY)
}
