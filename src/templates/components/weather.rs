use crate::weather::{WeatherError, WeatherReport};
use maud::{html, Markup};

pub fn weather_panel(weather: Option<&Result<WeatherReport, WeatherError>>) -> Markup {
    let Some(weather) = weather else {
        return html! {};
    };

    html! {
        section class="card weather" aria-label="Local weather" {
            h2 { "Rexburg Weather" }
            @match weather {
                Ok(report) => {
                    div class="current-weather" {
                        img src=(report.current.condition.icon_url()) alt=(report.current.condition.description) width="60" height="60";
                        div class="current-temp" { (report.current.temperature_f) "°F" }
                        div class="weather-description" { (report.current.condition.description) }
                        div class="weather-details" {
                            div { "Humidity: " (report.current.humidity) "%" }
                            div { "Wind: " (report.current.wind_mph) " mph" }
                        }
                    }
                    div class="forecast" {
                        @for day in &report.forecast {
                            div class="forecast-day" {
                                h4 { (day.weekday()) }
                                @if let Some(high) = day.high_f {
                                    div class="forecast-temp" { (high) "°F" }
                                }
                            }
                        }
                    }
                }
                Err(_) => {
                    div class="weather-error" { "Unable to load weather data. Please try again later." }
                    div class="forecast" { "Forecast unavailable" }
                }
            }
        }
    }
}
