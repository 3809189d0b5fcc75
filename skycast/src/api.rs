//! weatherapi.com forecast client
//!
//! One `GET <base>/forecast.json` per query, single attempt. The wire body is
//! decoded into private serde structs and mapped onto [`WeatherResult`].

use std::future::Future;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::state::{ForecastDay, WeatherResult};

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Days requested from the forecast endpoint (today plus three)
pub const FORECAST_DAYS: u8 = 4;

/// Why a fetch did not produce a [`WeatherResult`].
///
/// The `Display` text is what the weather screen shows after "Error: ".
#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-success HTTP status
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// Success status but the body has no current conditions
    #[error("Weather data not found")]
    DataNotFound,

    /// Connection, TLS or body read failure
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body is not the expected JSON
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Connection settings for weatherapi.com
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherApiConfig {
    /// API root without trailing slash
    pub base_url: String,
    pub api_key: String,
}

impl WeatherApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Full request URL for `city`, query values percent-encoded.
    pub fn forecast_url(&self, city: &str) -> String {
        format!(
            "{}/forecast.json?key={}&q={}&days={}&aqi=no&alerts=no",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(city),
            FORECAST_DAYS
        )
    }
}

/// Anything that can look up the forecast for a city.
///
/// The controller only talks to this trait, so tests can script responses
/// and timings without a network.
pub trait WeatherSource: Send + Sync + 'static {
    fn fetch_forecast(
        &self,
        city: &str,
    ) -> impl Future<Output = Result<WeatherResult, FetchError>> + Send;
}

/// HTTP implementation of [`WeatherSource`]
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    client: Client,
    config: WeatherApiConfig,
}

impl WeatherApiClient {
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: WeatherApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &WeatherApiConfig {
        &self.config
    }
}

impl WeatherSource for WeatherApiClient {
    #[instrument(skip(self))]
    async fn fetch_forecast(&self, city: &str) -> Result<WeatherResult, FetchError> {
        let url = self.config.forecast_url(city);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "forecast request rejected");
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_forecast(&body)
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    location: Option<Location>,
    current: Option<Current>,
    forecast: Option<Forecast>,
}

#[derive(Debug, Deserialize)]
struct Location {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Current {
    temp_c: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct Forecast {
    #[serde(default)]
    forecastday: Vec<WireForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WireForecastDay {
    day: Day,
}

#[derive(Debug, Deserialize)]
struct Day {
    avgtemp_c: f64,
    mintemp_c: f64,
    maxtemp_c: f64,
    condition: Condition,
}

#[derive(Debug, Deserialize)]
struct Condition {
    text: String,
    icon: String,
}

/// Decode a `forecast.json` body.
///
/// A body without `current` is [`FetchError::DataNotFound`]. A body with
/// `current` but no `location` has no city name to show and is reported the
/// same way. A missing `forecast` yields no days.
pub fn parse_forecast(body: &str) -> Result<WeatherResult, FetchError> {
    let response: ForecastResponse = serde_json::from_str(body)?;

    let (Some(current), Some(location)) = (response.current, response.location) else {
        return Err(FetchError::DataNotFound);
    };

    let forecast_days = response
        .forecast
        .map(|f| f.forecastday)
        .unwrap_or_default()
        .into_iter()
        .map(|entry| ForecastDay {
            condition_icon_url: absolute_icon_url(&entry.day.condition.icon),
            condition_text: entry.day.condition.text,
            avg_temp_c: entry.day.avgtemp_c,
            min_temp_c: entry.day.mintemp_c,
            max_temp_c: entry.day.maxtemp_c,
        })
        .collect();

    Ok(WeatherResult {
        city_name: location.name,
        temperature_c: current.temp_c,
        humidity_pct: current.humidity.round().clamp(0.0, 100.0) as u8,
        forecast_days,
    })
}

/// Icons come back protocol-relative (`//cdn...`).
pub fn absolute_icon_url(icon: &str) -> String {
    if icon.starts_with("//") {
        format!("https:{icon}")
    } else {
        icon.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(days: usize) -> String {
        let day = serde_json::json!({
            "day": {
                "avgtemp_c": 14.0,
                "mintemp_c": 10.5,
                "maxtemp_c": 18.0,
                "condition": { "text": "Sunny", "icon": "//cdn.weatherapi.com/weather/64x64/day/113.png" }
            }
        });
        serde_json::json!({
            "location": { "name": "London", "country": "United Kingdom" },
            "current": { "temp_c": 15.2, "humidity": 80 },
            "forecast": { "forecastday": vec![day; days] }
        })
        .to_string()
    }

    #[test]
    fn test_forecast_url() {
        let config = WeatherApiConfig::new("k3y").with_base_url("http://localhost:9000/v1/");
        assert_eq!(
            config.forecast_url("São Paulo"),
            "http://localhost:9000/v1/forecast.json?key=k3y&q=S%C3%A3o%20Paulo&days=4&aqi=no&alerts=no"
        );
    }

    #[test]
    fn test_parse_success() {
        let result = parse_forecast(&body(4)).unwrap();

        assert_eq!(result.city_name, "London");
        assert_eq!(result.temperature_c, 15.2);
        assert_eq!(result.humidity_pct, 80);
        assert_eq!(result.forecast_days.len(), 4);

        let today = &result.forecast_days[0];
        assert_eq!(today.condition_text, "Sunny");
        assert_eq!(today.min_temp_c, 10.5);
        assert_eq!(
            today.condition_icon_url,
            "https://cdn.weatherapi.com/weather/64x64/day/113.png"
        );
    }

    #[test]
    fn test_parse_missing_current() {
        let body = r#"{"location": {"name": "London"}, "forecast": {"forecastday": []}}"#;
        let err = parse_forecast(body).unwrap_err();
        assert!(matches!(err, FetchError::DataNotFound));
        assert_eq!(err.to_string(), "Weather data not found");
    }

    #[test]
    fn test_parse_missing_location() {
        let body = r#"{"current": {"temp_c": 15.2, "humidity": 80}}"#;
        assert!(matches!(parse_forecast(body), Err(FetchError::DataNotFound)));
    }

    #[test]
    fn test_parse_missing_forecast_is_empty() {
        let body = r#"{"location": {"name": "Oslo"}, "current": {"temp_c": -3.0, "humidity": 91}}"#;
        let result = parse_forecast(body).unwrap();
        assert!(result.forecast_days.is_empty());
        assert_eq!(result.humidity_pct, 91);
    }

    #[test]
    fn test_parse_malformed() {
        let err = parse_forecast("<html>oops</html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_http_error_message() {
        assert_eq!(
            FetchError::Http { status: 404 }.to_string(),
            "HTTP error! status: 404"
        );
    }

    #[test]
    fn test_absolute_icon_url() {
        assert_eq!(absolute_icon_url("//a/b.png"), "https://a/b.png");
        assert_eq!(absolute_icon_url("https://a/b.png"), "https://a/b.png");
    }
}
