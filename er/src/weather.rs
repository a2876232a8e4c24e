//! Weather signal and providers
//!
//! The engine consumes a single [`WeatherSignal`] for the event date. Fetching
//! it is the only asynchronous step and lives entirely outside the engine:
//! [`fetch_signal_or_fallback`] bounds the fetch and substitutes the neutral
//! fallback signal on timeout or error.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::WeatherConfig;
use crate::error::EngineError;

/// Condition keywords classified as bad weather
const BAD_WEATHER: [&str; 8] = ["rain", "drizzle", "thunderstorm", "snow", "sleet", "hail", "fog", "mist"];

/// Below this temperature (°C) indoor space is recommended
const COLD_THRESHOLD_C: f64 = 5.0;

/// At or above this wind speed (km/h) indoor space is recommended
const HIGH_WIND_KMH: f64 = 50.0;

/// A single weather reading for the event date and location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WeatherSignal {
    /// Short condition, e.g. "Rain", "Clear"
    pub condition: String,

    /// Longer description from the source
    #[serde(default)]
    pub description: String,

    /// Temperature in °C
    #[serde(default)]
    pub temperature: f64,

    /// Chance of precipitation (0-100)
    #[serde(default)]
    pub precipitation: f64,

    /// Wind speed in km/h
    #[serde(default)]
    pub wind_speed_kmh: f64,

    /// Condition belongs to the rain/snow/storm/fog family
    #[serde(default)]
    pub is_bad_weather: bool,

    /// Indoor sheltering is recommended
    #[serde(default)]
    pub needs_indoor: bool,
}

impl WeatherSignal {
    /// Build a signal from raw readings, deriving the classification flags
    pub fn from_reading(condition: impl Into<String>, temperature: f64, precipitation: f64, wind_speed_kmh: f64) -> Self {
        let condition = condition.into();
        debug!(%condition, %temperature, %wind_speed_kmh, "WeatherSignal::from_reading: called");
        let bad = is_bad_weather(&condition);
        Self {
            description: String::new(),
            is_bad_weather: bad,
            needs_indoor: bad || temperature < COLD_THRESHOLD_C || wind_speed_kmh >= HIGH_WIND_KMH,
            condition,
            temperature,
            precipitation,
            wind_speed_kmh,
        }
    }

    /// Neutral signal used when no reading can be obtained
    pub fn fallback() -> Self {
        Self {
            condition: "Unknown".to_string(),
            description: "Weather unavailable".to_string(),
            temperature: 12.0,
            precipitation: 30.0,
            wind_speed_kmh: 15.0,
            is_bad_weather: false,
            needs_indoor: false,
        }
    }

    /// Which kind of hazard a bad-weather condition represents
    pub fn hazard(&self) -> WeatherHazard {
        WeatherHazard::classify(&self.condition)
    }
}

/// Sub-classification of adverse conditions; each calls for a different mitigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherHazard {
    /// Rain, snow, sleet, hail, storms
    Precipitation,
    /// Fog, mist, haze
    Visibility,
    /// Anything else flagged as bad by the source
    Other,
}

impl WeatherHazard {
    pub fn classify(condition: &str) -> Self {
        let c = condition.to_lowercase();
        if ["rain", "drizzle", "storm", "thunder", "snow", "sleet", "hail"]
            .iter()
            .any(|k| c.contains(k))
        {
            Self::Precipitation
        } else if ["fog", "mist", "haze"].iter().any(|k| c.contains(k)) {
            Self::Visibility
        } else {
            Self::Other
        }
    }
}

/// Check a condition against the bad-weather family
pub fn is_bad_weather(condition: &str) -> bool {
    let c = condition.to_lowercase();
    BAD_WEATHER.iter().any(|bad| c.contains(bad))
}

/// Source of weather readings
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions
    async fn current(&self) -> Result<WeatherSignal, EngineError>;

    /// Forecast for a calendar date
    async fn forecast(&self, date: NaiveDate) -> Result<WeatherSignal, EngineError>;
}

/// Fetch a signal within `timeout`, substituting the fallback on timeout or error
pub async fn fetch_signal_or_fallback(
    provider: &dyn WeatherProvider,
    date: Option<NaiveDate>,
    timeout: Duration,
) -> WeatherSignal {
    debug!(?date, ?timeout, "fetch_signal_or_fallback: called");
    let fetch = async {
        match date {
            Some(d) => provider.forecast(d).await,
            None => provider.current().await,
        }
    };

    match tokio::time::timeout(timeout, fetch).await {
        Ok(Ok(signal)) => {
            info!(condition = %signal.condition, "Weather signal fetched");
            signal
        }
        Ok(Err(e)) if e.is_weather() => {
            warn!("Weather source error, using fallback: {}", e);
            WeatherSignal::fallback()
        }
        Ok(Err(e)) => {
            warn!("Weather provider failed outside the weather source, using fallback: {}", e);
            WeatherSignal::fallback()
        }
        Err(_) => {
            warn!("Weather fetch timed out after {:?}, using fallback", timeout);
            WeatherSignal::fallback()
        }
    }
}

/// Which endpoint serves a requested date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastWindow {
    /// Today or earlier: use current conditions
    Current,
    /// Within the forecast horizon
    Forecast,
    /// Beyond the horizon: use the fallback
    OutOfRange,
}

impl ForecastWindow {
    pub fn for_date(date: NaiveDate, today: NaiveDate, forecast_days: i64) -> Self {
        let days = (date - today).num_days();
        debug!(%days, %forecast_days, "ForecastWindow::for_date: called");
        if days <= 0 {
            Self::Current
        } else if days > forecast_days {
            Self::OutOfRange
        } else {
            Self::Forecast
        }
    }
}

/// Provider for OpenWeatherMap-compatible endpoints
pub struct OpenWeatherProvider {
    http: Client,
    api_key: Option<String>,
    base_url: String,
    location: String,
    forecast_days: i64,
}

impl OpenWeatherProvider {
    /// Create a provider from configuration; a missing API key yields fallback signals
    pub fn from_config(config: &WeatherConfig) -> Result<Self, EngineError> {
        debug!(?config, "OpenWeatherProvider::from_config: called");
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            location: config.location.clone(),
            forecast_days: config.forecast_days,
        })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, endpoint: &str, api_key: &str) -> Result<T, EngineError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, "OpenWeatherProvider::get_json: called");
        let response = self
            .http
            .get(&url)
            .query(&[("q", self.location.as_str()), ("appid", api_key), ("units", "metric")])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self) -> Result<WeatherSignal, EngineError> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("OpenWeatherProvider::current: no api key branch");
            return Ok(WeatherSignal::fallback());
        };
        let payload: CurrentPayload = self.get_json("weather", api_key).await?;
        signal_from_current(&payload)
    }

    async fn forecast(&self, date: NaiveDate) -> Result<WeatherSignal, EngineError> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("OpenWeatherProvider::forecast: no api key branch");
            return Ok(WeatherSignal::fallback());
        };
        match ForecastWindow::for_date(date, Utc::now().date_naive(), self.forecast_days) {
            ForecastWindow::Current => self.current().await,
            ForecastWindow::OutOfRange => {
                debug!(%date, "OpenWeatherProvider::forecast: beyond horizon branch");
                Ok(WeatherSignal::fallback())
            }
            ForecastWindow::Forecast => {
                let payload: ForecastPayload = self.get_json("forecast", api_key).await?;
                signal_from_forecast(&payload, date)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConditionPayload {
    main: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainPayload {
    temp: f64,
}

#[derive(Debug, Default, Deserialize)]
struct WindPayload {
    /// Meters per second
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    weather: Vec<ConditionPayload>,
    main: MainPayload,
    #[serde(default)]
    wind: WindPayload,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    weather: Vec<ConditionPayload>,
    main: MainPayload,
    #[serde(default)]
    wind: WindPayload,
    /// Probability of precipitation (0-1)
    #[serde(default)]
    pop: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    list: Vec<ForecastEntry>,
}

fn ms_to_kmh(speed: f64) -> f64 {
    (speed * 3.6).round()
}

fn signal_from_current(payload: &CurrentPayload) -> Result<WeatherSignal, EngineError> {
    let condition = payload
        .weather
        .first()
        .ok_or_else(|| EngineError::WeatherPayload("no weather conditions in response".to_string()))?;
    let bad = is_bad_weather(&condition.main);
    let mut signal = WeatherSignal::from_reading(
        condition.main.clone(),
        payload.main.temp.round(),
        if bad { 70.0 } else { 0.0 },
        ms_to_kmh(payload.wind.speed),
    );
    signal.description = condition.description.clone();
    Ok(signal)
}

fn signal_from_forecast(payload: &ForecastPayload, date: NaiveDate) -> Result<WeatherSignal, EngineError> {
    let entry = payload
        .list
        .iter()
        .find(|e| DateTime::from_timestamp(e.dt, 0).map(|t| t.date_naive()) == Some(date))
        .or_else(|| payload.list.first())
        .ok_or_else(|| EngineError::WeatherPayload("empty forecast list".to_string()))?;
    let condition = entry
        .weather
        .first()
        .ok_or_else(|| EngineError::WeatherPayload("no weather conditions in forecast entry".to_string()))?;

    let mut signal = WeatherSignal::from_reading(
        condition.main.clone(),
        entry.main.temp.round(),
        entry.pop.map(|p| (p * 100.0).round()).unwrap_or(0.0),
        ms_to_kmh(entry.wind.speed),
    );
    signal.description = condition.description.clone();
    Ok(signal)
}
