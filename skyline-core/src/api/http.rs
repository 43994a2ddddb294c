use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::{DashboardError, Result},
    model::{
        Condition, ConditionKind, Coordinate, DayTemperatures, ForecastDay, HistoryEntry,
        Temperatures, WeatherSnapshot,
    },
};

use super::WeatherBackend;

/// [`WeatherBackend`] speaking JSON over HTTP to the dashboard's API server.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base: Url,
    http: Client,
}

impl HttpBackend {
    pub fn new(base: Url) -> Self {
        Self {
            base,
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Append `segments` to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                DashboardError::Validation(format!("API base URL {} cannot take a path", self.base))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url) -> Result<(StatusCode, String)> {
        debug!(%method, %url, "backend request");
        let res = self.http.request(method, url).send().await?;
        read_body(res).await
    }
}

async fn read_body(res: Response) -> Result<(StatusCode, String)> {
    let status = res.status();
    let body = res.text().await?;
    Ok((status, body))
}

#[async_trait]
impl WeatherBackend for HttpBackend {
    async fn lookup_weather(&self, city: &str) -> Result<WeatherSnapshot> {
        let url = self.endpoint(&["api", "weather", city])?;
        let (status, body) = self.send(Method::GET, url).await?;
        if !status.is_success() {
            return Err(lookup_error(status, &body));
        }

        let parsed: WireCurrent = decode(&body, "weather")?;
        let snapshot = WeatherSnapshot::try_from(parsed)?;
        info!(city = %snapshot.city, "weather lookup succeeded");
        Ok(snapshot)
    }

    async fn lookup_forecast(&self, coord: Coordinate) -> Result<Vec<ForecastDay>> {
        let lat = coord.lat.to_string();
        let lon = coord.lon.to_string();
        let url = self.endpoint(&["api", "forecast", &lat, &lon])?;
        let (status, body) = self.send(Method::GET, url).await?;
        if !status.is_success() {
            return Err(lookup_error(status, &body));
        }

        let parsed: WireForecast = decode(&body, "forecast")?;
        let days = forecast_days(parsed)?;
        info!(lat = coord.lat, lon = coord.lon, days = days.len(), "forecast lookup succeeded");
        Ok(days)
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>> {
        let url = self.endpoint(&["api", "history"])?;
        let (status, body) = self
            .send(Method::GET, url)
            .await
            .map_err(|e| DashboardError::HistoryFetchFailed(e.to_string()))?;
        if !status.is_success() {
            return Err(DashboardError::HistoryFetchFailed(format!(
                "status {}: {}",
                status,
                truncate_body(&body)
            )));
        }

        let entries: Vec<WireHistoryEntry> = serde_json::from_str(&body)
            .map_err(|e| DashboardError::HistoryFetchFailed(format!("invalid history JSON: {e}")))?;
        Ok(entries.into_iter().map(HistoryEntry::from).collect())
    }

    async fn append_history(&self, city: &str) -> Result<()> {
        let url = self.endpoint(&["api", "history"])?;
        let res = self
            .http
            .post(url)
            .json(&AppendHistoryRequest { city })
            .send()
            .await
            .map_err(|e| DashboardError::HistoryWriteFailed(e.to_string()))?;
        let (status, body) = read_body(res)
            .await
            .map_err(|e| DashboardError::HistoryWriteFailed(e.to_string()))?;
        if !status.is_success() {
            return Err(DashboardError::HistoryWriteFailed(format!(
                "status {}: {}",
                status,
                truncate_body(&body)
            )));
        }
        Ok(())
    }

    async fn clear_history(&self) -> Result<()> {
        let url = self.endpoint(&["api", "history"])?;
        let (status, body) = self
            .send(Method::DELETE, url)
            .await
            .map_err(|e| DashboardError::HistoryWriteFailed(e.to_string()))?;
        if !status.is_success() {
            return Err(DashboardError::HistoryWriteFailed(format!(
                "status {}: {}",
                status,
                truncate_body(&body)
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct WireCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct WireCondition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct WireMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct WireWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct WireSys {
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WireCurrent {
    name: String,
    coord: Option<WireCoord>,
    weather: Vec<WireCondition>,
    main: WireMain,
    wind: WireWind,
    visibility: Option<f64>,
    #[serde(default)]
    sys: WireSys,
}

#[derive(Debug, Deserialize)]
struct WireDayTemp {
    day: f64,
    min: f64,
    max: f64,
}

#[derive(Debug, Deserialize)]
struct WireDay {
    dt: i64,
    temp: WireDayTemp,
    humidity: u8,
    wind_speed: f64,
    weather: Vec<WireCondition>,
}

#[derive(Debug, Deserialize)]
struct WireForecast {
    daily: Vec<WireDay>,
}

#[derive(Debug, Deserialize)]
struct WireHistoryEntry {
    city: String,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct WireErrorBody {
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct AppendHistoryRequest<'a> {
    city: &'a str,
}

impl From<WireCondition> for Condition {
    fn from(w: WireCondition) -> Self {
        Self {
            kind: ConditionKind::parse(&w.main),
            description: w.description,
        }
    }
}

impl TryFrom<WireCurrent> for WeatherSnapshot {
    type Error = DashboardError;

    fn try_from(w: WireCurrent) -> Result<Self> {
        let mut conditions = w.weather.into_iter().map(Condition::from);
        let condition = conditions.next().ok_or_else(|| {
            DashboardError::Decode(format!("weather for '{}' has no condition entries", w.name))
        })?;

        Ok(Self {
            city: w.name,
            country: w.sys.country,
            condition,
            extra_conditions: conditions.collect(),
            temperature: Temperatures {
                current: w.main.temp,
                max: w.main.temp_max,
                min: w.main.temp_min,
                feels_like: w.main.feels_like,
            },
            humidity: w.main.humidity,
            wind_speed_mps: w.wind.speed,
            pressure_hpa: w.main.pressure,
            visibility_m: w.visibility,
            sunrise: w.sys.sunrise.and_then(unix_to_utc),
            sunset: w.sys.sunset.and_then(unix_to_utc),
            coord: w.coord.map(|c| Coordinate {
                lat: c.lat,
                lon: c.lon,
            }),
        })
    }
}

impl TryFrom<WireDay> for ForecastDay {
    type Error = DashboardError;

    fn try_from(w: WireDay) -> Result<Self> {
        let timestamp = unix_to_utc(w.dt).ok_or_else(|| {
            DashboardError::Decode(format!("forecast timestamp {} out of range", w.dt))
        })?;
        let condition = w
            .weather
            .into_iter()
            .next()
            .map(Condition::from)
            .ok_or_else(|| {
                DashboardError::Decode(format!("forecast day {} has no condition", w.dt))
            })?;

        Ok(Self {
            timestamp,
            condition,
            temperature: DayTemperatures {
                day: w.temp.day,
                max: w.temp.max,
                min: w.temp.min,
            },
            humidity: w.humidity,
            wind_speed_mps: w.wind_speed,
        })
    }
}

impl From<WireHistoryEntry> for HistoryEntry {
    fn from(w: WireHistoryEntry) -> Self {
        Self {
            city: w.city,
            timestamp: w.timestamp,
        }
    }
}

fn forecast_days(forecast: WireForecast) -> Result<Vec<ForecastDay>> {
    let mut days = forecast
        .daily
        .into_iter()
        .map(ForecastDay::try_from)
        .collect::<Result<Vec<_>>>()?;
    days.sort_by_key(|d| d.timestamp);
    Ok(days)
}

fn decode<T: serde::de::DeserializeOwned>(body: &str, what: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| DashboardError::Decode(format!("{what}: {e}")))
}

fn lookup_error(status: StatusCode, body: &str) -> DashboardError {
    let message = serde_json::from_str::<WireErrorBody>(body).ok().and_then(|b| b.message);
    if status == StatusCode::NOT_FOUND {
        DashboardError::LookupNotFound { message }
    } else {
        DashboardError::LookupFailed {
            status: status.as_u16(),
            message,
        }
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
