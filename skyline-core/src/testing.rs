//! In-memory backend for unit tests.

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    api::WeatherBackend,
    error::{DashboardError, Result},
    model::{
        Condition, ConditionKind, Coordinate, DayTemperatures, ForecastDay, HistoryEntry,
        Temperatures, WeatherSnapshot,
    },
};

/// Scripted backend. Unknown cities answer 404 with a backend message, a
/// missing forecast answers 500, missing history fails the fetch.
#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    pub weather: Mutex<HashMap<String, WeatherSnapshot>>,
    pub forecast: Mutex<Option<Vec<ForecastDay>>>,
    pub history: Mutex<Option<Vec<HistoryEntry>>>,
    pub fail_append: AtomicBool,
    pub fail_clear: AtomicBool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn with_city(self, snapshot: WeatherSnapshot) -> Self {
        self.weather.lock().unwrap().insert(snapshot.city.clone(), snapshot);
        self
    }

    pub fn with_forecast(self, days: Vec<ForecastDay>) -> Self {
        *self.forecast.lock().unwrap() = Some(days);
        self
    }

    pub fn with_history(self, entries: Vec<HistoryEntry>) -> Self {
        *self.history.lock().unwrap() = Some(entries);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl WeatherBackend for FakeBackend {
    async fn lookup_weather(&self, city: &str) -> Result<WeatherSnapshot> {
        self.record(format!("weather:{city}"));
        self.weather
            .lock()
            .unwrap()
            .get(city)
            .cloned()
            .ok_or_else(|| DashboardError::LookupNotFound {
                message: Some("city not found".into()),
            })
    }

    async fn lookup_forecast(&self, coord: Coordinate) -> Result<Vec<ForecastDay>> {
        self.record(format!("forecast:{},{}", coord.lat, coord.lon));
        self.forecast
            .lock()
            .unwrap()
            .clone()
            .ok_or(DashboardError::LookupFailed {
                status: 500,
                message: None,
            })
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>> {
        self.record("history".into());
        self.history
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| DashboardError::HistoryFetchFailed("status 503".into()))
    }

    async fn append_history(&self, city: &str) -> Result<()> {
        self.record(format!("append:{city}"));
        if self.fail_append.load(Ordering::SeqCst) {
            return Err(DashboardError::HistoryWriteFailed("status 500".into()));
        }
        Ok(())
    }

    async fn clear_history(&self) -> Result<()> {
        self.record("clear".into());
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(DashboardError::HistoryWriteFailed("status 500".into()));
        }
        Ok(())
    }
}

pub(crate) fn snapshot(city: &str, temp: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        city: city.to_string(),
        country: Some("LK".into()),
        condition: Condition {
            kind: ConditionKind::Clouds,
            description: "scattered clouds".into(),
        },
        extra_conditions: vec![],
        temperature: Temperatures {
            current: temp,
            max: temp + 2.0,
            min: temp - 2.0,
            feels_like: temp + 1.0,
        },
        humidity: 78,
        wind_speed_mps: 4.0,
        pressure_hpa: 1011.0,
        visibility_m: Some(10000.0),
        sunrise: None,
        sunset: None,
        coord: Some(Coordinate {
            lat: 6.93,
            lon: 79.85,
        }),
    }
}

pub(crate) fn week(start: i64) -> Vec<ForecastDay> {
    (0..7)
        .map(|i| ForecastDay {
            timestamp: DateTime::from_timestamp(start + i * 86_400, 0).unwrap(),
            condition: Condition {
                kind: ConditionKind::Rain,
                description: "moderate rain".into(),
            },
            temperature: DayTemperatures {
                day: 27.0,
                max: 30.0,
                min: 24.0,
            },
            humidity: 80,
            wind_speed_mps: 6.0,
        })
        .collect()
}

pub(crate) fn entry(city: &str, ts: i64) -> HistoryEntry {
    HistoryEntry {
        city: city.to_string(),
        timestamp: DateTime::<Utc>::from_timestamp(ts, 0).unwrap(),
    }
}
