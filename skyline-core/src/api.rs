use crate::{
    Config,
    error::Result,
    model::{Coordinate, ForecastDay, HistoryEntry, WeatherSnapshot},
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod http;

pub use http::HttpBackend;

/// The weather dashboard's backend: weather/forecast lookups and the
/// server-side search history.
///
/// Implementations convert wire data into [`crate::model`] types, so nothing
/// past this boundary sees raw JSON.
#[async_trait]
pub trait WeatherBackend: Send + Sync + Debug {
    /// `GET /api/weather/{city}`
    async fn lookup_weather(&self, city: &str) -> Result<WeatherSnapshot>;

    /// `GET /api/forecast/{lat}/{lon}`; days come back ordered by timestamp.
    async fn lookup_forecast(&self, coord: Coordinate) -> Result<Vec<ForecastDay>>;

    /// `GET /api/history`, most recent first.
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>>;

    /// `POST /api/history`
    async fn append_history(&self, city: &str) -> Result<()>;

    /// `DELETE /api/history`
    async fn clear_history(&self) -> Result<()>;
}

/// Construct the HTTP backend described by `config`.
pub fn backend_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherBackend>> {
    let base = config.api_base_url()?;
    Ok(Arc::new(HttpBackend::new(base)))
}
