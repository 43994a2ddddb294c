use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Primary weather category as reported by the backend (`weather[0].main`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionKind {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Fog,
    Other(String),
}

impl ConditionKind {
    /// Parse a category name, ignoring case. Unknown names are kept verbatim.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "clear" => Self::Clear,
            "clouds" => Self::Clouds,
            "rain" => Self::Rain,
            "drizzle" => Self::Drizzle,
            "thunderstorm" => Self::Thunderstorm,
            "snow" => Self::Snow,
            "mist" => Self::Mist,
            "fog" => Self::Fog,
            _ => Self::Other(value.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Rain => "Rain",
            Self::Drizzle => "Drizzle",
            Self::Thunderstorm => "Thunderstorm",
            Self::Snow => "Snow",
            Self::Mist => "Mist",
            Self::Fog => "Fog",
            Self::Other(name) => name,
        }
    }

    /// Icon key used by both result panels.
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Clear => "sun",
            Self::Clouds => "cloud",
            Self::Rain | Self::Drizzle => "cloud_rain",
            Self::Thunderstorm => "cloud_lightning",
            Self::Snow => "cloud_snow",
            Self::Mist | Self::Fog => "cloud_fog",
            Self::Other(_) => "sun",
        }
    }
}

impl std::fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub kind: ConditionKind,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// Temperatures in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperatures {
    pub current: f64,
    pub max: f64,
    pub min: f64,
    pub feels_like: f64,
}

/// A single point-in-time current-weather reading for one city.
///
/// Values stay in source units (Celsius, m/s, hPa, meters); conversion happens
/// only when a view renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: Option<String>,
    /// First condition entry reported by the backend.
    pub condition: Condition,
    /// Any further entries, in backend order.
    pub extra_conditions: Vec<Condition>,
    pub temperature: Temperatures,
    pub humidity: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: f64,
    pub visibility_m: Option<f64>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub coord: Option<Coordinate>,
}

/// Day/max/min temperatures of one forecast day, in Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayTemperatures {
    pub day: f64,
    pub max: f64,
    pub min: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub timestamp: DateTime<Utc>,
    pub condition: Condition,
    pub temperature: DayTemperatures,
    pub humidity: u8,
    pub wind_speed_mps: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub city: String,
    pub timestamp: DateTime<Utc>,
}

/// Where the currently held history list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistorySource {
    /// Nothing fetched yet.
    #[default]
    Unloaded,
    Backend,
    /// Demo entries installed after a failed fetch.
    Placeholder,
}

/// Which result panel is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Snapshot,
    Forecast,
}
