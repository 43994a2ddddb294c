use std::fmt;

use chrono::{Local, TimeZone};

use crate::model::WeatherSnapshot;

use super::format;

/// State of the "7-Day Forecast" control on the weather card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastControl {
    Enabled,
    /// A forecast request is in flight.
    Busy,
    /// The snapshot carries no coordinate.
    Disabled,
}

/// What gets handed to the native share sheet or the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: Option<String>,
}

impl SharePayload {
    pub fn for_snapshot(snapshot: &WeatherSnapshot) -> Self {
        Self {
            title: format!("Weather in {}", snapshot.city),
            text: format!(
                "Current weather in {}: {}, {}",
                snapshot.city,
                format::temperature_c(snapshot.temperature.current),
                snapshot.condition.description
            ),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Render model of the current-weather card.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeatherView {
    pub city: String,
    pub country: Option<String>,
    pub icon: &'static str,
    pub condition: String,
    pub description: String,
    pub temperature: String,
    pub max: String,
    pub min: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub pressure: String,
    pub visibility: Option<String>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub forecast_control: ForecastControl,
}

impl CurrentWeatherView {
    pub fn new(snapshot: &WeatherSnapshot, forecast_busy: bool) -> Self {
        Self::new_in(snapshot, forecast_busy, &Local)
    }

    /// Like [`Self::new`], formatting sunrise/sunset in `tz`.
    pub fn new_in<Tz: TimeZone>(snapshot: &WeatherSnapshot, forecast_busy: bool, tz: &Tz) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        let forecast_control = match (snapshot.coord, forecast_busy) {
            (None, _) => ForecastControl::Disabled,
            (Some(_), true) => ForecastControl::Busy,
            (Some(_), false) => ForecastControl::Enabled,
        };

        let t = &snapshot.temperature;
        Self {
            city: snapshot.city.clone(),
            country: snapshot.country.clone(),
            icon: snapshot.condition.kind.icon_name(),
            condition: snapshot.condition.kind.to_string(),
            description: snapshot.condition.description.clone(),
            temperature: format::temperature(t.current),
            max: format::temperature(t.max),
            min: format::temperature(t.min),
            feels_like: format::temperature(t.feels_like),
            humidity: format::humidity(snapshot.humidity),
            wind: format::wind(snapshot.wind_speed_mps),
            pressure: format::pressure(snapshot.pressure_hpa),
            visibility: snapshot.visibility_m.map(format::visibility),
            sunrise: snapshot.sunrise.map(|at| format::clock_time(at, tz)),
            sunset: snapshot.sunset.map(|at| format::clock_time(at, tz)),
            forecast_control,
        }
    }

    pub fn can_request_forecast(&self) -> bool {
        self.forecast_control == ForecastControl::Enabled
    }
}

impl fmt::Display for CurrentWeatherView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.country {
            Some(country) => writeln!(f, "{}, {}  [{}]", self.city, country, self.icon)?,
            None => writeln!(f, "{}  [{}]", self.city, self.icon)?,
        }
        writeln!(f, "  {}  {}", self.temperature, self.description)?;
        writeln!(f, "  Max {}  Min {}  Feels like {}", self.max, self.min, self.feels_like)?;
        write!(f, "  Humidity {}  Wind {}  Pressure {}", self.humidity, self.wind, self.pressure)?;
        if let Some(visibility) = &self.visibility {
            write!(f, "  Visibility {visibility}")?;
        }
        if let (Some(rise), Some(set)) = (&self.sunrise, &self.sunset) {
            write!(f, "\n  Sunrise {rise}  Sunset {set}")?;
        }
        match self.forecast_control {
            ForecastControl::Enabled => Ok(()),
            ForecastControl::Busy => write!(f, "\n  Loading forecast..."),
            ForecastControl::Disabled => write!(f, "\n  Forecast unavailable (no coordinates)"),
        }
    }
}
