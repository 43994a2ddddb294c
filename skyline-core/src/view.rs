//! Render models for the two result panels.
//!
//! Views take model types by reference and produce display strings; they
//! never see wire JSON and never write converted values back.

pub mod forecast_card;
pub mod format;
pub mod weather_card;

pub use forecast_card::{ForecastCardView, ForecastView};
pub use weather_card::{CurrentWeatherView, ForecastControl, SharePayload};

/// Which panel the page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    /// No weather loaded yet.
    None,
    Weather(CurrentWeatherView),
    Forecast(ForecastView),
}
