use std::fmt;

use chrono::{Local, TimeZone};

use crate::model::ForecastDay;

use super::format;

/// One compact day card.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCardView {
    /// "Today" for the first entry, short weekday otherwise.
    pub label: String,
    pub icon: &'static str,
    pub description: String,
    pub day: String,
    pub max: String,
    pub min: String,
    pub humidity: String,
    pub wind: String,
}

/// Render model of the multi-day forecast panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub cards: Vec<ForecastCardView>,
}

impl ForecastView {
    /// `None` when there is nothing to show.
    pub fn new(days: Option<&[ForecastDay]>) -> Option<Self> {
        Self::new_in(days, &Local)
    }

    pub fn new_in<Tz: TimeZone>(days: Option<&[ForecastDay]>, tz: &Tz) -> Option<Self>
    where
        Tz::Offset: fmt::Display,
    {
        let days = days.filter(|d| !d.is_empty())?;
        let cards = days
            .iter()
            .enumerate()
            .map(|(i, day)| ForecastCardView {
                label: if i == 0 {
                    "Today".to_string()
                } else {
                    format::weekday(day.timestamp, tz)
                },
                icon: day.condition.kind.icon_name(),
                description: day.condition.description.clone(),
                day: format::temperature_c(day.temperature.day),
                max: format::temperature(day.temperature.max),
                min: format::temperature(day.temperature.min),
                humidity: format::humidity(day.humidity),
                wind: format::wind(day.wind_speed_mps),
            })
            .collect();
        Some(Self { cards })
    }
}

impl fmt::Display for ForecastView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-Day Forecast", self.cards.len())?;
        for card in &self.cards {
            write!(
                f,
                "\n  {:<5} [{}] {} ({} / {})  {}  {}  {}",
                card.label,
                card.icon,
                card.day,
                card.max,
                card.min,
                card.description,
                card.humidity,
                card.wind
            )?;
        }
        Ok(())
    }
}
