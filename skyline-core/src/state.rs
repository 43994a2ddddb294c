//! Cross-component page state, read by the views.

use chrono::{DateTime, Duration, Utc};

use crate::{
    model::{ForecastDay, HistoryEntry, HistorySource, ViewMode, WeatherSnapshot},
    view::{CurrentWeatherView, ForecastView, Panel},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A confirmation or error surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Everything the page controller owns. Views get it by shared reference.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub(crate) current_weather: Option<WeatherSnapshot>,
    pub(crate) current_forecast: Option<Vec<ForecastDay>>,
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) history_source: HistorySource,
    pub(crate) is_loading: bool,
    pub(crate) view_mode: ViewMode,
    pub(crate) forecast_pending: bool,
    pub(crate) notice: Option<Notice>,
}

impl PageState {
    pub fn current_weather(&self) -> Option<&WeatherSnapshot> {
        self.current_weather.as_ref()
    }

    pub fn current_forecast(&self) -> Option<&[ForecastDay]> {
        self.current_forecast.as_deref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn history_source(&self) -> HistorySource {
        self.history_source
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// The weather card's forecast control is busy.
    pub fn forecast_pending(&self) -> bool {
        self.forecast_pending
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// A new city's weather replaces the old one wholesale; its forecast is
    /// dropped and the snapshot panel comes back.
    pub(crate) fn show_snapshot(&mut self, snapshot: WeatherSnapshot) {
        self.current_weather = Some(snapshot);
        self.current_forecast = None;
        self.view_mode = ViewMode::Snapshot;
    }

    /// Rendering rule: nothing without weather, otherwise the panel matching
    /// the view mode.
    pub fn active_panel(&self) -> Panel {
        let Some(weather) = &self.current_weather else {
            return Panel::None;
        };

        match self.view_mode {
            ViewMode::Snapshot => {
                Panel::Weather(CurrentWeatherView::new(weather, self.forecast_pending))
            }
            ViewMode::Forecast => {
                ForecastView::new(self.current_forecast()).map_or(Panel::None, Panel::Forecast)
            }
        }
    }
}

/// Demo history shown when the real list cannot be fetched.
pub fn placeholder_history(now: DateTime<Utc>) -> Vec<HistoryEntry> {
    ["Colombo", "Galle", "Matara", "Kandy", "Jaffna"]
        .into_iter()
        .zip(1..)
        .map(|(city, i)| HistoryEntry {
            city: city.to_string(),
            timestamp: now - Duration::seconds(1000 * i),
        })
        .collect()
}
