use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::{
    Config,
    api::WeatherBackend,
    error::{DashboardError, Result},
    model::{Coordinate, ForecastDay, HistorySource, ViewMode, WeatherSnapshot},
    search::{PendingHistoryAppend, SearchForm},
    share::{self, ShareOutcome, ShareTarget},
    state::{Notice, PageState, placeholder_history},
    view::{Panel, SharePayload},
};

pub const HISTORY_CLEARED_MESSAGE: &str = "Search history cleared!";
pub const HISTORY_CLEAR_FAILED_MESSAGE: &str = "Failed to clear history.";
pub const HISTORY_FETCH_FAILED_MESSAGE: &str = "Could not load search history.";
pub const FORECAST_FAILED_MESSAGE: &str = "Failed to fetch 7-day forecast.";

/// Identifies one history-item lookup. Only the most recently issued ticket
/// may change the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LookupTicket(u64);

/// Owns the page state and the search box, and runs every backend call the
/// page makes.
#[derive(Debug)]
pub struct PageController {
    backend: Arc<dyn WeatherBackend>,
    search: SearchForm,
    state: PageState,
    placeholder_on_error: bool,
    last_ticket: u64,
}

impl PageController {
    pub fn new(backend: Arc<dyn WeatherBackend>, config: &Config) -> Self {
        Self {
            backend,
            search: SearchForm::new(&config.search),
            state: PageState::default(),
            placeholder_on_error: config.history.placeholder_on_error,
            last_ticket: 0,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn search(&self) -> &SearchForm {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchForm {
        &mut self.search
    }

    pub fn backend(&self) -> Arc<dyn WeatherBackend> {
        Arc::clone(&self.backend)
    }

    pub fn active_panel(&self) -> Panel {
        self.state.active_panel()
    }

    /// Remove and return the pending notice.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.state.notice.take()
    }

    /// First display: load the history list.
    pub async fn initialize(&mut self) {
        self.reload_history().await;
    }

    pub async fn reload_history(&mut self) {
        self.state.is_loading = true;

        match self.backend.fetch_history().await {
            Ok(entries) => {
                debug!(count = entries.len(), "history loaded");
                self.state.history = entries;
                self.state.history_source = HistorySource::Backend;
            }
            Err(e) if self.placeholder_on_error => {
                warn!(error = %e, "error fetching history, showing placeholder entries");
                self.state.history = placeholder_history(Utc::now());
                self.state.history_source = HistorySource::Placeholder;
            }
            Err(e) => {
                error!(error = %e, "error fetching history");
                self.state.history.clear();
                self.state.history_source = HistorySource::Unloaded;
                self.state.notice = Some(Notice::error(HISTORY_FETCH_FAILED_MESSAGE));
            }
        }

        self.state.is_loading = false;
    }

    pub fn on_search_result(&mut self, snapshot: WeatherSnapshot) {
        self.state.show_snapshot(snapshot);
    }

    /// Submit the search box; a found city becomes the current weather.
    ///
    /// Returns as soon as the lookup resolves. Render the page, then pass the
    /// returned value to [`PageController::record_search`].
    pub async fn submit_search(&mut self) -> Result<PendingHistoryAppend> {
        let backend = Arc::clone(&self.backend);
        let state = &mut self.state;
        self.search
            .submit(backend.as_ref(), |snapshot| state.show_snapshot(snapshot))
            .await
    }

    /// Save a finished search to the backend history. Never fails the page.
    pub async fn record_search(&self, pending: PendingHistoryAppend) {
        pending.record(self.backend.as_ref()).await;
    }

    /// Mark a history lookup as started.
    pub fn begin_history_lookup(&mut self) -> LookupTicket {
        self.last_ticket += 1;
        self.state.is_loading = true;
        LookupTicket(self.last_ticket)
    }

    /// Apply the outcome of a history lookup. Returns `false` when a newer
    /// lookup was started in the meantime and this response was dropped.
    pub fn complete_history_lookup(
        &mut self,
        ticket: LookupTicket,
        result: Result<WeatherSnapshot>,
    ) -> bool {
        if ticket.0 != self.last_ticket {
            debug!(?ticket, latest = self.last_ticket, "discarding stale history lookup");
            return false;
        }

        self.state.is_loading = false;
        match result {
            Ok(snapshot) => self.state.show_snapshot(snapshot),
            Err(e) => error!(error = %e, "error fetching weather for history item"),
        }
        true
    }

    /// A history entry was clicked. Failures leave the page as it was.
    pub async fn on_history_item_activated(&mut self, city: &str) {
        let ticket = self.begin_history_lookup();
        let result = self.backend.lookup_weather(city).await;
        self.complete_history_lookup(ticket, result);
    }

    pub async fn on_clear_history_requested(&mut self) -> Result<()> {
        match self.backend.clear_history().await {
            Ok(()) => {
                info!("search history cleared");
                self.state.history.clear();
                self.state.history_source = HistorySource::Backend;
                self.state.notice = Some(Notice::info(HISTORY_CLEARED_MESSAGE));
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "error clearing history");
                self.state.notice = Some(Notice::error(HISTORY_CLEAR_FAILED_MESSAGE));
                Err(e)
            }
        }
    }

    /// Fetch the forecast for `coord` and switch to the forecast panel.
    pub async fn on_forecast_requested(&mut self, coord: Coordinate) -> Result<()> {
        let result = self.backend.lookup_forecast(coord).await;
        self.apply_forecast(result)
    }

    /// The weather card's forecast control was pressed.
    pub async fn request_forecast(&mut self) -> Result<()> {
        let coord = self.begin_forecast_request()?;
        let result = self.backend.lookup_forecast(coord).await;
        self.complete_forecast_request(result)
    }

    /// Put the forecast control into its busy state. Fails without touching
    /// the page when there is no coordinate or a request is already running.
    pub fn begin_forecast_request(&mut self) -> Result<Coordinate> {
        if self.state.forecast_pending {
            return Err(DashboardError::Validation("A forecast request is already running".into()));
        }
        let coord = self
            .state
            .current_weather
            .as_ref()
            .and_then(|w| w.coord)
            .ok_or_else(|| {
                DashboardError::Validation("No coordinates available for a forecast".into())
            })?;

        self.state.forecast_pending = true;
        Ok(coord)
    }

    pub fn complete_forecast_request(&mut self, result: Result<Vec<ForecastDay>>) -> Result<()> {
        self.state.forecast_pending = false;
        self.apply_forecast(result)
    }

    fn apply_forecast(&mut self, result: Result<Vec<ForecastDay>>) -> Result<()> {
        match result {
            Ok(days) => {
                self.state.current_forecast = Some(days);
                self.state.view_mode = ViewMode::Forecast;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "error fetching forecast");
                self.state.notice = Some(Notice::error(FORECAST_FAILED_MESSAGE));
                Err(e)
            }
        }
    }

    /// Back to the snapshot panel. The fetched forecast is kept.
    pub fn on_back_to_weather_requested(&mut self) {
        self.state.view_mode = ViewMode::Snapshot;
    }

    /// Share the current snapshot. `None` when there is nothing to share.
    pub async fn share_current(
        &self,
        target: &dyn ShareTarget,
        url: Option<&str>,
    ) -> Option<ShareOutcome> {
        let snapshot = self.state.current_weather.as_ref()?;
        let mut payload = SharePayload::for_snapshot(snapshot);
        if let Some(url) = url {
            payload = payload.with_url(url);
        }
        Some(share::share(target, &payload).await)
    }
}
