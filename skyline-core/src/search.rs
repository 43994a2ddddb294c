//! The city search box: input validation, submission, and autocomplete.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::{
    api::WeatherBackend,
    config::SearchConfig,
    error::{DashboardError, Result},
    model::WeatherSnapshot,
};

pub const EMPTY_INPUT_MESSAGE: &str = "Enter a city name";
pub const NOT_FOUND_MESSAGE: &str = "City not found. Check the spelling or try a different city.";

/// Shortcut cities shown under the search box.
pub const QUICK_TIPS: [&str; 3] = ["New York", "London", "Tokyo"];

/// Local state of the search box.
#[derive(Debug, Clone)]
pub struct SearchForm {
    input: String,
    error: Option<String>,
    submitting: bool,
    focused: bool,
    suggestions_visible: bool,
    dismiss_at: Option<Instant>,
    candidates: Vec<String>,
    max_suggestions: usize,
    blur_grace: Duration,
}

impl SearchForm {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            input: String::new(),
            error: None,
            submitting: false,
            focused: false,
            suggestions_visible: false,
            dismiss_at: None,
            candidates: config.cities.clone(),
            max_suggestions: config.max_suggestions,
            blur_grace: config.blur_grace(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn suggestions_visible(&self) -> bool {
        self.suggestions_visible
    }

    /// The user typed: clears any error and opens suggestions for non-empty text.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.error = None;
        self.suggestions_visible = !self.input.is_empty();
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.dismiss_at = None;
        self.suggestions_visible = !self.input.is_empty();
    }

    /// Suggestions stay open for the grace delay so a pointer selection can land.
    pub fn blur(&mut self, now: Instant) {
        self.focused = false;
        self.dismiss_at = Some(now + self.blur_grace);
    }

    /// Apply a pending blur dismissal once its deadline has passed.
    pub fn poll(&mut self, now: Instant) {
        if self.dismiss_at.is_some_and(|at| now >= at) {
            self.hide_suggestions();
        }
    }

    pub fn escape(&mut self) {
        self.focused = false;
        self.hide_suggestions();
    }

    /// Fill the field with a suggestion (or quick tip). Does not submit.
    pub fn select_suggestion(&mut self, city: &str) {
        self.input = city.to_string();
        self.error = None;
        self.focused = true;
        self.hide_suggestions();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.error = None;
        self.focused = true;
    }

    fn hide_suggestions(&mut self) {
        self.suggestions_visible = false;
        self.dismiss_at = None;
    }

    /// Candidates containing the input (ignoring case), minus an exact match,
    /// capped at the configured maximum.
    pub fn suggestions(&self) -> Vec<&str> {
        let needle = self.input.to_lowercase();
        self.candidates
            .iter()
            .filter(|c| {
                let c = c.to_lowercase();
                c.contains(&needle) && c != needle
            })
            .take(self.max_suggestions)
            .map(String::as_str)
            .collect()
    }

    /// What the dropdown shows right now.
    pub fn visible_suggestions(&self) -> Vec<&str> {
        if self.suggestions_visible { self.suggestions() } else { Vec::new() }
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.input.trim().is_empty()
    }

    /// Reject empty or whitespace-only input.
    pub fn validate(&mut self) -> Result<()> {
        if self.input.trim().is_empty() {
            self.error = Some(EMPTY_INPUT_MESSAGE.to_string());
            return Err(DashboardError::Validation(EMPTY_INPUT_MESSAGE.to_string()));
        }
        Ok(())
    }

    /// Look up the typed city and hand the snapshot to `on_result`.
    ///
    /// On success the input is cleared and the search is returned as a
    /// [`PendingHistoryAppend`] for the caller to record once the result is on
    /// screen. On failure the typed text is kept and the error message is set.
    pub async fn submit<F>(
        &mut self,
        backend: &dyn WeatherBackend,
        on_result: F,
    ) -> Result<PendingHistoryAppend>
    where
        F: FnOnce(WeatherSnapshot),
    {
        self.validate()?;

        self.submitting = true;
        self.error = None;
        let city = self.input.clone();

        let result = backend.lookup_weather(&city).await;
        let outcome = match result {
            Ok(snapshot) => {
                info!(%city, "search succeeded");
                self.input.clear();
                self.hide_suggestions();
                on_result(snapshot);
                Ok(PendingHistoryAppend { city })
            }
            Err(e) => {
                warn!(%city, error = %e, "search failed");
                self.error = Some(e.backend_message().unwrap_or(NOT_FOUND_MESSAGE).to_string());
                Err(e)
            }
        };

        self.submitting = false;
        outcome
    }
}

/// A successful search that has not been written to the backend history yet.
#[must_use = "the search is only saved to history once `record` is awaited"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingHistoryAppend {
    city: String,
}

impl PendingHistoryAppend {
    /// The city text exactly as it was submitted.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// `POST /api/history`. A failure is logged and otherwise ignored.
    pub async fn record(self, backend: &dyn WeatherBackend) {
        if let Err(e) = backend.append_history(&self.city).await {
            warn!(city = %self.city, error = %e, "error saving search to history");
        }
    }
}
