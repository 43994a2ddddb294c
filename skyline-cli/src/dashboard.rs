//! Interactive dashboard: the terminal rendition of the weather page.

use std::fmt;

use anyhow::Result;
use inquire::{
    CustomUserError, InquireError, Select, Text,
    autocompletion::{Autocomplete, Replacement},
};
use skyline_core::{
    PageController, Panel, PendingHistoryAppend, SearchForm, ViewMode, search::QUICK_TIPS,
    view::ForecastControl,
};
use tracing::debug;

use crate::output::{self, TerminalShare};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    OpenHistory,
    Forecast,
    BackToWeather,
    Share,
    ClearHistory,
    ReloadHistory,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Search => "Search a city",
            Action::OpenHistory => "Open a recent search",
            Action::Forecast => "7-day forecast",
            Action::BackToWeather => "Back to current weather",
            Action::Share => "Share",
            Action::ClearHistory => "Clear all history",
            Action::ReloadHistory => "Reload history",
            Action::Quit => "Quit",
        })
    }
}

/// Menu entries that make sense for what is on screen.
fn available_actions(page: &PageController) -> Vec<Action> {
    let mut actions = vec![Action::Search];
    match page.active_panel() {
        Panel::Weather(card) => {
            if card.forecast_control == ForecastControl::Enabled {
                actions.push(Action::Forecast);
            }
            actions.push(Action::Share);
        }
        Panel::Forecast(_) | Panel::None => {}
    }
    if page.state().view_mode() == ViewMode::Forecast {
        actions.push(Action::BackToWeather);
    }
    if !page.state().history().is_empty() {
        actions.push(Action::OpenHistory);
        actions.push(Action::ClearHistory);
    }
    actions.push(Action::ReloadHistory);
    actions.push(Action::Quit);
    actions
}

/// Feeds inquire's autocomplete from the search box's suggestion filter.
#[derive(Debug, Clone)]
struct CityCompleter {
    form: SearchForm,
}

impl Autocomplete for CityCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        if input.is_empty() {
            return Ok(QUICK_TIPS.iter().map(|s| s.to_string()).collect());
        }
        self.form.set_input(input);
        Ok(self.form.visible_suggestions().into_iter().map(String::from).collect())
    }

    fn get_completion(
        &mut self,
        input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        if highlighted_suggestion.is_some() {
            return Ok(highlighted_suggestion);
        }
        self.form.set_input(input);
        Ok(self.form.suggestions().first().map(|s| s.to_string()))
    }
}

/// `None` when the user cancelled the prompt.
fn prompt<T>(result: Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub async fn run(mut page: PageController) -> Result<()> {
    page.initialize().await;
    let mut pending: Option<PendingHistoryAppend> = None;

    loop {
        output::print_page(page.state());
        output::print_history(page.state());
        if let Some(notice) = page.take_notice() {
            output::print_notice(&notice);
        }
        println!();

        // Only after the result is on screen.
        if let Some(search) = pending.take() {
            page.record_search(search).await;
        }

        let Some(action) = prompt(Select::new("What next?", available_actions(&page)).prompt())?
        else {
            break;
        };
        debug!(?action, "dashboard action");

        match action {
            Action::Search => pending = search(&mut page).await?,
            Action::OpenHistory => {
                let labels: Vec<String> = page
                    .state()
                    .history()
                    .iter()
                    .map(output::history_label)
                    .collect();
                let Some(choice) = prompt(Select::new("Recent searches", labels).raw_prompt())?
                else {
                    continue;
                };
                if let Some(entry) = page.state().history().get(choice.index).cloned() {
                    page.on_history_item_activated(&entry.city).await;
                }
            }
            Action::Forecast => {
                // Failures arrive as a notice on the next render.
                let _ = page.request_forecast().await;
            }
            Action::BackToWeather => page.on_back_to_weather_requested(),
            Action::Share => {
                let outcome = page.share_current(&TerminalShare, None).await;
                output::print_share_outcome(outcome);
            }
            Action::ClearHistory => {
                let _ = page.on_clear_history_requested().await;
            }
            Action::ReloadHistory => page.reload_history().await,
            Action::Quit => break,
        }
    }

    Ok(())
}

/// Prompt for a city and submit it. A found city comes back as the history
/// write still owed to the backend.
async fn search(page: &mut PageController) -> Result<Option<PendingHistoryAppend>> {
    let completer = CityCompleter {
        form: page.search().clone(),
    };
    let help = format!("Quick tips: {}", QUICK_TIPS.join(", "));
    let prompt_result = Text::new("City:")
        .with_initial_value(page.search().input())
        .with_placeholder("e.g. Colombo, London, Tokyo")
        .with_help_message(&help)
        .with_autocomplete(completer)
        .prompt();

    let Some(city) = prompt(prompt_result)? else {
        page.search_mut().escape();
        return Ok(None);
    };

    page.search_mut().set_input(city);
    match page.submit_search().await {
        Ok(pending) => Ok(Some(pending)),
        Err(_) => {
            if let Some(message) = page.search().error() {
                output::print_search_error(message);
            }
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use skyline_core::{
        Condition, ConditionKind, Config, Coordinate, ForecastDay, HistoryEntry, WeatherBackend,
        WeatherSnapshot, error::Result as CoreResult, model::Temperatures,
    };
    use std::sync::Arc;

    /// Finds every city and answers forecasts with no days.
    #[derive(Debug)]
    struct EmptyForecastBackend;

    #[async_trait]
    impl WeatherBackend for EmptyForecastBackend {
        async fn lookup_weather(&self, city: &str) -> CoreResult<WeatherSnapshot> {
            Ok(WeatherSnapshot {
                city: city.to_string(),
                country: None,
                condition: Condition {
                    kind: ConditionKind::Clear,
                    description: "clear sky".into(),
                },
                extra_conditions: vec![],
                temperature: Temperatures {
                    current: 30.0,
                    max: 32.0,
                    min: 26.0,
                    feels_like: 33.0,
                },
                humidity: 70,
                wind_speed_mps: 3.0,
                pressure_hpa: 1010.0,
                visibility_m: None,
                sunrise: None,
                sunset: None,
                coord: Some(Coordinate {
                    lat: 7.29,
                    lon: 80.63,
                }),
            })
        }

        async fn lookup_forecast(&self, _coord: Coordinate) -> CoreResult<Vec<ForecastDay>> {
            Ok(vec![])
        }

        async fn fetch_history(&self) -> CoreResult<Vec<HistoryEntry>> {
            Ok(vec![HistoryEntry {
                city: "Kandy".into(),
                timestamp: Utc::now(),
            }])
        }

        async fn append_history(&self, _city: &str) -> CoreResult<()> {
            Ok(())
        }

        async fn clear_history(&self) -> CoreResult<()> {
            Ok(())
        }
    }

    fn page() -> PageController {
        PageController::new(Arc::new(EmptyForecastBackend), &Config::default())
    }

    #[tokio::test]
    async fn weather_card_offers_forecast_and_share() {
        let mut page = page();
        page.search_mut().set_input("Kandy");
        let _ = page.submit_search().await.unwrap();

        let actions = available_actions(&page);
        assert!(actions.contains(&Action::Forecast));
        assert!(actions.contains(&Action::Share));
        assert!(!actions.contains(&Action::BackToWeather));
    }

    #[tokio::test]
    async fn empty_forecast_still_offers_way_back() {
        let mut page = page();
        page.search_mut().set_input("Kandy");
        let _ = page.submit_search().await.unwrap();
        page.request_forecast().await.unwrap();

        assert_eq!(page.state().view_mode(), ViewMode::Forecast);
        assert_eq!(page.active_panel(), Panel::None);
        assert!(available_actions(&page).contains(&Action::BackToWeather));

        page.on_back_to_weather_requested();
        assert!(matches!(page.active_panel(), Panel::Weather(_)));
    }

    #[tokio::test]
    async fn history_actions_follow_the_list() {
        let mut page = page();
        assert!(!available_actions(&page).contains(&Action::OpenHistory));

        page.initialize().await;
        let actions = available_actions(&page);
        assert!(actions.contains(&Action::OpenHistory));
        assert!(actions.contains(&Action::ClearHistory));
    }
}
