use std::io::{IsTerminal, Write};

use async_trait::async_trait;
use base64::Engine;
use chrono::Local;
use owo_colors::OwoColorize;
use skyline_core::{
    DashboardError, HistoryEntry, HistorySource, Notice, NoticeLevel, PageState, Panel,
    ShareOutcome, ShareTarget, view::SharePayload,
};

pub fn print_panel(panel: &Panel) {
    match panel {
        Panel::None => println!("{}", "Search for a city to see its weather.".dimmed()),
        Panel::Weather(card) => {
            println!();
            println!("{}", card.bold());
        }
        Panel::Forecast(forecast) => {
            println!();
            println!("{forecast}");
        }
    }
}

/// The dashboard's main area. Unlike [`print_panel`] it can tell an empty
/// forecast apart from a page with no weather yet.
pub fn print_page(state: &PageState) {
    match state.active_panel() {
        Panel::None if state.current_weather().is_some() => {
            println!("{}", "No forecast days available for this city.".dimmed())
        }
        panel => print_panel(&panel),
    }
}

pub fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Info => println!("{}", notice.message.green()),
        NoticeLevel::Error => println!("{}", notice.message.red()),
    }
}

pub fn print_search_error(message: &str) {
    println!("{} {}", "Error:".red().bold(), message);
}

pub fn history_label(entry: &HistoryEntry) -> String {
    let local = entry.timestamp.with_timezone(&Local);
    format!("{}  ({})", entry.city, local.format("%Y-%m-%d %H:%M"))
}

pub fn print_history(state: &PageState) {
    if state.is_loading() {
        println!("{}", "Loading history...".dimmed());
        return;
    }
    if state.history().is_empty() {
        return;
    }

    println!();
    match state.history_source() {
        HistorySource::Placeholder => {
            println!("{} {}", "Recent Searches".bold(), "(demo data, backend unavailable)".yellow())
        }
        _ => println!("{}", "Recent Searches".bold()),
    }
    for entry in state.history() {
        println!("  {}", history_label(entry));
    }
}

pub fn print_share_outcome(outcome: Option<ShareOutcome>) {
    match outcome {
        Some(ShareOutcome::Shared) => println!("{}", "Shared.".green()),
        Some(ShareOutcome::Copied) => {
            println!("{}", "Weather summary copied to clipboard.".green())
        }
        // Share failures are logged only.
        Some(ShareOutcome::Failed) => {}
        None => println!("{}", "Nothing to share yet.".dimmed()),
    }
}

/// Terminals have no share sheet; the clipboard is reached through the OSC 52
/// escape sequence.
#[derive(Debug, Default)]
pub struct TerminalShare;

#[async_trait]
impl ShareTarget for TerminalShare {
    fn supports_native_share(&self) -> bool {
        false
    }

    async fn native_share(&self, _payload: &SharePayload) -> skyline_core::error::Result<()> {
        Err(DashboardError::ShareFailed("no native share in a terminal".into()))
    }

    async fn copy_to_clipboard(&self, text: &str) -> skyline_core::error::Result<()> {
        let stdout = std::io::stdout();
        if !stdout.is_terminal() {
            return Err(DashboardError::ShareFailed("stdout is not a terminal".into()));
        }

        let encoded = base64::engine::general_purpose::STANDARD.encode(text);
        let mut out = stdout.lock();
        write!(out, "\x1b]52;c;{encoded}\x07")
            .and_then(|()| out.flush())
            .map_err(|e| DashboardError::ShareFailed(e.to_string()))
    }
}
