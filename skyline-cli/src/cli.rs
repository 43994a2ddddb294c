use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Text};
use skyline_core::{Config, PageController, Panel, backend_from_config};

use crate::{dashboard, output};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyline", version, about = "Skyline weather dashboard")]
pub struct Cli {
    /// Backend base URL; overrides the config file and SKYLINE_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive dashboard (the default).
    Dashboard,

    /// Search a city and show its current weather.
    Show {
        /// City name, e.g. "Colombo".
        city: String,
    },

    /// Search a city and show its multi-day forecast.
    Forecast {
        city: String,
    },

    /// List recent searches.
    History {
        /// Delete all history on the backend.
        #[arg(long)]
        clear: bool,
    },

    /// Set the backend URL interactively.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let api_url = self.api_url;

        match self.command.unwrap_or(Command::Dashboard) {
            Command::Dashboard => dashboard::run(load_page(api_url)?).await,
            Command::Show { city } => show(load_page(api_url)?, city, false).await,
            Command::Forecast { city } => show(load_page(api_url)?, city, true).await,
            Command::History { clear } => history(load_page(api_url)?, clear).await,
            Command::Configure => configure(),
        }
    }
}

/// Resolve config (file, env, then `--api-url`) and build the page around it.
fn load_page(api_url: Option<String>) -> anyhow::Result<PageController> {
    let mut config = Config::load()?;
    if let Some(url) = api_url {
        config.api.base_url = url;
        config.validate()?;
    }
    Ok(PageController::new(backend_from_config(&config)?, &config))
}

async fn show(mut page: PageController, city: String, forecast: bool) -> anyhow::Result<()> {
    page.search_mut().set_input(city);
    let Ok(pending) = page.submit_search().await else {
        let message = page.search().error().unwrap_or("Search failed").to_string();
        return Err(anyhow!(message));
    };

    let shown = render_result(&mut page, forecast).await;
    page.record_search(pending).await;
    shown
}

async fn render_result(page: &mut PageController, forecast: bool) -> anyhow::Result<()> {
    if forecast {
        page.request_forecast().await.map_err(|e| {
            let message = page.take_notice().map(|n| n.message).unwrap_or_default();
            anyhow!("{message} ({e})")
        })?;
    }

    match page.active_panel() {
        Panel::None => Err(anyhow!("Nothing to show")),
        panel => {
            output::print_panel(&panel);
            Ok(())
        }
    }
}

async fn history(mut page: PageController, clear: bool) -> anyhow::Result<()> {
    if clear {
        let res = page.on_clear_history_requested().await;
        if let Some(notice) = page.take_notice() {
            output::print_notice(&notice);
        }
        return res.map_err(Into::into);
    }

    page.initialize().await;
    if let Some(notice) = page.take_notice() {
        output::print_notice(&notice);
    }
    if page.state().history().is_empty() {
        println!("No recent searches.");
    } else {
        output::print_history(page.state());
    }
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;

    let url = Text::new("Backend base URL:")
        .with_default(&config.api.base_url)
        .prompt()
        .context("Failed to read backend URL")?;
    config.api.base_url = url.trim().to_string();

    config.history.placeholder_on_error =
        Confirm::new("Show demo history when the backend is unreachable?")
            .with_default(config.history.placeholder_on_error)
            .prompt()
            .context("Failed to read history preference")?;

    config.validate()?;
    config.save_to(&path)?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
