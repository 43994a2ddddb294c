//! Core library for the Skyline weather dashboard.
//!
//! This crate defines:
//! - Typed weather, forecast and history models
//! - The backend abstraction and its HTTP client
//! - The page controller, search box and result views
//! - Configuration loading
//!
//! It is used by `skyline-cli`, but any other front end can drive the same
//! controller.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod search;
pub mod share;
pub mod state;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{HttpBackend, WeatherBackend, backend_from_config};
pub use config::Config;
pub use controller::{LookupTicket, PageController};
pub use error::DashboardError;
pub use model::{
    Condition, ConditionKind, Coordinate, ForecastDay, HistoryEntry, HistorySource, ViewMode,
    WeatherSnapshot,
};
pub use search::{PendingHistoryAppend, SearchForm};
pub use share::{ShareOutcome, ShareTarget};
pub use state::{Notice, NoticeLevel, PageState};
pub use view::Panel;
