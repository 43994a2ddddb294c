/// Failures the dashboard can run into. None of them is fatal to the page.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Rejected locally before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The backend answered 404 for a weather or forecast lookup.
    #[error("{}", .message.as_deref().unwrap_or("Not found"))]
    LookupNotFound { message: Option<String> },

    #[error("Lookup failed with status {status}: {}", .message.as_deref().unwrap_or("no details"))]
    LookupFailed {
        status: u16,
        message: Option<String>,
    },

    #[error("Failed to fetch search history: {0}")]
    HistoryFetchFailed(String),

    #[error("Failed to update search history: {0}")]
    HistoryWriteFailed(String),

    #[error("Failed to share weather: {0}")]
    ShareFailed(String),

    #[error("Request to weather backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode backend response: {0}")]
    Decode(String),
}

impl DashboardError {
    /// Message supplied by the backend in a `{ "message": ... }` error body.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::LookupNotFound { message } | Self::LookupFailed { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
