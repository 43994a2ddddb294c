//! Sharing the current snapshot: native share sheet first, clipboard otherwise.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::{error::Result, view::SharePayload};

/// Platform sharing capabilities available to the front end.
#[async_trait]
pub trait ShareTarget: Send + Sync {
    fn supports_native_share(&self) -> bool;

    async fn native_share(&self, payload: &SharePayload) -> Result<()>;

    async fn copy_to_clipboard(&self, text: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
    /// Already logged; nothing is shown to the user.
    Failed,
}

pub async fn share(target: &dyn ShareTarget, payload: &SharePayload) -> ShareOutcome {
    if target.supports_native_share() {
        match target.native_share(payload).await {
            Ok(()) => {
                info!(title = %payload.title, "shared weather");
                ShareOutcome::Shared
            }
            Err(e) => {
                warn!(error = %e, "error sharing weather");
                ShareOutcome::Failed
            }
        }
    } else {
        match target.copy_to_clipboard(&payload.text).await {
            Ok(()) => ShareOutcome::Copied,
            Err(e) => {
                warn!(error = %e, "error copying weather to clipboard");
                ShareOutcome::Failed
            }
        }
    }
}
