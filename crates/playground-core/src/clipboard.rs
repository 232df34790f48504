//! Copy the active artifact to the platform clipboard

use crate::collaborators::{Clipboard, Notification, Notifier};
use crate::error::ClipboardError;
use crate::types::ViewMode;

/// Notification headline after a successful copy
pub const COPY_SUCCESS_MESSAGE: &str = "Copied to clipboard";

/// Notification headline after a failed copy
pub const COPY_FAILURE_MESSAGE: &str = "Can't copy to clipboard";

/// The text "copy" would place on the clipboard in `mode`
#[inline]
#[must_use]
pub fn active_artifact<'a>(mode: ViewMode, query: &'a str, code: &'a str) -> &'a str {
    if mode == ViewMode::Query {
        query
    } else {
        code
    }
}

/// Copy the query text in query mode, the code otherwise.
///
/// The user is notified of both success and failure.
///
/// # Errors
/// - `ClipboardError::ClipboardUnavailable` if there is no clipboard; no write
///   is attempted
/// - `ClipboardError::ClipboardWriteFailed` if the write is refused
pub async fn copy_active_artifact(
    clipboard: Option<&dyn Clipboard>,
    notifier: &dyn Notifier,
    mode: ViewMode,
    query: &str,
    code: &str,
) -> Result<(), ClipboardError> {
    let result = match clipboard {
        None => Err(ClipboardError::ClipboardUnavailable),
        Some(clipboard) => clipboard
            .write_text(active_artifact(mode, query, code))
            .await
            .map_err(ClipboardError::ClipboardWriteFailed),
    };

    match &result {
        Ok(()) => {
            tracing::debug!(%mode, "artifact copied");
            notifier.notify(Notification::success(COPY_SUCCESS_MESSAGE));
        }
        Err(e) => {
            tracing::warn!(%mode, %e, "copy to clipboard failed");
            notifier.notify(Notification::error(COPY_FAILURE_MESSAGE).with_description(e.to_string()));
        }
    }
    result
}
