//! External collaborators
//!
//! Everything the playground does not implement itself sits behind one of
//! these traits: the dashboard app, query execution, notifications, the
//! platform clipboard, navigation and action analytics.

use serde::{Deserialize, Serialize};

use crate::events::PlaygroundEvent;
use crate::types::{CodeArtifact, QueryDefinition};

/// Dashboard app that charts can be added to
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DashboardClient: Send + Sync {
    /// Whether the dashboard accepts new charts.
    ///
    /// `Err` carries the collaborator's error detail.
    async fn can_add_chart(&self) -> Result<bool, String>;

    /// Add the chart described by `code` to the dashboard
    async fn add_chart(&self, code: &CodeArtifact) -> Result<(), String>;
}

/// Load flags for [`QueryRenderer::load`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Also return the generated SQL
    pub load_sql: bool,
    /// Only generate SQL, do not execute
    pub sql_only: bool,
    /// Bypass the cache and renew the query
    pub renew_query: bool,
}

impl LoadOptions {
    /// Regular execution
    #[inline]
    #[must_use]
    pub fn execute() -> Self {
        Self::default()
    }

    /// SQL generation only
    #[inline]
    #[must_use]
    pub fn sql_only() -> Self {
        Self {
            load_sql: true,
            sql_only: true,
            renew_query: false,
        }
    }

    /// Execute and return the generated SQL alongside the result set
    #[inline]
    #[must_use]
    pub fn with_sql(mut self) -> Self {
        self.load_sql = true;
        self
    }

    /// With a forced cache refresh
    #[inline]
    #[must_use]
    pub fn with_renew_query(mut self) -> Self {
        self.renew_query = true;
        self
    }
}

/// Generated SQL with the cache metadata the cache panel inspects
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSql {
    /// SQL text
    pub sql: String,
    /// Bound parameters
    #[serde(default)]
    pub params: Vec<serde_json::Value>,
    /// Pre-aggregations the query would hit
    #[serde(default)]
    pub pre_aggregations: Vec<serde_json::Value>,
    /// Refresh key queries guarding the cache
    #[serde(default)]
    pub refresh_keys: Vec<serde_json::Value>,
}

/// What the query renderer hands back, all parts opaque to the playground
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOutcome {
    /// Result set, if the query ran
    pub result_set: Option<serde_json::Value>,
    /// Error message, if the query failed
    pub error: Option<String>,
    /// Generated SQL, if requested
    pub sql: Option<GeneratedSql>,
}

/// Executes analytical queries
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait QueryRenderer: Send + Sync {
    /// Load `query` with the given options
    async fn load(&self, query: &QueryDefinition, options: LoadOptions) -> QueryOutcome;
}

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Positive confirmation
    Success,
    /// Something went wrong
    Error,
}

/// User-facing notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity
    pub kind: NotificationKind,
    /// Headline
    pub message: String,
    /// Optional detail line
    pub description: Option<String>,
}

impl Notification {
    /// Success notification
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            description: None,
        }
    }

    /// Error notification
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            description: None,
        }
    }

    /// Attach a detail line
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Delivers notifications to the user
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Show a notification
    fn notify(&self, notification: Notification);
}

/// Platform clipboard
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`
    async fn write_text(&self, text: &str) -> Result<(), String>;
}

/// Route navigation
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Push a named route
    fn push(&self, route: &str);
}

/// Action analytics
#[cfg_attr(test, mockall::automock)]
pub trait EventSink: Send + Sync {
    /// Record a playground action
    fn track(&self, event: PlaygroundEvent);
}

/// Event sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn track(&self, event: PlaygroundEvent) {
        tracing::trace!(event = event.name(), "dropping playground event");
    }
}
