//! Offline collaborators for the `playground` binary
//!
//! Stand-ins that print to stdout or keep things in memory, so sessions can
//! be replayed without a dashboard app or query service.

use std::str::FromStr;

use parking_lot::Mutex;

use crate::collaborators::{
    Clipboard, DashboardClient, EventSink, GeneratedSql, LoadOptions, Navigator, Notification,
    NotificationKind, Notifier, QueryOutcome, QueryRenderer,
};
use crate::events::PlaygroundEvent;
use crate::types::{CodeArtifact, QueryDefinition};

/// How the offline dashboard answers the capability check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardBehavior {
    /// Accepts charts
    #[default]
    Supported,
    /// Static template, refuses charts
    Static,
    /// Errors on the capability check
    Broken,
}

impl FromStr for DashboardBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "supported" => Ok(Self::Supported),
            "static" => Ok(Self::Static),
            "broken" => Ok(Self::Broken),
            other => Err(format!("unknown dashboard behavior: {other}")),
        }
    }
}

/// Dashboard that keeps added charts in memory
#[derive(Debug, Default)]
pub struct OfflineDashboard {
    behavior: DashboardBehavior,
    charts: Mutex<Vec<CodeArtifact>>,
}

impl OfflineDashboard {
    /// Dashboard with the given behavior
    #[must_use]
    pub fn new(behavior: DashboardBehavior) -> Self {
        Self {
            behavior,
            charts: Mutex::new(Vec::new()),
        }
    }

    /// Number of charts added so far
    #[must_use]
    pub fn chart_count(&self) -> usize {
        self.charts.lock().len()
    }
}

#[async_trait::async_trait]
impl DashboardClient for OfflineDashboard {
    async fn can_add_chart(&self) -> Result<bool, String> {
        match self.behavior {
            DashboardBehavior::Supported => Ok(true),
            DashboardBehavior::Static => Ok(false),
            DashboardBehavior::Broken => Err("dashboard app is not running".to_string()),
        }
    }

    async fn add_chart(&self, code: &CodeArtifact) -> Result<(), String> {
        self.charts.lock().push(code.clone());
        Ok(())
    }
}

/// Renderer that generates no real SQL and echoes the query as the result set
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineRenderer;

#[async_trait::async_trait]
impl QueryRenderer for OfflineRenderer {
    async fn load(&self, query: &QueryDefinition, options: LoadOptions) -> QueryOutcome {
        if query.as_json().is_null() {
            return QueryOutcome {
                error: Some("query is empty".to_string()),
                ..QueryOutcome::default()
            };
        }
        let sql = options.load_sql.then(|| GeneratedSql {
            sql: format!("-- offline: {}", query.as_json()),
            ..GeneratedSql::default()
        });
        if options.sql_only {
            return QueryOutcome {
                sql,
                ..QueryOutcome::default()
            };
        }
        QueryOutcome {
            result_set: Some(query.as_json().clone()),
            error: None,
            sql,
        }
    }
}

/// Prints notifications
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let kind = match notification.kind {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        };
        match notification.description {
            Some(description) => println!("  ({kind}) {}: {description}", notification.message),
            None => println!("  ({kind}) {}", notification.message),
        }
    }
}

/// Prints navigations
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn push(&self, route: &str) {
        println!("  -> {route}");
    }
}

/// Clipboard held in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    /// Last copied text
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

#[async_trait::async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), String> {
        *self.contents.lock() = Some(text.to_string());
        Ok(())
    }
}

/// Reports playground actions as tracing events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn track(&self, event: PlaygroundEvent) {
        tracing::info!(action = event.name(), ?event, "playground action");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offline_dashboard_behaviors() {
        assert_eq!(OfflineDashboard::new(DashboardBehavior::Supported).can_add_chart().await, Ok(true));
        assert_eq!(OfflineDashboard::new(DashboardBehavior::Static).can_add_chart().await, Ok(false));
        assert!(OfflineDashboard::new(DashboardBehavior::Broken).can_add_chart().await.is_err());
        assert!("flaky".parse::<DashboardBehavior>().is_err());
    }

    #[tokio::test]
    async fn offline_renderer_modes() {
        let query = QueryDefinition::new(serde_json::json!({ "measures": ["Orders.count"] }));
        let sql = OfflineRenderer.load(&query, LoadOptions::sql_only()).await;
        assert!(sql.sql.unwrap().sql.starts_with("-- offline"));

        let run = OfflineRenderer.load(&query, LoadOptions::execute()).await;
        assert_eq!(run.result_set.as_ref(), Some(query.as_json()));
        assert!(run.sql.is_none());

        let both = OfflineRenderer
            .load(&query, LoadOptions::execute().with_sql().with_renew_query())
            .await;
        assert!(both.result_set.is_some() && both.sql.is_some());

        let empty = OfflineRenderer.load(&QueryDefinition::default(), LoadOptions::execute()).await;
        assert!(empty.error.is_some());
    }
}
