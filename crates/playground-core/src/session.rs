//! Scripted playground sessions
//!
//! A session is a JSON list of user actions replayed against a
//! [`ChartContainer`]; used by `playground simulate` and by tests.
//!
//! ```json
//! [
//!   { "action": "set_query", "query": { "measures": ["Orders.count"] } },
//!   { "action": "toggle", "mode": "sql" },
//!   { "action": "render" },
//!   { "action": "add_to_dashboard" }
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::attach::{DashboardAttachResult, NavigationOffer};
use crate::container::{ChartContainer, PanelContent};
use crate::types::{CodeArtifact, QueryDefinition, ViewMode};

/// One scripted user action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionStep {
    /// Replace the query
    SetQuery {
        /// New query
        query: serde_json::Value,
    },
    /// Replace the generated code
    SetCode {
        /// New code
        code: String,
    },
    /// Click a panel toggle
    Toggle {
        /// Panel clicked
        mode: ViewMode,
    },
    /// Pick a framework
    Framework {
        /// Framework id
        id: String,
    },
    /// Pick a chart library
    ChartLibrary {
        /// Library id
        id: String,
    },
    /// Pick a chart type
    ChartType {
        /// Chart type id
        id: String,
    },
    /// Resolve the open panel
    Render,
    /// Click "copy"
    Copy,
    /// Click "Add to Dashboard"
    AddToDashboard,
    /// Accept the navigation offered by the last failed attach
    AcceptNavigation,
}

/// Result of one step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptEntry {
    /// Step index in the script
    pub index: usize,
    /// Step as written
    pub step: SessionStep,
    /// Whether the step succeeded
    pub ok: bool,
    /// Human readable outcome
    pub outcome: String,
}

/// Outcomes of a replayed session
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transcript {
    /// One entry per step, in order
    pub entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Whether any step failed
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|e| !e.ok)
    }

    /// Render as plain text, one line per step
    #[must_use]
    pub fn generate_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| {
                let mark = if e.ok { "ok " } else { "ERR" };
                format!("[{mark}] #{:<3} {}", e.index, e.outcome)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parse a session script
///
/// # Errors
/// Any `serde_json` error for a malformed script.
pub fn parse_script(source: &str) -> Result<Vec<SessionStep>, serde_json::Error> {
    serde_json::from_str(source)
}

/// Read and parse a session script file
///
/// # Errors
/// IO or JSON errors, with the path in the context.
pub fn load_script(path: impl AsRef<Path>) -> anyhow::Result<Vec<SessionStep>> {
    use anyhow::Context;

    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read session script {}", path.display()))?;
    parse_script(&source).with_context(|| format!("invalid session script {}", path.display()))
}

/// Replay `steps` against `container`
pub async fn run_session(container: &mut ChartContainer, steps: &[SessionStep]) -> Transcript {
    let mut transcript = Transcript::default();
    let mut offer: Option<NavigationOffer> = None;

    for (index, step) in steps.iter().enumerate() {
        let (ok, outcome) = run_step(container, step, &mut offer).await;
        tracing::debug!(index, ok, %outcome, "session step");
        transcript.entries.push(TranscriptEntry {
            index,
            step: step.clone(),
            ok,
            outcome,
        });
    }
    transcript
}

async fn run_step(
    container: &mut ChartContainer,
    step: &SessionStep,
    offer: &mut Option<NavigationOffer>,
) -> (bool, String) {
    match step {
        SessionStep::SetQuery { query } => {
            container.set_query(QueryDefinition::new(query.clone()));
            (true, "query updated".to_string())
        }
        SessionStep::SetCode { code } => {
            container.set_code(CodeArtifact::new(code.clone()));
            (true, "code updated".to_string())
        }
        SessionStep::Toggle { mode } => {
            let now = container.toggle_mode(*mode);
            (true, format!("panel: {now}"))
        }
        SessionStep::Framework { id } => match container.select_framework(id) {
            Ok(framework) => {
                let controls = container.controls();
                (
                    true,
                    format!(
                        "framework: {} (chart library {})",
                        framework.title(),
                        if controls.chart_library { "enabled" } else { "disabled" }
                    ),
                )
            }
            Err(e) => (false, e.to_string()),
        },
        SessionStep::ChartLibrary { id } => match container.select_chart_library(id) {
            Ok(library) => (true, format!("chart library: {}", library.title)),
            Err(e) => (false, e.to_string()),
        },
        SessionStep::ChartType { id } => match container.select_chart_type(id) {
            Ok(chart_type) => (true, format!("chart type: {chart_type:?}")),
            Err(e) => (false, e.to_string()),
        },
        SessionStep::Render => describe_panel(container.render_panel().await),
        SessionStep::Copy => match container.copy_to_clipboard().await {
            Ok(()) => (true, "copied to clipboard".to_string()),
            Err(e) => (false, e.to_string()),
        },
        SessionStep::AddToDashboard => match container.add_to_dashboard().await {
            None => (true, "attach already in flight".to_string()),
            Some(result) => {
                *offer = result.navigation_offer().cloned();
                describe_attach(result)
            }
        },
        SessionStep::AcceptNavigation => match offer.take() {
            Some(offer) => {
                container.navigate_to_dashboard(&offer);
                (true, format!("navigated to {}", offer.route))
            }
            None => (false, "no navigation offered".to_string()),
        },
    }
}

fn describe_panel(content: PanelContent) -> (bool, String) {
    match content {
        PanelContent::Chart(data) => (true, format!("chart: {data}")),
        PanelContent::Code(code) => (true, format!("code:\n{code}")),
        PanelContent::UnsupportedFramework { message, docs_link } => {
            (true, format!("{message} ({docs_link})"))
        }
        PanelContent::Query(query) => (true, format!("query:\n{query}")),
        PanelContent::Sql(sql) => (true, format!("sql: {}", sql.sql)),
        PanelContent::Cache { sql, .. } => (
            true,
            format!(
                "cache: {} pre-aggregation(s), {} refresh key(s)",
                sql.pre_aggregations.len(),
                sql.refresh_keys.len()
            ),
        ),
        PanelContent::EmptyQuery(prompt) => (true, prompt),
        PanelContent::Error(error) => (false, format!("render error: {error}")),
    }
}

fn describe_attach(result: DashboardAttachResult) -> (bool, String) {
    match result {
        DashboardAttachResult::Success => (true, "chart added to dashboard".to_string()),
        DashboardAttachResult::Unsupported(reason) => (false, reason),
        DashboardAttachResult::Error { detail, offer } => {
            (false, format!("{detail} (offer: {})", offer.label))
        }
    }
}
