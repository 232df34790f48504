//! Chart container
//!
//! The containing view: owns [`PlaygroundState`], routes user actions to the
//! selectors, resolves what the open panel shows, and wires copy and
//! add-to-dashboard to their collaborators.

use std::sync::Arc;

use serde::Serialize;

use crate::attach::{DashboardAttachController, DashboardAttachResult, NavigationOffer};
use crate::clipboard::copy_active_artifact;
use crate::collaborators::{
    Clipboard, DashboardClient, EventSink, GeneratedSql, LoadOptions, Navigator, NoopEventSink,
    Notifier, QueryOutcome, QueryRenderer,
};
use crate::config::PlaygroundConfig;
use crate::error::{ClipboardError, PlaygroundError, SelectionError};
use crate::events::PlaygroundEvent;
use crate::framework::is_code_gen_supported;
use crate::state::{ControlAvailability, PlaygroundState};
use crate::types::{ChartLibrary, ChartType, CodeArtifact, Framework, QueryDefinition, ViewMode};

/// Collaborators the container talks to
#[derive(Clone)]
pub struct Collaborators {
    /// Dashboard app
    pub dashboard: Arc<dyn DashboardClient>,
    /// Query execution
    pub renderer: Arc<dyn QueryRenderer>,
    /// User notifications
    pub notifier: Arc<dyn Notifier>,
    /// Route navigation
    pub navigator: Arc<dyn Navigator>,
    /// Platform clipboard, if the platform has one
    pub clipboard: Option<Arc<dyn Clipboard>>,
    /// Action analytics
    pub events: Arc<dyn EventSink>,
}

impl Collaborators {
    /// Required collaborators; no clipboard and no analytics
    #[must_use]
    pub fn new(
        dashboard: Arc<dyn DashboardClient>,
        renderer: Arc<dyn QueryRenderer>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            dashboard,
            renderer,
            notifier,
            navigator,
            clipboard: None,
            events: Arc::new(NoopEventSink),
        }
    }

    /// With a platform clipboard
    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    /// With an analytics sink
    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }
}

/// What the chart area shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "panel", content = "content", rename_all = "snake_case")]
pub enum PanelContent {
    /// The chart, fed by the result set
    Chart(serde_json::Value),
    /// Generated integration code
    Code(CodeArtifact),
    /// Fallback for frameworks without code generation
    UnsupportedFramework {
        /// Explanation shown instead of code
        message: String,
        /// Where to read about the framework
        docs_link: String,
    },
    /// Pretty-printed query definition
    Query(String),
    /// Generated SQL
    Sql(GeneratedSql),
    /// Cache inspection after a renewed run
    Cache {
        /// Pre-aggregations and refresh keys
        sql: GeneratedSql,
        /// Result set of the renewed run; carries the last refresh time and
        /// refresh key values
        result_set: serde_json::Value,
    },
    /// The query has nothing to chart yet
    EmptyQuery(String),
    /// The renderer reported an error
    Error(String),
}

/// Shown in place of the chart area until the query names a member
pub const EMPTY_QUERY_PROMPT: &str = "Choose a measure or dimension to get started";

/// Message shown in the chart area for a framework without code generation
#[must_use]
pub fn unsupported_framework_message(framework: Framework) -> String {
    let title = framework.title();
    format!(
        "We do not support {title} code generation here yet. \
         Please refer to {title} docs to see on how to use it with Cube.js."
    )
}

/// The containing view
pub struct ChartContainer {
    state: PlaygroundState,
    renderer: Arc<dyn QueryRenderer>,
    notifier: Arc<dyn Notifier>,
    clipboard: Option<Arc<dyn Clipboard>>,
    events: Arc<dyn EventSink>,
    attach: DashboardAttachController,
}

impl std::fmt::Debug for ChartContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartContainer")
            .field("state", &self.state)
            .field("attach", &self.attach)
            .field("has_clipboard", &self.clipboard.is_some())
            .finish_non_exhaustive()
    }
}

impl ChartContainer {
    /// Create a container from configuration
    ///
    /// # Errors
    /// `PlaygroundError::Config` if the configuration is invalid.
    pub fn new(
        config: &PlaygroundConfig,
        collaborators: Collaborators,
    ) -> Result<Self, PlaygroundError> {
        config.validate()?;
        let state = PlaygroundState::from_config(config)?;
        let attach = DashboardAttachController::new(
            collaborators.dashboard,
            Arc::clone(&collaborators.notifier),
            collaborators.navigator,
        )
        .with_events(Arc::clone(&collaborators.events))
        .with_route(config.dashboard_route.clone());

        Ok(Self {
            state,
            renderer: collaborators.renderer,
            notifier: collaborators.notifier,
            clipboard: collaborators.clipboard,
            events: collaborators.events,
            attach,
        })
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &PlaygroundState {
        &self.state
    }

    /// Attach controller, for observing the in-flight phase
    #[inline]
    #[must_use]
    pub fn attach_controller(&self) -> &DashboardAttachController {
        &self.attach
    }

    /// Controls the UI should leave enabled
    #[inline]
    #[must_use]
    pub fn controls(&self) -> ControlAvailability {
        self.state.controls()
    }

    /// Replace the query
    pub fn set_query(&mut self, query: QueryDefinition) {
        self.state.set_query(query);
    }

    /// Replace the generated code
    pub fn set_code(&mut self, code: CodeArtifact) {
        self.state.set_code(code);
    }

    /// Toggle a panel; returns the panel now open
    pub fn toggle_mode(&mut self, mode: ViewMode) -> ViewMode {
        let previous = self.state.view_mode();
        let current = self.state.view_mode_selector().set_mode(mode);
        if previous != current {
            self.events.track(PlaygroundEvent::for_mode_change(previous, current));
        }
        current
    }

    /// Select a framework by id
    ///
    /// # Errors
    /// `SelectionError::UnknownFramework` for an id outside the catalog.
    pub fn select_framework(&mut self, id: &str) -> Result<Framework, SelectionError> {
        let framework = self.state.framework_selector().set_framework(id)?;
        self.events.track(PlaygroundEvent::SetFramework { framework });
        Ok(framework)
    }

    /// Select a chart library by id
    ///
    /// # Errors
    /// `SelectionError::UnknownChartLibrary` for an id outside the catalog.
    pub fn select_chart_library(&mut self, id: &str) -> Result<ChartLibrary, SelectionError> {
        let library = self.state.chart_library_selector().set_library(id)?.clone();
        self.events.track(PlaygroundEvent::SetChartLibrary {
            library: library.id.clone(),
        });
        Ok(library)
    }

    /// Select a chart type by id
    ///
    /// # Errors
    /// `SelectionError::UnknownChartType` for an unrecognised id.
    pub fn select_chart_type(&mut self, id: &str) -> Result<ChartType, SelectionError> {
        let chart_type = self.state.set_chart_type(id)?;
        self.events.track(PlaygroundEvent::SetChartType { chart_type });
        Ok(chart_type)
    }

    /// Resolve the content of the chart area for the open panel.
    ///
    /// An empty query shows [`EMPTY_QUERY_PROMPT`]. A framework without code
    /// generation replaces the whole chart area, whichever panel is open.
    pub async fn render_panel(&self) -> PanelContent {
        let mode = self.state.view_mode();
        tracing::debug!(%mode, "rendering panel");

        if !self.state.query().is_present() {
            return PanelContent::EmptyQuery(EMPTY_QUERY_PROMPT.to_string());
        }
        let framework = self.state.framework();
        if !is_code_gen_supported(framework) {
            return PanelContent::UnsupportedFramework {
                message: unsupported_framework_message(framework),
                docs_link: framework.docs_link().unwrap_or_default().to_string(),
            };
        }

        match mode {
            ViewMode::None => {
                let outcome = self.load(LoadOptions::execute()).await;
                match outcome.error {
                    Some(error) => PanelContent::Error(error),
                    None => PanelContent::Chart(outcome.result_set.unwrap_or_default()),
                }
            }
            ViewMode::Code => PanelContent::Code(self.state.code().clone()),
            ViewMode::Query => PanelContent::Query(self.state.query().to_pretty_json()),
            ViewMode::Sql => match self.load_sql(LoadOptions::sql_only()).await {
                Ok((sql, _)) => PanelContent::Sql(sql),
                Err(error) => PanelContent::Error(error),
            },
            ViewMode::Cache => {
                let options = LoadOptions::execute().with_sql().with_renew_query();
                match self.load_sql(options).await {
                    Ok((sql, result_set)) => PanelContent::Cache {
                        sql,
                        result_set: result_set.unwrap_or_default(),
                    },
                    Err(error) => PanelContent::Error(error),
                }
            }
        }
    }

    async fn load(&self, options: LoadOptions) -> QueryOutcome {
        tracing::debug!(?options, "loading query");
        self.renderer.load(self.state.query(), options).await
    }

    async fn load_sql(
        &self,
        options: LoadOptions,
    ) -> Result<(GeneratedSql, Option<serde_json::Value>), String> {
        let outcome = self.load(options).await;
        if let Some(error) = outcome.error {
            tracing::warn!(%error, "sql generation failed");
            return Err(error);
        }
        let sql = outcome
            .sql
            .ok_or_else(|| "query renderer returned no SQL".to_string())?;
        Ok((sql, outcome.result_set))
    }

    /// Copy the query (in query mode) or the code to the clipboard
    ///
    /// # Errors
    /// See [`copy_active_artifact`].
    pub async fn copy_to_clipboard(&self) -> Result<(), ClipboardError> {
        let mode = self.state.view_mode();
        self.events.track(PlaygroundEvent::CopyToClipboard { mode });
        let query = self.state.query().to_pretty_json();
        copy_active_artifact(
            self.clipboard.as_deref(),
            self.notifier.as_ref(),
            mode,
            &query,
            self.state.code().as_str(),
        )
        .await
    }

    /// Add the current chart to the dashboard.
    ///
    /// `None` if an attach is already in flight.
    pub async fn add_to_dashboard(&self) -> Option<DashboardAttachResult> {
        self.attach.attach(self.state.code()).await
    }

    /// Accept the navigation offered by a failed attach
    pub fn navigate_to_dashboard(&self, offer: &NavigationOffer) {
        self.attach.navigate_to_dashboard(offer);
    }
}
