//! Testing utilities for the playground workspace
//!
//! Recording fakes for every collaborator, and a fixture that wires them
//! into a [`ChartContainer`].

#![allow(missing_docs)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use playground_core::collaborators::{
    Clipboard, DashboardClient, EventSink, LoadOptions, Navigator, Notification, Notifier,
    QueryOutcome, QueryRenderer,
};
use playground_core::{
    ChartContainer, CodeArtifact, Collaborators, PlaygroundConfig, PlaygroundEvent,
    QueryDefinition,
};
use tokio::sync::Notify;

/// Capability answer for [`FakeDashboard`]
#[derive(Debug, Clone)]
pub enum Capability {
    Supported,
    Unsupported,
    Error(String),
}

/// Dashboard that records calls. With a gate, `can_add_chart` blocks until
/// [`FakeDashboard::release`] is called.
#[derive(Debug)]
pub struct FakeDashboard {
    capability: Capability,
    add_error: Option<String>,
    gate: Option<Notify>,
    pub capability_checks: AtomicUsize,
    pub added: Mutex<Vec<CodeArtifact>>,
}

impl FakeDashboard {
    pub fn new(capability: Capability) -> Self {
        Self {
            capability,
            add_error: None,
            gate: None,
            capability_checks: AtomicUsize::new(0),
            added: Mutex::new(Vec::new()),
        }
    }

    pub fn gated(capability: Capability) -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::new(capability)
        }
    }

    pub fn failing_add(detail: &str) -> Self {
        Self {
            add_error: Some(detail.to_string()),
            ..Self::new(Capability::Supported)
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn add_count(&self) -> usize {
        self.added.lock().len()
    }

    pub fn check_count(&self) -> usize {
        self.capability_checks.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DashboardClient for FakeDashboard {
    async fn can_add_chart(&self) -> Result<bool, String> {
        self.capability_checks.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.capability {
            Capability::Supported => Ok(true),
            Capability::Unsupported => Ok(false),
            Capability::Error(detail) => Err(detail.clone()),
        }
    }

    async fn add_chart(&self, code: &CodeArtifact) -> Result<(), String> {
        if let Some(detail) = &self.add_error {
            return Err(detail.clone());
        }
        self.added.lock().push(code.clone());
        Ok(())
    }
}

/// Renderer returning a canned outcome and recording the options it saw
#[derive(Debug, Default)]
pub struct FakeRenderer {
    outcome: QueryOutcome,
    pub calls: Mutex<Vec<(QueryDefinition, LoadOptions)>>,
}

impl FakeRenderer {
    pub fn returning(outcome: QueryOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn options(&self) -> Vec<LoadOptions> {
        self.calls.lock().iter().map(|(_, o)| *o).collect()
    }
}

#[async_trait::async_trait]
impl QueryRenderer for FakeRenderer {
    async fn load(&self, query: &QueryDefinition, options: LoadOptions) -> QueryOutcome {
        self.calls.lock().push((query.clone(), options));
        self.outcome.clone()
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.notifications.lock().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().push(notification);
    }
}

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, route: &str) {
        self.routes.lock().push(route.to_string());
    }
}

/// Clipboard that records writes, or refuses them with `error`
#[derive(Debug, Default)]
pub struct FakeClipboard {
    error: Option<String>,
    pub writes: Mutex<Vec<String>>,
}

impl FakeClipboard {
    pub fn refusing(detail: &str) -> Self {
        Self {
            error: Some(detail.to_string()),
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().clone()
    }
}

#[async_trait::async_trait]
impl Clipboard for FakeClipboard {
    async fn write_text(&self, text: &str) -> Result<(), String> {
        self.writes.lock().push(text.to_string());
        match &self.error {
            Some(detail) => Err(detail.clone()),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingEvents {
    pub events: Mutex<Vec<PlaygroundEvent>>,
}

impl RecordingEvents {
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(PlaygroundEvent::name).collect()
    }
}

impl EventSink for RecordingEvents {
    fn track(&self, event: PlaygroundEvent) {
        self.events.lock().push(event);
    }
}

/// A container wired to recording fakes, with handles to inspect them
pub struct Fixture {
    pub container: ChartContainer,
    pub dashboard: Arc<FakeDashboard>,
    pub renderer: Arc<FakeRenderer>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
    pub clipboard: Option<Arc<FakeClipboard>>,
    pub events: Arc<RecordingEvents>,
}

impl Fixture {
    pub fn builder() -> FixtureBuilder {
        FixtureBuilder::default()
    }
}

pub struct FixtureBuilder {
    config: PlaygroundConfig,
    dashboard: FakeDashboard,
    renderer: FakeRenderer,
    clipboard: Option<FakeClipboard>,
}

impl Default for FixtureBuilder {
    fn default() -> Self {
        Self {
            config: PlaygroundConfig::default(),
            dashboard: FakeDashboard::new(Capability::Supported),
            renderer: FakeRenderer::default(),
            clipboard: Some(FakeClipboard::default()),
        }
    }
}

impl FixtureBuilder {
    pub fn config(mut self, config: PlaygroundConfig) -> Self {
        self.config = config;
        self
    }

    pub fn dashboard(mut self, dashboard: FakeDashboard) -> Self {
        self.dashboard = dashboard;
        self
    }

    pub fn renderer(mut self, renderer: FakeRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn clipboard(mut self, clipboard: Option<FakeClipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn build(self) -> Fixture {
        let dashboard = Arc::new(self.dashboard);
        let renderer = Arc::new(self.renderer);
        let notifier = Arc::new(RecordingNotifier::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let clipboard = self.clipboard.map(Arc::new);
        let events = Arc::new(RecordingEvents::default());

        let mut collaborators = Collaborators::new(
            dashboard.clone(),
            renderer.clone(),
            notifier.clone(),
            navigator.clone(),
        )
        .with_events(events.clone());
        if let Some(clipboard) = &clipboard {
            collaborators = collaborators.with_clipboard(clipboard.clone());
        }

        let container = ChartContainer::new(&self.config, collaborators).unwrap();
        Fixture {
            container,
            dashboard,
            renderer,
            notifier,
            navigator,
            clipboard,
            events,
        }
    }
}

pub fn sample_query() -> QueryDefinition {
    QueryDefinition::new(serde_json::json!({
        "measures": ["Orders.count"],
        "timeDimensions": [{ "dimension": "Orders.createdAt", "granularity": "day" }]
    }))
}
