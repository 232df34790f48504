//! Add-to-dashboard sequencing
//!
//! The attach runs capability check → add chart → navigate, with separate
//! paths for a dashboard that refuses charts and one that errors.
//!
//! # Invariants
//!
//! - At most one attach is in flight per controller. A request made while
//!   `Attaching` is ignored and reaches no collaborator.
//! - The capability check strictly precedes `add_chart`.
//! - The "Add to Dashboard" action is tracked only once the dashboard has
//!   accepted the chart.
//! - Every outcome, including a dropped future, leaves the controller `Idle`.

mod state;

pub use state::{allowed_transitions, validate_transition, AttachState};

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::collaborators::{
    DashboardClient, EventSink, Navigator, NoopEventSink, Notification, Notifier,
};
use crate::error::AttachError;
use crate::events::PlaygroundEvent;
use crate::types::CodeArtifact;

/// Shown when the dashboard app cannot take new charts
pub const ATTACH_UNSUPPORTED_MESSAGE: &str =
    "Your static dashboard does not support adding charts. Please use the static dashboard template.";

/// Headline for collaborator errors; the detail goes in the description
pub const ATTACH_FAILED_MESSAGE: &str = "Unable to add the chart to the dashboard";

/// Default route of the dashboard view
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Offer to open the dashboard view after a failed attach
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationOffer {
    /// Button label
    pub label: String,
    /// Route pushed when accepted
    pub route: String,
}

impl NavigationOffer {
    fn to_dashboard(route: &str) -> Self {
        Self {
            label: "Go to Dashboard".to_string(),
            route: route.to_string(),
        }
    }
}

/// Outcome of one attach attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashboardAttachResult {
    /// Chart added and the dashboard view opened
    Success,
    /// Dashboard does not accept charts
    Unsupported(String),
    /// Collaborator error, with an offer to open the dashboard anyway
    Error {
        /// Collaborator error detail
        detail: String,
        /// Navigation the user may accept
        offer: NavigationOffer,
    },
}

impl DashboardAttachResult {
    /// Navigation offered to the user, if any
    #[must_use]
    pub fn navigation_offer(&self) -> Option<&NavigationOffer> {
        match self {
            Self::Error { offer, .. } => Some(offer),
            _ => None,
        }
    }

    /// Convert to a `Result` for `?` propagation.
    ///
    /// # Errors
    /// `AttachError::Rejected` or `AttachError::Failed` for the unsuccessful outcomes.
    pub fn into_result(self) -> Result<(), AttachError> {
        match self {
            Self::Success => Ok(()),
            Self::Unsupported(reason) => Err(AttachError::Rejected(reason)),
            Self::Error { detail, .. } => Err(AttachError::Failed(detail)),
        }
    }
}

/// Drives the attach sequence against the dashboard collaborator
pub struct DashboardAttachController {
    dashboard: Arc<dyn DashboardClient>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    events: Arc<dyn EventSink>,
    route: String,
    state: Mutex<AttachState>,
}

impl std::fmt::Debug for DashboardAttachController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardAttachController")
            .field("route", &self.route)
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

impl DashboardAttachController {
    /// Create an idle controller navigating to [`DASHBOARD_ROUTE`]
    #[must_use]
    pub fn new(
        dashboard: Arc<dyn DashboardClient>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            dashboard,
            notifier,
            navigator,
            events: Arc::new(NoopEventSink),
            route: DASHBOARD_ROUTE.to_string(),
            state: Mutex::new(AttachState::Idle),
        }
    }

    /// Override the dashboard route
    #[must_use]
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = route.into();
        self
    }

    /// Report accepted attaches to `events`
    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Current phase
    #[inline]
    #[must_use]
    pub fn state(&self) -> AttachState {
        *self.state.lock()
    }

    /// Whether an attach is in flight
    #[inline]
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state() == AttachState::Attaching
    }

    /// Add the chart described by `code` to the dashboard.
    ///
    /// Returns `None` without touching any collaborator if another attach is
    /// already in flight.
    pub async fn attach(&self, code: &CodeArtifact) -> Option<DashboardAttachResult> {
        let Some(guard) = InFlight::begin(&self.state) else {
            tracing::debug!("attach already in flight, ignoring request");
            return None;
        };

        let result = match self.dashboard.can_add_chart().await {
            Ok(true) => {
                self.events.track(PlaygroundEvent::AddToDashboard);
                match self.dashboard.add_chart(code).await {
                    Ok(()) => {
                        guard.settle(AttachState::Attached);
                        tracing::info!(route = %self.route, "chart attached to dashboard");
                        self.navigator.push(&self.route);
                        DashboardAttachResult::Success
                    }
                    Err(detail) => self.fail(&guard, detail),
                }
            }
            Ok(false) => {
                guard.settle(AttachState::Rejected);
                tracing::warn!("dashboard does not support adding charts");
                self.notifier
                    .notify(Notification::error(ATTACH_UNSUPPORTED_MESSAGE));
                DashboardAttachResult::Unsupported(ATTACH_UNSUPPORTED_MESSAGE.to_string())
            }
            Err(detail) => self.fail(&guard, detail),
        };

        drop(guard);
        Some(result)
    }

    fn fail(&self, guard: &InFlight<'_>, detail: String) -> DashboardAttachResult {
        guard.settle(AttachState::Failed);
        tracing::warn!(%detail, "attach failed");
        self.notifier
            .notify(Notification::error(ATTACH_FAILED_MESSAGE).with_description(detail.clone()));
        DashboardAttachResult::Error {
            detail,
            offer: NavigationOffer::to_dashboard(&self.route),
        }
    }

    /// Accept a navigation offer from a failed attach
    pub fn navigate_to_dashboard(&self, offer: &NavigationOffer) {
        tracing::debug!(route = %offer.route, "navigating to dashboard");
        self.navigator.push(&offer.route);
    }
}

/// Holds the `Attaching` phase; dropping it settles the controller on `Idle`.
struct InFlight<'a> {
    state: &'a Mutex<AttachState>,
}

impl<'a> InFlight<'a> {
    fn begin(state: &'a Mutex<AttachState>) -> Option<Self> {
        let mut current = state.lock();
        validate_transition(*current, AttachState::Attaching).ok()?;
        *current = AttachState::Attaching;
        tracing::debug!("attach started");
        Some(Self { state })
    }

    fn settle(&self, to: AttachState) {
        let mut current = self.state.lock();
        match validate_transition(*current, to) {
            Ok(()) => *current = to,
            Err(e) => tracing::error!(%e, "attach state not updated"),
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut current = self.state.lock();
        if *current == AttachState::Attaching {
            tracing::warn!("attach dropped before completion");
        }
        *current = AttachState::Idle;
    }
}
