//! Playground action events
//!
//! Named user actions reported to the analytics [`EventSink`](crate::collaborators::EventSink).
//! The names are stable strings consumed by dashboards downstream.

use serde::{Deserialize, Serialize};

use crate::types::{ChartType, Framework, ViewMode};

/// A user action in the playground
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlaygroundEvent {
    /// An auxiliary panel was opened
    ShowPanel {
        /// Panel that was opened
        mode: ViewMode,
    },
    /// The open panel was closed by clicking it again
    HidePanel {
        /// Panel that was closed
        mode: ViewMode,
    },
    /// Framework changed
    SetFramework {
        /// New framework
        framework: Framework,
    },
    /// Chart library changed
    SetChartLibrary {
        /// New library id
        library: String,
    },
    /// Chart type changed
    SetChartType {
        /// New chart type
        chart_type: ChartType,
    },
    /// The active artifact was copied
    CopyToClipboard {
        /// Panel whose artifact was copied
        mode: ViewMode,
    },
    /// The dashboard accepted a chart and the add is under way
    AddToDashboard,
}

impl PlaygroundEvent {
    /// Analytics name of the action
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShowPanel { mode } => match mode {
                ViewMode::Code => "Show Code",
                ViewMode::Query => "Show Query",
                ViewMode::Sql => "Show SQL",
                ViewMode::Cache => "Show Cache",
                ViewMode::None => "Hide Panel",
            },
            Self::HidePanel { .. } => "Hide Panel",
            Self::SetFramework { .. } => "Set Framework",
            Self::SetChartLibrary { .. } => "Set Chart Library",
            Self::SetChartType { .. } => "Set Chart Type",
            Self::CopyToClipboard { mode } => {
                if *mode == ViewMode::Query {
                    "Copy Query to Clipboard"
                } else {
                    "Copy Code to Clipboard"
                }
            }
            Self::AddToDashboard => "Add to Dashboard",
        }
    }

    /// Event for a view mode change from `previous` to `current`
    #[must_use]
    pub fn for_mode_change(previous: ViewMode, current: ViewMode) -> Self {
        if current == ViewMode::None {
            Self::HidePanel { mode: previous }
        } else {
            Self::ShowPanel { mode: current }
        }
    }
}
