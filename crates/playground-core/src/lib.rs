//! Playground view-state controller
//!
//! Decides what the playground's chart area shows and sequences the actions
//! around it:
//! - Auxiliary panel toggles (code, query, SQL, cache)
//! - Code generation framework and chart library selection
//! - Copying the active artifact to the clipboard
//! - Adding the current chart to the dashboard app
//!
//! Query execution, SQL generation, caching, the dashboard app, notifications
//! and navigation are external collaborators, see [`collaborators`].
//!
//! # Example
//!
//! ```rust,ignore
//! use playground_core::prelude::*;
//!
//! # async fn example(collaborators: Collaborators) -> Result<(), PlaygroundError> {
//! let mut container = ChartContainer::new(&PlaygroundConfig::new(), collaborators)?;
//! container.toggle_mode(ViewMode::Sql);
//! let panel = container.render_panel().await;
//!
//! if let Some(result) = container.add_to_dashboard().await {
//!     result.into_result()?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod attach;
pub mod chart_library;
pub mod clipboard;
pub mod collaborators;
pub mod config;
pub mod console;
pub mod container;
pub mod error;
pub mod events;
pub mod framework;
pub mod logging;
pub mod session;
pub mod state;
pub mod types;
pub mod view_mode;

pub use attach::{
    AttachState, DashboardAttachController, DashboardAttachResult, NavigationOffer,
    ATTACH_UNSUPPORTED_MESSAGE,
};
pub use chart_library::{ChartLibraryCatalog, ChartLibrarySelector};
pub use clipboard::copy_active_artifact;
pub use config::PlaygroundConfig;
pub use container::{ChartContainer, Collaborators, PanelContent, EMPTY_QUERY_PROMPT};
pub use error::{
    AttachError, ClipboardError, ConfigError, PlaygroundError, SelectionError, StateMachineError,
};
pub use events::PlaygroundEvent;
pub use framework::{is_code_gen_supported, FrameworkSelector};
pub use state::{ControlAvailability, PlaygroundState};
pub use types::{ChartLibrary, ChartType, CodeArtifact, Framework, QueryDefinition, ViewMode};
pub use view_mode::ViewModeSelector;

/// Common imports
pub mod prelude {
    pub use crate::collaborators::{
        Clipboard, DashboardClient, EventSink, LoadOptions, Navigator, Notification, Notifier,
        QueryOutcome, QueryRenderer,
    };
    pub use crate::{
        ChartContainer, CodeArtifact, Collaborators, DashboardAttachResult, Framework,
        PanelContent, PlaygroundConfig, PlaygroundError, QueryDefinition, ViewMode,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
