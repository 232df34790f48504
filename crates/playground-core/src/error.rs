//! Error types for the playground
//!
//! One enum per concern, aggregated into [`PlaygroundError`]:
//! - Selector lookups against the framework and chart library catalogs
//! - Dashboard attach rejection and failure
//! - Clipboard capability and write failures
//! - Configuration loading

use std::path::PathBuf;

use crate::attach::AttachState;

/// Main playground error type
#[derive(Debug, thiserror::Error)]
pub enum PlaygroundError {
    /// Invalid selector id
    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),

    /// Dashboard attach did not succeed
    #[error("attach error: {0}")]
    Attach(#[from] AttachError),

    /// Copy to clipboard failed
    #[error("clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Attach state machine misuse
    #[error("state machine error: {0}")]
    StateMachine(#[from] StateMachineError),
}

impl PlaygroundError {
    /// Whether the error is reported to the user through a notification
    #[inline]
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Attach(_) | Self::Clipboard(_))
    }

    /// Whether the UI can carry on in its default state after this error
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::StateMachine(_))
    }
}

/// Selector lookup errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// Framework id not in the fixed catalog
    #[error("unknown framework: {0}")]
    UnknownFramework(String),

    /// Chart library id not in the supplied catalog
    #[error("unknown chart library: {0}")]
    UnknownChartLibrary(String),

    /// Chart type id not recognised
    #[error("unknown chart type: {0}")]
    UnknownChartType(String),
}

/// Dashboard attach errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    /// The dashboard app does not support adding charts
    #[error("attach rejected: {0}")]
    Rejected(String),

    /// The dashboard collaborator reported an error
    #[error("attach failed: {0}")]
    Failed(String),
}

/// Clipboard errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    /// No clipboard capability on this platform
    #[error("clipboard is not available")]
    ClipboardUnavailable,

    /// The platform clipboard refused the write
    #[error("clipboard write failed: {0}")]
    ClipboardWriteFailed(String),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A default selection names an entry missing from its catalog
    #[error("default {field} is not in the catalog: {value}")]
    UnknownDefault {
        /// Config field
        field: &'static str,
        /// Offending value
        value: String,
    },

    /// The chart library catalog is empty
    #[error("chart library catalog is empty")]
    EmptyCatalog,
}

/// Attach state machine errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateMachineError {
    /// Transition not in the allowed table
    #[error("illegal transition {from:?} -> {to:?}")]
    IllegalTransition {
        /// Current state
        from: AttachState,
        /// Requested state
        to: AttachState,
    },
}
