//! Playground configuration
//!
//! Defaults are usable as-is; a TOML file can override any field:
//!
//! ```toml
//! default_framework = "react"
//! default_chart_library = "recharts"
//! default_chart_type = "bar"
//! dashboard_route = "/dashboard"
//!
//! [[chart_libraries]]
//! id = "recharts"
//! title = "Recharts"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::attach::DASHBOARD_ROUTE;
use crate::chart_library::ChartLibraryCatalog;
use crate::error::ConfigError;
use crate::types::{ChartType, Framework};

/// Playground configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Framework selected on startup
    pub default_framework: Framework,
    /// Chart library selected on startup
    pub default_chart_library: String,
    /// Chart type selected on startup
    pub default_chart_type: ChartType,
    /// Route of the dashboard view
    pub dashboard_route: String,
    /// Available chart libraries
    pub chart_libraries: ChartLibraryCatalog,
}

impl PlaygroundConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With default framework
    #[inline]
    #[must_use]
    pub fn with_framework(mut self, framework: Framework) -> Self {
        self.default_framework = framework;
        self
    }

    /// With default chart library
    #[inline]
    #[must_use]
    pub fn with_chart_library(mut self, id: impl Into<String>) -> Self {
        self.default_chart_library = id.into();
        self
    }

    /// With chart library catalog
    #[inline]
    #[must_use]
    pub fn with_catalog(mut self, catalog: ChartLibraryCatalog) -> Self {
        self.chart_libraries = catalog;
        self
    }

    /// With dashboard route
    #[inline]
    #[must_use]
    pub fn with_dashboard_route(mut self, route: impl Into<String>) -> Self {
        self.dashboard_route = route.into();
        self
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// `ConfigError::Parse` on malformed TOML, or any error from [`Self::validate`].
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// `ConfigError::Read` if the file cannot be read, otherwise as [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading playground configuration");
        Self::from_toml_str(&source)
    }

    /// Check the defaults against the catalog
    ///
    /// # Errors
    /// `ConfigError::EmptyCatalog` or `ConfigError::UnknownDefault`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chart_libraries.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if !self.chart_libraries.contains(&self.default_chart_library) {
            return Err(ConfigError::UnknownDefault {
                field: "default_chart_library",
                value: self.default_chart_library.clone(),
            });
        }
        Ok(())
    }
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            default_framework: Framework::React,
            default_chart_library: "bizcharts".to_string(),
            default_chart_type: ChartType::Line,
            dashboard_route: DASHBOARD_ROUTE.to_string(),
            chart_libraries: ChartLibraryCatalog::default(),
        }
    }
}
