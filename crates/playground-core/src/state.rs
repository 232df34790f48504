//! Selection state owned by the containing view
//!
//! The three selections are independent. Framework support only decides
//! which controls are interactable; it never rewrites another selection.

use serde::Serialize;

use crate::chart_library::ChartLibrarySelector;
use crate::config::PlaygroundConfig;
use crate::error::SelectionError;
use crate::framework::FrameworkSelector;
use crate::types::{ChartLibrary, ChartType, CodeArtifact, Framework, QueryDefinition, ViewMode};
use crate::view_mode::ViewModeSelector;

/// Which controls the UI should leave enabled
///
/// Advisory only: the selectors and the attach controller never refuse a
/// request on these grounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlAvailability {
    /// Chart library dropdown
    pub chart_library: bool,
    /// Code, Query, SQL and Cache toggles
    pub panel_toggles: bool,
    /// "Add to Dashboard" button
    pub add_to_dashboard: bool,
}

impl ControlAvailability {
    /// Every control enabled, or every control disabled
    #[must_use]
    pub fn uniform(enabled: bool) -> Self {
        Self {
            chart_library: enabled,
            panel_toggles: enabled,
            add_to_dashboard: enabled,
        }
    }

    /// Whether the toggle for `mode` is interactable
    #[must_use]
    pub fn is_mode_enabled(self, mode: ViewMode) -> bool {
        match mode {
            ViewMode::None => true,
            ViewMode::Code | ViewMode::Query | ViewMode::Sql | ViewMode::Cache => {
                self.panel_toggles
            }
        }
    }
}

/// Query, generated code and the live selections
#[derive(Debug, Clone, PartialEq)]
pub struct PlaygroundState {
    query: QueryDefinition,
    code: CodeArtifact,
    chart_type: ChartType,
    view_mode: ViewModeSelector,
    framework: FrameworkSelector,
    chart_library: ChartLibrarySelector,
}

impl PlaygroundState {
    /// Initial state from configuration
    ///
    /// # Errors
    /// `SelectionError::UnknownChartLibrary` if the configured default library
    /// is missing from the configured catalog.
    pub fn from_config(config: &PlaygroundConfig) -> Result<Self, SelectionError> {
        Ok(Self {
            query: QueryDefinition::default(),
            code: CodeArtifact::default(),
            chart_type: config.default_chart_type,
            view_mode: ViewModeSelector::new(),
            framework: FrameworkSelector::new(config.default_framework),
            chart_library: ChartLibrarySelector::new(
                config.chart_libraries.clone(),
                &config.default_chart_library,
            )?,
        })
    }

    /// Current query
    #[inline]
    #[must_use]
    pub fn query(&self) -> &QueryDefinition {
        &self.query
    }

    /// Replace the query
    pub fn set_query(&mut self, query: QueryDefinition) {
        self.query = query;
    }

    /// Current generated code
    #[inline]
    #[must_use]
    pub fn code(&self) -> &CodeArtifact {
        &self.code
    }

    /// Replace the generated code
    pub fn set_code(&mut self, code: CodeArtifact) {
        self.code = code;
    }

    /// Current chart type
    #[inline]
    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    /// Select a chart type by id
    ///
    /// # Errors
    /// `SelectionError::UnknownChartType` for an unrecognised id.
    pub fn set_chart_type(&mut self, id: &str) -> Result<ChartType, SelectionError> {
        self.chart_type = id.parse()?;
        Ok(self.chart_type)
    }

    /// Open panel
    #[inline]
    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode.current()
    }

    /// Selected framework
    #[inline]
    #[must_use]
    pub fn framework(&self) -> Framework {
        self.framework.current()
    }

    /// Selected chart library
    #[inline]
    #[must_use]
    pub fn chart_library(&self) -> &ChartLibrary {
        self.chart_library.current()
    }

    /// Panel selector
    #[inline]
    pub fn view_mode_selector(&mut self) -> &mut ViewModeSelector {
        &mut self.view_mode
    }

    /// Framework selector
    #[inline]
    pub fn framework_selector(&mut self) -> &mut FrameworkSelector {
        &mut self.framework
    }

    /// Chart library selector
    #[inline]
    pub fn chart_library_selector(&mut self) -> &mut ChartLibrarySelector {
        &mut self.chart_library
    }

    /// Controls the UI should leave enabled for the current framework
    #[must_use]
    pub fn controls(&self) -> ControlAvailability {
        ControlAvailability::uniform(self.framework.is_supported())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> PlaygroundState {
        PlaygroundState::from_config(&PlaygroundConfig::default()).unwrap()
    }

    #[test]
    fn starts_from_config_defaults() {
        let state = state();
        assert_eq!(state.framework(), Framework::React);
        assert_eq!(state.chart_library().id, "bizcharts");
        assert_eq!(state.view_mode(), ViewMode::None);
        assert_eq!(state.chart_type(), ChartType::Line);
    }

    #[test]
    fn unsupported_framework_disables_every_control() {
        let mut state = state();
        state.view_mode_selector().set_mode(ViewMode::Code);
        state.framework_selector().set_framework("vue").unwrap();

        let controls = state.controls();
        assert!(!controls.chart_library);
        assert!(!controls.add_to_dashboard);
        for mode in [ViewMode::Code, ViewMode::Query, ViewMode::Sql, ViewMode::Cache] {
            assert!(!controls.is_mode_enabled(mode), "{mode} toggle still enabled");
        }

        // Selections are left alone.
        assert_eq!(state.view_mode(), ViewMode::Code);
        assert_eq!(state.chart_library().id, "bizcharts");
        assert!(state.chart_library_selector().set_library("d3").is_ok());

        state.framework_selector().set_framework("react").unwrap();
        assert_eq!(state.controls(), ControlAvailability::uniform(true));
    }

    #[test]
    fn chart_type_rejects_unknown() {
        let mut state = state();
        assert_eq!(state.set_chart_type("bar").unwrap(), ChartType::Bar);
        assert!(state.set_chart_type("radar").is_err());
        assert_eq!(state.chart_type(), ChartType::Bar);
    }
}
