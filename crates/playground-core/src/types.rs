//! Core types for the playground
//!
//! Defines the value types shared by the selectors and controllers:
//! - View modes for the auxiliary panels
//! - Code generation frameworks and chart libraries
//! - Chart types
//! - Opaque query definitions and generated code artifacts

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SelectionError;

/// Auxiliary panel shown in place of the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// No panel, the chart itself is shown
    #[default]
    None,
    /// Generated integration code
    Code,
    /// JSON query definition
    Query,
    /// Generated SQL
    Sql,
    /// Cache (pre-aggregation / refresh key) inspection
    Cache,
}

impl ViewMode {
    /// All view modes, `None` first
    pub const ALL: [ViewMode; 5] = [
        ViewMode::None,
        ViewMode::Code,
        ViewMode::Query,
        ViewMode::Sql,
        ViewMode::Cache,
    ];

    /// Whether an auxiliary panel is open
    #[inline]
    #[must_use]
    pub fn is_panel(self) -> bool {
        !matches!(self, ViewMode::None)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewMode::None => "none",
            ViewMode::Code => "code",
            ViewMode::Query => "query",
            ViewMode::Sql => "sql",
            ViewMode::Cache => "cache",
        };
        f.write_str(name)
    }
}

/// Target framework for generated integration code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    /// Plain JavaScript client
    Vanilla,
    /// React bindings
    #[default]
    React,
    /// Angular bindings
    Angular,
    /// Vue.js bindings
    Vue,
}

impl Framework {
    /// The fixed framework catalog, in display order
    pub const ALL: [Framework; 4] = [
        Framework::Vanilla,
        Framework::React,
        Framework::Angular,
        Framework::Vue,
    ];

    /// Stable identifier
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Framework::Vanilla => "vanilla",
            Framework::React => "react",
            Framework::Angular => "angular",
            Framework::Vue => "vue",
        }
    }

    /// Human readable title
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Framework::Vanilla => "Vanilla JavaScript",
            Framework::React => "React",
            Framework::Angular => "Angular",
            Framework::Vue => "Vue.js",
        }
    }

    /// Documentation link for frameworks without code generation
    #[must_use]
    pub fn docs_link(self) -> Option<&'static str> {
        match self {
            Framework::Vanilla => Some("https://cube.dev/docs/@cubejs-client-core"),
            Framework::React => None,
            Framework::Angular => Some("https://cube.dev/docs/@cubejs-client-ngx"),
            Framework::Vue => Some("https://cube.dev/docs/@cubejs-client-vue"),
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Framework {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Framework::ALL
            .into_iter()
            .find(|f| f.id() == s)
            .ok_or_else(|| SelectionError::UnknownFramework(s.to_string()))
    }
}

/// Charting library entry from the library catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartLibrary {
    /// Stable identifier, e.g. `bizcharts`
    pub id: String,
    /// Human readable title
    pub title: String,
}

impl ChartLibrary {
    /// Create a catalog entry
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Chart type rendered by the chart panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Line chart
    #[default]
    Line,
    /// Stacked area chart
    Area,
    /// Bar chart
    Bar,
    /// Pie chart
    Pie,
    /// Tabular result
    Table,
    /// Single number
    Number,
}

impl FromStr for ChartType {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(ChartType::Line),
            "area" => Ok(ChartType::Area),
            "bar" => Ok(ChartType::Bar),
            "pie" => Ok(ChartType::Pie),
            "table" => Ok(ChartType::Table),
            "number" => Ok(ChartType::Number),
            other => Err(SelectionError::UnknownChartType(other.to_string())),
        }
    }
}

/// Analytical query, validated elsewhere and passed through untouched
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryDefinition(pub serde_json::Value);

impl QueryDefinition {
    /// Wrap a JSON value
    #[inline]
    #[must_use]
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Borrow the underlying JSON
    #[inline]
    #[must_use]
    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    /// Whether the query names at least one measure, dimension or time
    /// dimension. Anything else has nothing to chart.
    #[must_use]
    pub fn is_present(&self) -> bool {
        ["measures", "dimensions", "timeDimensions"].iter().any(|member| {
            self.0
                .get(member)
                .and_then(serde_json::Value::as_array)
                .is_some_and(|items| !items.is_empty())
        })
    }

    /// Text shown in the query panel and copied by "copy query"
    #[must_use]
    pub fn to_pretty_json(&self) -> String {
        // Serializing a `Value` cannot fail.
        serde_json::to_string_pretty(&self.0).unwrap_or_default()
    }
}

/// Generated integration snippet for the current chart
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeArtifact(pub String);

impl CodeArtifact {
    /// Wrap generated source
    #[inline]
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    /// Source text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CodeArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
