//! Chart library catalog and selection

use serde::{Deserialize, Serialize};

use crate::error::SelectionError;
use crate::types::ChartLibrary;

/// Externally supplied list of charting libraries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartLibraryCatalog {
    libraries: Vec<ChartLibrary>,
}

impl ChartLibraryCatalog {
    /// Build a catalog from entries, in display order
    #[must_use]
    pub fn new(libraries: Vec<ChartLibrary>) -> Self {
        Self { libraries }
    }

    /// Look up an entry
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ChartLibrary> {
        self.libraries.iter().find(|l| l.id == id)
    }

    /// Whether `id` is in the catalog
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// First entry, used as the fallback default
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&ChartLibrary> {
        self.libraries.first()
    }

    /// Iterate entries
    pub fn iter(&self) -> impl Iterator<Item = &ChartLibrary> {
        self.libraries.iter()
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    /// Whether the catalog has no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }
}

impl Default for ChartLibraryCatalog {
    fn default() -> Self {
        Self::new(vec![
            ChartLibrary::new("bizcharts", "Bizcharts"),
            ChartLibrary::new("recharts", "Recharts"),
            ChartLibrary::new("d3", "D3"),
            ChartLibrary::new("chartjs", "Chart.js"),
        ])
    }
}

/// Tracks the selected chart library.
///
/// The selector never refuses a change on framework grounds; disabling the
/// control for unsupported frameworks is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLibrarySelector {
    catalog: ChartLibraryCatalog,
    current: usize,
}

impl ChartLibrarySelector {
    /// Select `initial` from `catalog`.
    ///
    /// # Errors
    /// `SelectionError::UnknownChartLibrary` if `initial` is not in the catalog.
    pub fn new(catalog: ChartLibraryCatalog, initial: &str) -> Result<Self, SelectionError> {
        let current = Self::position(&catalog, initial)?;
        Ok(Self { catalog, current })
    }

    fn position(catalog: &ChartLibraryCatalog, id: &str) -> Result<usize, SelectionError> {
        catalog
            .libraries
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| SelectionError::UnknownChartLibrary(id.to_string()))
    }

    /// Selected library
    #[inline]
    #[must_use]
    pub fn current(&self) -> &ChartLibrary {
        &self.catalog.libraries[self.current]
    }

    /// The catalog this selector draws from
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &ChartLibraryCatalog {
        &self.catalog
    }

    /// Select a library by id.
    ///
    /// # Errors
    /// `SelectionError::UnknownChartLibrary` if `id` is not in the catalog;
    /// the selection is left unchanged.
    pub fn set_library(&mut self, id: &str) -> Result<&ChartLibrary, SelectionError> {
        let idx = match Self::position(&self.catalog, id) {
            Ok(idx) => idx,
            Err(e) => {
                tracing::warn!(%e, "chart library selection rejected");
                return Err(e);
            }
        };
        tracing::debug!(from = %self.current().id, to = id, "chart library changed");
        self.current = idx;
        Ok(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog() {
        let catalog = ChartLibraryCatalog::default();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get("chartjs").unwrap().title, "Chart.js");
        assert!(!catalog.contains("plotly"));
    }

    #[test]
    fn set_library_switches_and_rejects() {
        let mut selector = ChartLibrarySelector::new(ChartLibraryCatalog::default(), "bizcharts").unwrap();
        assert_eq!(selector.set_library("d3").unwrap().id, "d3");

        let err = selector.set_library("plotly").unwrap_err();
        assert_eq!(err, SelectionError::UnknownChartLibrary("plotly".into()));
        assert_eq!(selector.current().id, "d3");
    }

    #[test]
    fn initial_must_exist() {
        assert!(ChartLibrarySelector::new(ChartLibraryCatalog::default(), "nope").is_err());
        assert!(ChartLibrarySelector::new(ChartLibraryCatalog::new(vec![]), "bizcharts").is_err());
    }
}
