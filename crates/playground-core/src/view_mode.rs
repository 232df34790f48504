//! Auxiliary panel toggle

use crate::types::ViewMode;

/// Tracks which auxiliary panel is open. At most one at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewModeSelector {
    current: ViewMode,
}

impl ViewModeSelector {
    /// Start with no panel open
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently open panel
    #[inline]
    #[must_use]
    pub fn current(&self) -> ViewMode {
        self.current
    }

    /// Request a panel. Requesting the open panel closes it.
    pub fn set_mode(&mut self, requested: ViewMode) -> ViewMode {
        let next = if requested == self.current {
            ViewMode::None
        } else {
            requested
        };
        tracing::debug!(from = %self.current, to = %next, "view mode changed");
        self.current = next;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_mode() -> impl Strategy<Value = ViewMode> {
        prop_oneof![
            Just(ViewMode::None),
            Just(ViewMode::Code),
            Just(ViewMode::Query),
            Just(ViewMode::Sql),
            Just(ViewMode::Cache),
        ]
    }

    #[test]
    fn switching_panels_replaces_the_open_one() {
        let mut selector = ViewModeSelector::new();
        assert_eq!(selector.set_mode(ViewMode::Code), ViewMode::Code);
        assert_eq!(selector.set_mode(ViewMode::Sql), ViewMode::Sql);
        assert_eq!(selector.current(), ViewMode::Sql);
    }

    proptest! {
        #[test]
        fn prop_double_toggle_closes(start in any_mode(), m in any_mode()) {
            prop_assume!(start != m);
            let mut selector = ViewModeSelector::new();
            selector.set_mode(start);
            prop_assert_eq!(selector.set_mode(m), m);
            prop_assert_eq!(selector.set_mode(m), ViewMode::None);
            prop_assert_eq!(selector.current(), ViewMode::None);
        }

        #[test]
        fn prop_reclicking_the_open_panel_closes_it(m in any_mode()) {
            let mut selector = ViewModeSelector::new();
            selector.set_mode(m);
            prop_assert_eq!(selector.set_mode(m), ViewMode::None);
        }
    }
}
