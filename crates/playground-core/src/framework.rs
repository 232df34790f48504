//! Code generation framework selection

use crate::error::SelectionError;
use crate::types::Framework;

/// Whether the playground can generate integration code for `framework`.
///
/// Frameworks that only point at external docs cannot.
#[inline]
#[must_use]
pub fn is_code_gen_supported(framework: Framework) -> bool {
    framework.docs_link().is_none()
}

/// Tracks the selected framework
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameworkSelector {
    current: Framework,
}

impl FrameworkSelector {
    /// Start from `initial`
    #[inline]
    #[must_use]
    pub fn new(initial: Framework) -> Self {
        Self { current: initial }
    }

    /// Selected framework
    #[inline]
    #[must_use]
    pub fn current(&self) -> Framework {
        self.current
    }

    /// Whether the selected framework supports code generation
    #[inline]
    #[must_use]
    pub fn is_supported(&self) -> bool {
        is_code_gen_supported(self.current)
    }

    /// Select a framework by id.
    ///
    /// # Errors
    /// `SelectionError::UnknownFramework` if `id` is not in the catalog;
    /// the selection is left unchanged.
    pub fn set_framework(&mut self, id: &str) -> Result<Framework, SelectionError> {
        let framework = match id.parse::<Framework>() {
            Ok(framework) => framework,
            Err(e) => {
                tracing::warn!(%e, "framework selection rejected");
                return Err(e);
            }
        };
        tracing::debug!(from = %self.current, to = %framework, "framework changed");
        self.current = framework;
        Ok(framework)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn only_react_generates_code() {
        assert!(is_code_gen_supported(Framework::React));
        assert!(!is_code_gen_supported(Framework::Vanilla));
        assert!(!is_code_gen_supported(Framework::Angular));
        assert!(!is_code_gen_supported(Framework::Vue));
    }

    #[test]
    fn unknown_id_leaves_selection_alone() {
        let mut selector = FrameworkSelector::new(Framework::Vue);
        let err = selector.set_framework("svelte").unwrap_err();
        assert_eq!(err, SelectionError::UnknownFramework("svelte".into()));
        assert_eq!(selector.current(), Framework::Vue);
    }

    #[test]
    fn known_id_switches() {
        let mut selector = FrameworkSelector::default();
        assert_eq!(selector.set_framework("angular").unwrap(), Framework::Angular);
        assert!(!selector.is_supported());
    }

    proptest! {
        #[test]
        fn prop_support_follows_docs_link(idx in 0usize..Framework::ALL.len()) {
            let framework = Framework::ALL[idx];
            prop_assert_eq!(is_code_gen_supported(framework), framework.docs_link().is_none());
        }
    }
}
