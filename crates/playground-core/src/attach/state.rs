use serde::{Deserialize, Serialize};

use crate::error::StateMachineError;

/// Phase of a dashboard attach.
///
/// `Attached`, `Rejected` and `Failed` are transient: the controller passes
/// through them and settles back on `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttachState {
    /// Ready for a request
    #[default]
    Idle,
    /// Capability check or add-chart in flight
    Attaching,
    /// Chart was added
    Attached,
    /// Dashboard does not accept charts
    Rejected,
    /// Dashboard collaborator errored
    Failed,
}

impl AttachState {
    /// Whether this is one of the three outcome states
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Attached | Self::Rejected | Self::Failed)
    }
}

/// Validates a state transition.
///
/// # Errors
/// `StateMachineError::IllegalTransition` if `to` is not reachable from `from`.
pub fn validate_transition(from: AttachState, to: AttachState) -> Result<(), StateMachineError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(StateMachineError::IllegalTransition { from, to })
    }
}

/// States reachable from `from` in one step
#[must_use]
pub fn allowed_transitions(from: AttachState) -> Vec<AttachState> {
    use AttachState::{Attached, Attaching, Failed, Idle, Rejected};
    match from {
        Idle => vec![Attaching],
        // Idle directly only when the in-flight future is dropped.
        Attaching => vec![Attached, Rejected, Failed, Idle],
        Attached | Rejected | Failed => vec![Idle],
    }
}
