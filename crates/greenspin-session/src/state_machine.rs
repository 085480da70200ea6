/*
[INPUT]:  Phase from state module, SessionAction enum
[OUTPUT]: Validated phase transitions for the live session
[POS]:    Session domain logic - state machine for the spin/submit lifecycle
[UPDATE]: When phase transitions change
*/

use crate::state::Phase;
use thiserror::Error;

/// Events that can move the session between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// User asked for a new task; allowed from every phase
    Spin,
    /// Spin delay elapsed and the task payload is available
    Reveal,
    SpinFailed,
    Submit,
    VerdictReceived,
    SubmitFailed,
    EditProof,
}

/// Errors occurring during phase transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("Invalid transition: {from:?} -> {action:?}")]
    InvalidTransition { from: Phase, action: SessionAction },
}

/// State machine guarding the session lifecycle
#[derive(Debug, Clone)]
pub struct SessionStateMachine {
    current_state: Phase,
}

impl Default for SessionStateMachine {
    fn default() -> Self {
        Self::new(Phase::Idle)
    }
}

impl SessionStateMachine {
    pub fn new(initial: Phase) -> Self {
        Self {
            current_state: initial,
        }
    }

    /// Check if the action is valid from the current phase
    pub fn can_transition(&self, action: SessionAction) -> bool {
        Self::next(self.current_state, action).is_some()
    }

    /// Perform a transition, returning the new phase
    pub fn transition(&mut self, action: SessionAction) -> Result<Phase, StateError> {
        let next = Self::next(self.current_state, action).ok_or(StateError::InvalidTransition {
            from: self.current_state,
            action,
        })?;
        self.current_state = next;
        Ok(next)
    }

    pub fn state(&self) -> Phase {
        self.current_state
    }

    fn next(from: Phase, action: SessionAction) -> Option<Phase> {
        match (from, action) {
            (_, SessionAction::Spin) => Some(Phase::Spinning),
            (Phase::Spinning, SessionAction::Reveal) => Some(Phase::Assigned),
            (Phase::Spinning, SessionAction::SpinFailed) => Some(Phase::Idle),
            (Phase::Assigned, SessionAction::EditProof) => Some(Phase::Assigned),
            (Phase::Assigned, SessionAction::Submit) => Some(Phase::Submitting),
            (Phase::Submitting, SessionAction::VerdictReceived) => Some(Phase::Assigned),
            (Phase::Submitting, SessionAction::SubmitFailed) => Some(Phase::Assigned),
            _ => None,
        }
    }
}
