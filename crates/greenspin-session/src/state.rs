/*
[INPUT]:  Task payloads from the service client, proof edits from the user
[OUTPUT]: TaskSession snapshot consumed by renderers and tests
[POS]:    Session domain model - the single live task-assignment cycle
[UPDATE]: When session fields or the submission guard change
*/

use std::fmt;
use std::sync::Arc;

use greenspin_adapter::{PhotoAttachment, TaskPayload};

/// Lifecycle phase of the live session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Spinning,
    Assigned,
    Submitting,
    /// Terminal verdict phase. The controller returns to `Assigned` after a
    /// verdict so the user can resubmit, so it never enters this phase itself.
    Validated,
}

impl Phase {
    /// A network operation is outstanding
    pub fn is_busy(self) -> bool {
        matches!(self, Phase::Spinning | Phase::Submitting)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Idle => "idle",
            Phase::Spinning => "spinning",
            Phase::Assigned => "assigned",
            Phase::Submitting => "submitting",
            Phase::Validated => "validated",
        };
        f.write_str(label)
    }
}

/// Task data revealed once a spin completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedTask {
    pub description: String,
    pub impact_note: String,
    pub points_awarded: u32,
    pub monetary_value: String,
}

impl From<TaskPayload> for AssignedTask {
    fn from(payload: TaskPayload) -> Self {
        Self {
            description: payload.desc,
            impact_note: payload.task,
            points_awarded: payload.points,
            monetary_value: payload.value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    TaskRequest,
    Validation,
}

/// Last failed operation, kept on the session so callers can render it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl SessionFailure {
    pub fn task_request(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::TaskRequest,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Validation,
            message: message.into(),
        }
    }
}

/// Why the submission guard refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocker {
    NoTask,
    EmptyProofText,
    MissingPhoto,
}

/// The single live session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSession {
    /// Monotonic id, bumped on every spin
    pub session_id: u64,
    pub phase: Phase,
    pub task: Option<AssignedTask>,
    pub proof_text: String,
    pub proof_photo: Option<Arc<PhotoAttachment>>,
    pub validation_verdict: Option<String>,
    pub last_error: Option<SessionFailure>,
}

impl TaskSession {
    /// Fresh session for a spin that was just requested
    pub fn spinning(session_id: u64) -> Self {
        Self {
            session_id,
            phase: Phase::Spinning,
            ..Self::default()
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.task.as_ref().map(|task| task.description.as_str())
    }

    pub fn impact_note(&self) -> Option<&str> {
        self.task.as_ref().map(|task| task.impact_note.as_str())
    }

    pub fn points_awarded(&self) -> Option<u32> {
        self.task.as_ref().map(|task| task.points_awarded)
    }

    pub fn monetary_value(&self) -> Option<&str> {
        self.task.as_ref().map(|task| task.monetary_value.as_str())
    }

    /// First reason a submission would be refused, ignoring phase
    pub fn submit_blocker(&self) -> Option<SubmitBlocker> {
        if self.task.is_none() {
            return Some(SubmitBlocker::NoTask);
        }
        if self.proof_text.trim().is_empty() {
            return Some(SubmitBlocker::EmptyProofText);
        }
        if self.proof_photo.is_none() {
            return Some(SubmitBlocker::MissingPhoto);
        }
        None
    }

    /// Whether the submit action should be enabled
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Assigned && self.submit_blocker().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assigned() -> TaskSession {
        TaskSession {
            session_id: 1,
            phase: Phase::Assigned,
            task: Some(AssignedTask {
                description: "Plant a tree".to_string(),
                impact_note: "Reduces CO2".to_string(),
                points_awarded: 50,
                monetary_value: "€5".to_string(),
            }),
            ..TaskSession::default()
        }
    }

    #[test]
    fn test_default_session_is_idle_and_empty() {
        let session = TaskSession::default();
        assert_eq!(session.phase, Phase::Idle);
        assert!(session.description().is_none());
        assert!(session.points_awarded().is_none());
        assert!(!session.can_submit());
    }

    #[test]
    fn test_submit_guard_requires_trimmed_text_and_photo() {
        let mut session = assigned();
        assert_eq!(session.submit_blocker(), Some(SubmitBlocker::EmptyProofText));

        session.proof_text = "   \n\t".to_string();
        assert_eq!(session.submit_blocker(), Some(SubmitBlocker::EmptyProofText));

        session.proof_text = "done".to_string();
        assert_eq!(session.submit_blocker(), Some(SubmitBlocker::MissingPhoto));

        session.proof_photo = Some(Arc::new(PhotoAttachment::from_bytes("a.jpg", vec![1])));
        assert!(session.can_submit());

        session.phase = Phase::Submitting;
        assert!(!session.can_submit());
    }

    #[test]
    fn test_payload_maps_to_assigned_task() {
        let task = AssignedTask::from(TaskPayload {
            desc: "Plant a tree".to_string(),
            task: "Reduces CO2".to_string(),
            points: 50,
            value: "€5".to_string(),
        });
        assert_eq!(task, assigned().task.expect("task"));
    }

    #[test]
    fn test_busy_phases() {
        assert!(Phase::Spinning.is_busy());
        assert!(Phase::Submitting.is_busy());
        assert!(!Phase::Idle.is_busy());
        assert!(!Phase::Assigned.is_busy());
        assert_eq!(Phase::Submitting.to_string(), "submitting");
    }
}
