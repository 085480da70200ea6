/*
[INPUT]:  TaskService implementation, ControllerConfig, user intents (spin, proof edits, submit)
[OUTPUT]: Published TaskSession snapshots via tokio watch channel
[POS]:    Session layer - owns the single live session and sequences remote calls
[UPDATE]: When transition rules, reveal timing, or stale-result handling change
*/

use std::sync::Arc;
use std::time::Duration;

use greenspin_adapter::{
    PhotoAttachment, TaskPayload, TaskRequestFailed, TaskService, ValidationSubmitFailed,
};
use thiserror::Error;
use tokio::sync::{Mutex, watch};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::state::{AssignedTask, Phase, SessionFailure, SubmitBlocker, TaskSession};
use crate::state_machine::{SessionAction, SessionStateMachine, StateError};

/// Minimum time between a spin request and the task reveal
pub const DEFAULT_SPIN_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub spin_delay: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            spin_delay: DEFAULT_SPIN_DELAY,
        }
    }
}

/// Reasons a user intent was refused without touching the session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("an operation is already in flight (phase: {phase})")]
    Busy { phase: Phase },

    #[error("no task has been assigned yet")]
    NoTaskAssigned,

    #[error("proof text is empty")]
    EmptyProofText,

    #[error("a photo must be attached before submitting")]
    MissingPhoto,

    #[error("proof can only be edited while a task is assigned (phase: {phase})")]
    ProofLocked { phase: Phase },

    #[error(transparent)]
    State(#[from] StateError),
}

struct Inner {
    machine: SessionStateMachine,
    session: TaskSession,
    next_session_id: u64,
    /// Token of the outstanding spin or submit, cancelled by the next spin
    pending: Option<CancellationToken>,
}

impl Inner {
    fn apply(&mut self, action: SessionAction) -> Result<Phase, StateError> {
        self.machine.transition(action)
    }

    fn phase(&self) -> Phase {
        self.machine.state()
    }

    fn is_current(&self, session_id: u64, phase: Phase) -> bool {
        self.session.session_id == session_id && self.phase() == phase
    }
}

struct Shared {
    inner: Mutex<Inner>,
    updates: watch::Sender<TaskSession>,
}

impl Shared {
    /// The state machine owns the phase; the session only mirrors it
    fn publish(&self, inner: &mut Inner) {
        inner.session.phase = inner.phase();
        self.updates.send_replace(inner.session.clone());
    }

    async fn finish_spin(&self, session_id: u64, outcome: Result<TaskPayload, TaskRequestFailed>) {
        let mut inner = self.inner.lock().await;
        if !inner.is_current(session_id, Phase::Spinning) {
            debug!(session_id, "discarding stale task payload");
            return;
        }
        inner.pending = None;

        let applied = match outcome {
            Ok(payload) => inner.apply(SessionAction::Reveal).map(|_| {
                info!(session_id, points = payload.points, "task revealed");
                inner.session.task = Some(AssignedTask::from(payload));
            }),
            Err(failed) => inner.apply(SessionAction::SpinFailed).map(|_| {
                warn!(session_id, error = %failed, "task request failed, back to idle");
                inner.session.last_error = Some(SessionFailure::task_request(failed.reason));
            }),
        };
        if let Err(err) = applied {
            warn!(session_id, error = %err, "spin outcome rejected");
        }

        self.publish(&mut inner);
    }

    async fn finish_submit(
        &self,
        session_id: u64,
        outcome: Result<String, ValidationSubmitFailed>,
    ) {
        let mut inner = self.inner.lock().await;
        if !inner.is_current(session_id, Phase::Submitting) {
            debug!(session_id, "discarding stale validation verdict");
            return;
        }
        inner.pending = None;

        let applied = match outcome {
            Ok(verdict) => inner.apply(SessionAction::VerdictReceived).map(|_| {
                info!(session_id, verdict = %verdict, "validation verdict received");
                inner.session.validation_verdict = Some(verdict);
            }),
            Err(failed) => inner.apply(SessionAction::SubmitFailed).map(|_| {
                warn!(session_id, error = %failed, "validation request failed");
                inner.session.last_error = Some(SessionFailure::validation(failed.reason));
            }),
        };
        if let Err(err) = applied {
            warn!(session_id, error = %err, "submit outcome rejected");
        }

        self.publish(&mut inner);
    }
}

/// Owner of the single live [`TaskSession`].
///
/// Every mutation goes through here. Remote calls run on spawned tokio tasks
/// and only land if the session id they were issued for is still current, so
/// a re-spin always wins over anything still in flight.
#[derive(Clone)]
pub struct SessionController {
    service: Arc<dyn TaskService>,
    config: ControllerConfig,
    shared: Arc<Shared>,
}

impl SessionController {
    pub fn new(service: Arc<dyn TaskService>, config: ControllerConfig) -> Self {
        let (updates, _) = watch::channel(TaskSession::default());
        Self {
            service,
            config,
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    machine: SessionStateMachine::default(),
                    session: TaskSession::default(),
                    next_session_id: 0,
                    pending: None,
                }),
                updates,
            }),
        }
    }

    /// Start a new spin, discarding the previous session.
    ///
    /// The task is revealed no earlier than `spin_delay` after this call and
    /// no earlier than the service answers. Returns the new session id.
    pub async fn spin(&self) -> Result<u64, SessionError> {
        let deadline = Instant::now() + self.config.spin_delay;

        let (session_id, token) = {
            let mut inner = self.shared.inner.lock().await;
            if let Some(previous) = inner.pending.take() {
                previous.cancel();
            }
            inner.apply(SessionAction::Spin)?;
            inner.next_session_id += 1;
            let session_id = inner.next_session_id;
            inner.session = TaskSession::spinning(session_id);

            let token = CancellationToken::new();
            inner.pending = Some(token.clone());
            self.shared.publish(&mut inner);
            (session_id, token)
        };
        info!(session_id, "spin requested");

        let service = Arc::clone(&self.service);
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => {
                    debug!(session_id, "spin superseded before reveal");
                    return;
                }
                outcome = async {
                    let outcome = service.request_new_task().await;
                    if outcome.is_ok() {
                        tokio::time::sleep_until(deadline).await;
                    }
                    outcome
                } => outcome,
            };
            shared.finish_spin(session_id, outcome).await;
        });

        Ok(session_id)
    }

    pub async fn set_proof_text(&self, text: impl Into<String>) -> Result<(), SessionError> {
        let text = text.into();
        self.edit_proof(move |session| session.proof_text = text).await
    }

    pub async fn set_proof_photo(&self, photo: PhotoAttachment) -> Result<(), SessionError> {
        let photo = Arc::new(photo);
        self.edit_proof(move |session| session.proof_photo = Some(photo))
            .await
    }

    pub async fn clear_proof_photo(&self) -> Result<(), SessionError> {
        self.edit_proof(|session| session.proof_photo = None).await
    }

    async fn edit_proof<F>(&self, edit: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut TaskSession),
    {
        let mut inner = self.shared.inner.lock().await;
        if !inner.machine.can_transition(SessionAction::EditProof) {
            return Err(SessionError::ProofLocked {
                phase: inner.phase(),
            });
        }
        inner.apply(SessionAction::EditProof)?;
        edit(&mut inner.session);
        self.shared.publish(&mut inner);
        Ok(())
    }

    /// Submit the current proof for validation.
    ///
    /// Refused without any request when a spin or submit is in flight, when
    /// no task is assigned, or when the proof is incomplete.
    pub async fn submit(&self) -> Result<(), SessionError> {
        let (session_id, description, proof_text, photo, token) = {
            let mut inner = self.shared.inner.lock().await;
            let phase = inner.phase();
            if phase.is_busy() {
                return Err(SessionError::Busy { phase });
            }
            match inner.session.submit_blocker() {
                Some(SubmitBlocker::NoTask) => return Err(SessionError::NoTaskAssigned),
                Some(SubmitBlocker::EmptyProofText) => return Err(SessionError::EmptyProofText),
                Some(SubmitBlocker::MissingPhoto) => return Err(SessionError::MissingPhoto),
                None => {}
            }

            inner.apply(SessionAction::Submit)?;
            inner.session.validation_verdict = None;
            inner.session.last_error = None;

            let token = CancellationToken::new();
            inner.pending = Some(token.clone());
            self.shared.publish(&mut inner);

            let session = &inner.session;
            (
                session.session_id,
                session.description().map(str::to_owned),
                session.proof_text.clone(),
                session.proof_photo.clone(),
                token,
            )
        };
        info!(session_id, "proof submitted for validation");

        let service = Arc::clone(&self.service);
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => {
                    debug!(session_id, "submission superseded by a new spin");
                    return;
                }
                outcome = service.submit_proof(
                    description.as_deref(),
                    &proof_text,
                    photo.as_deref(),
                ) => outcome,
            };
            shared.finish_submit(session_id, outcome).await;
        });

        Ok(())
    }

    /// Latest published session
    pub fn snapshot(&self) -> TaskSession {
        self.shared.updates.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TaskSession> {
        self.shared.updates.subscribe()
    }

    /// Wait until a published session satisfies `predicate`
    pub async fn wait_until<F>(&self, mut predicate: F) -> TaskSession
    where
        F: FnMut(&TaskSession) -> bool,
    {
        let mut updates = self.subscribe();
        match updates.wait_for(|session| predicate(session)).await {
            Ok(session) => session.clone(),
            // The sender lives in `shared`, which `self` keeps alive
            Err(_) => self.snapshot(),
        }
    }

    /// Wait until no spin or submission is outstanding
    pub async fn wait_settled(&self) -> TaskSession {
        self.wait_until(|session| !session.phase.is_busy()).await
    }
}
