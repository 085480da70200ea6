/*
[INPUT]:  GreenSpinClient (or any substitute implementing TaskService)
[OUTPUT]: Narrow task service capability with collapsed failure conditions
[POS]:    Service seam - the only surface the session controller depends on
[UPDATE]: When the controller needs a new remote capability
*/

use async_trait::async_trait;
use thiserror::Error;

use crate::http::{GreenSpinClient, GreenSpinError};
use crate::types::{PhotoAttachment, ProofSubmission, TaskPayload};

/// The new-task request failed or returned malformed data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("task request failed: {reason}")]
pub struct TaskRequestFailed {
    pub reason: String,
}

/// The proof submission failed or returned malformed data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation submit failed: {reason}")]
pub struct ValidationSubmitFailed {
    pub reason: String,
}

impl From<GreenSpinError> for TaskRequestFailed {
    fn from(err: GreenSpinError) -> Self {
        Self {
            reason: err.to_string(),
        }
    }
}

impl From<GreenSpinError> for ValidationSubmitFailed {
    fn from(err: GreenSpinError) -> Self {
        Self {
            reason: err.to_string(),
        }
    }
}

/// Remote task generation and validation capability
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Fetch a new randomized task
    async fn request_new_task(&self) -> Result<TaskPayload, TaskRequestFailed>;

    /// Submit proof for the given task description and return the verdict
    async fn submit_proof(
        &self,
        description: Option<&str>,
        proof_text: &str,
        photo: Option<&PhotoAttachment>,
    ) -> Result<String, ValidationSubmitFailed>;
}

#[async_trait]
impl TaskService for GreenSpinClient {
    async fn request_new_task(&self) -> Result<TaskPayload, TaskRequestFailed> {
        self.create_task().await.map_err(|err| {
            tracing::warn!(
                error = %err,
                malformed = err.is_malformed_response(),
                "create-task request failed"
            );
            TaskRequestFailed::from(err)
        })
    }

    async fn submit_proof(
        &self,
        description: Option<&str>,
        proof_text: &str,
        photo: Option<&PhotoAttachment>,
    ) -> Result<String, ValidationSubmitFailed> {
        let submission = ProofSubmission::new(description, proof_text, photo.cloned());
        self.validate_task(submission)
            .await
            .map(|response| response.result)
            .map_err(|err| {
                tracing::warn!(
                    error = %err,
                    malformed = err.is_malformed_response(),
                    "validate-task request failed"
                );
                ValidationSubmitFailed::from(err)
            })
    }
}
