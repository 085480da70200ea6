/*
[INPUT]:  Proof submissions (text + optional photo)
[OUTPUT]: New task payloads and validation verdicts
[POS]:    HTTP layer - task generation and validation endpoints
[UPDATE]: When adding endpoints or changing the multipart form layout
*/

use crate::http::{GreenSpinClient, Result};
use crate::types::{ProofSubmission, TaskPayload, ValidationResponse};
use reqwest::Method;
use reqwest::multipart::{Form, Part};

pub(crate) const CREATE_TASK_ENDPOINT: &str = "/api/create-task";
pub(crate) const VALIDATE_TASK_ENDPOINT: &str = "/api/validate-task";

impl GreenSpinClient {
    /// Request a freshly generated task
    ///
    /// GET /api/create-task
    pub async fn create_task(&self) -> Result<TaskPayload> {
        let builder = self.request(Method::GET, CREATE_TASK_ENDPOINT)?;
        let payload: TaskPayload = self.send_json(builder).await?;
        tracing::debug!(points = payload.points, "task payload received");
        Ok(payload)
    }

    /// Submit proof of completion for validation
    ///
    /// POST /api/validate-task (multipart: task, proof, photo?)
    pub async fn validate_task(&self, submission: ProofSubmission) -> Result<ValidationResponse> {
        let form = build_form(submission)?;
        let builder = self.request(Method::POST, VALIDATE_TASK_ENDPOINT)?;
        self.send_json(builder.multipart(form)).await
    }
}

fn build_form(submission: ProofSubmission) -> Result<Form> {
    let ProofSubmission { task, proof, photo } = submission;
    let mut form = Form::new().text("task", task).text("proof", proof);

    if let Some(photo) = photo {
        let part = Part::bytes(photo.bytes)
            .file_name(photo.file_name)
            .mime_str(&photo.content_type)?;
        form = form.part("photo", part);
    }

    Ok(form)
}
