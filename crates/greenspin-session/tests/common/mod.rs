/*
[INPUT]:  Scripted responses and latencies per test
[OUTPUT]: In-memory TaskService fake and session fixtures
[POS]:    Test infrastructure - shared across controller test modules
[UPDATE]: When the TaskService trait changes
*/

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use greenspin_adapter::{
    PhotoAttachment, TaskPayload, TaskRequestFailed, TaskService, ValidationSubmitFailed,
};

type Scripted<T> = Mutex<VecDeque<(Duration, T)>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSubmission {
    pub description: Option<String>,
    pub proof_text: String,
    pub photo_name: Option<String>,
}

/// TaskService fake answering from queues after a tokio-timed latency
#[derive(Default)]
pub struct ScriptedService {
    tasks: Scripted<Result<TaskPayload, TaskRequestFailed>>,
    verdicts: Scripted<Result<String, ValidationSubmitFailed>>,
    task_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    submissions: Mutex<Vec<RecordedSubmission>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_task(self, latency: Duration, payload: TaskPayload) -> Self {
        self.tasks.lock().unwrap().push_back((latency, Ok(payload)));
        self
    }

    pub fn with_task_failure(self, latency: Duration, reason: &str) -> Self {
        self.tasks.lock().unwrap().push_back((
            latency,
            Err(TaskRequestFailed {
                reason: reason.to_string(),
            }),
        ));
        self
    }

    pub fn with_verdict(self, latency: Duration, verdict: &str) -> Self {
        self.verdicts
            .lock()
            .unwrap()
            .push_back((latency, Ok(verdict.to_string())));
        self
    }

    pub fn with_verdict_failure(self, latency: Duration, reason: &str) -> Self {
        self.verdicts.lock().unwrap().push_back((
            latency,
            Err(ValidationSubmitFailed {
                reason: reason.to_string(),
            }),
        ));
        self
    }

    pub fn task_calls(&self) -> usize {
        self.task_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> Vec<RecordedSubmission> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskService for ScriptedService {
    async fn request_new_task(&self) -> Result<TaskPayload, TaskRequestFailed> {
        self.task_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.tasks.lock().unwrap().pop_front();
        match next {
            Some((latency, outcome)) => {
                tokio::time::sleep(latency).await;
                outcome
            }
            None => Err(TaskRequestFailed {
                reason: "no scripted task".to_string(),
            }),
        }
    }

    async fn submit_proof(
        &self,
        description: Option<&str>,
        proof_text: &str,
        photo: Option<&PhotoAttachment>,
    ) -> Result<String, ValidationSubmitFailed> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submissions.lock().unwrap().push(RecordedSubmission {
            description: description.map(str::to_owned),
            proof_text: proof_text.to_string(),
            photo_name: photo.map(|photo| photo.file_name.clone()),
        });
        let next = self.verdicts.lock().unwrap().pop_front();
        match next {
            Some((latency, outcome)) => {
                tokio::time::sleep(latency).await;
                outcome
            }
            None => Err(ValidationSubmitFailed {
                reason: "no scripted verdict".to_string(),
            }),
        }
    }
}

pub fn payload(desc: &str, task: &str, points: u32, value: &str) -> TaskPayload {
    TaskPayload {
        desc: desc.to_string(),
        task: task.to_string(),
        points,
        value: value.to_string(),
    }
}

pub fn plant_a_tree() -> TaskPayload {
    payload("Plant a tree", "Reduces CO2", 50, "€5")
}

pub fn sample_photo() -> PhotoAttachment {
    PhotoAttachment::from_bytes("proof.jpg", b"JPEGBYTES".to_vec())
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
