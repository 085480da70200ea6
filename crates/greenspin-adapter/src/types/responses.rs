/*
[INPUT]:  Task service response schema and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for task service communication
[UPDATE]: When the service schema changes or new types are added
*/

use serde::{Deserialize, Serialize};

/// Body of `GET /api/create-task`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPayload {
    /// Task summary shown to the user
    pub desc: String,
    /// Environmental-impact explanation
    pub task: String,
    pub points: u32,
    /// Preformatted monetary value, e.g. "Estimated value: €5.00"
    pub value: String,
}

/// Body of `POST /api/validate-task`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub result: String,
}
