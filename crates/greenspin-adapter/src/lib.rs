/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public GreenSpin task service client surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod service;
pub mod types;

// Re-export commonly used types from http
pub use http::{ClientConfig, DEFAULT_BASE_URL, GreenSpinClient, GreenSpinError, Result};

pub use service::{TaskRequestFailed, TaskService, ValidationSubmitFailed};

// Re-export all types
pub use types::*;
