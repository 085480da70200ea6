/*
[INPUT]:  Public API exports for greenspin-session crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod controller;
pub mod state;
pub mod state_machine;

// Re-export main types for convenience
pub use config::GreenSpinConfig;
pub use controller::{ControllerConfig, SessionController, SessionError};
pub use state::{AssignedTask, FailureKind, Phase, SessionFailure, TaskSession};
