/*
[INPUT]:  Task service schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for task service communication
[UPDATE]: When the service schema changes or new types are added
*/

pub mod requests;
pub mod responses;

pub use requests::*;
pub use responses::*;
