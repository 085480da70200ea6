/*
[INPUT]:  Parsed subcommands, SessionController, loaded configuration
[OUTPUT]: Terminal flows for the greenspin binary
[POS]:    CLI layer - module wiring
[UPDATE]: When adding subcommands
*/

pub mod commands;
pub mod init;
pub mod interactive;
pub mod render;
