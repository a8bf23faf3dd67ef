//! Bridge between the egui thread and the playback controller's runtime.

pub mod commands;
pub mod runtime;
