//! UI layer: app shell and the rod painter.

pub mod app;
pub mod rods;

pub use app::{HanoiApp, StartupConfig};
