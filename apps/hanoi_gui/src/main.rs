mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use hanoi_core::config::load_settings;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{HanoiApp, StartupConfig};

#[derive(Parser, Debug)]
struct Args {
    /// Initial value of the disk-count field.
    #[arg(long)]
    disks: Option<u8>,
    /// Initial slider position in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let settings = load_settings();
    let startup = StartupConfig {
        disk_count: args.disks.unwrap_or(settings.disk_count),
        pacing_ms: args.delay_ms.unwrap_or(settings.move_delay_ms),
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Tower of Hanoi")
            .with_inner_size([900.0, 520.0])
            .with_min_inner_size([640.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Tower of Hanoi",
        options,
        Box::new(|_cc| Ok(Box::new(HanoiApp::new(cmd_tx, ui_rx, startup)))),
    )
}
