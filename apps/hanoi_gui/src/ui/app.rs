use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use hanoi_core::SUPPORTED_DISK_COUNTS;
use shared::domain::SessionState;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::PlaybackView;
use crate::ui::rods::paint_rods;

pub const SLIDER_RANGE_MS: std::ops::RangeInclusive<u64> = 50..=2000;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub disk_count: u8,
    pub pacing_ms: u64,
}

pub struct HanoiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    disk_input: String,
    pacing_ms: u64,
    view: PlaybackView,
    status: String,
    status_banner: Option<UiError>,
}

/// Parses the disk-count field; only 4 to 10 disks are playable.
pub fn parse_disk_count(raw: &str) -> Option<u8> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|count| SUPPORTED_DISK_COUNTS.contains(count))
}

impl HanoiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            disk_input: startup.disk_count.to_string(),
            pacing_ms: startup
                .pacing_ms
                .clamp(*SLIDER_RANGE_MS.start(), *SLIDER_RANGE_MS.end()),
            view: PlaybackView::default(),
            status: "Starting playback worker...".to_string(),
            status_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    tracing::warn!(context = ?err.context(), "{}", err.message());
                    self.status_banner = Some(err);
                }
                UiEvent::Session(event) => {
                    if let Err(desync) = self.view.apply(&event) {
                        self.status_banner = Some(UiError::from_message(
                            UiErrorContext::Playback,
                            desync,
                        ));
                    }
                    self.status = self.describe_view();
                }
            }
        }
    }

    fn describe_view(&self) -> String {
        let (done, total) = self.view.progress();
        match self.view.state() {
            SessionState::Idle => "Ready".to_string(),
            SessionState::Running => match self.view.last_move() {
                Some(applied) => format!(
                    "Move {done}/{total}: disk {} {}",
                    applied.disk_rank,
                    applied.as_move()
                ),
                None => format!("Solving {} disks", self.view.disk_count()),
            },
            SessionState::Completed => format!("Solved in {total} moves"),
            SessionState::Cancelled => format!("Stopped after {done} of {total} moves"),
            SessionState::Faulted => "Playback aborted".to_string(),
        }
    }

    fn start_playback(&mut self) {
        let Some(disk_count) = parse_disk_count(&self.disk_input) else {
            self.status_banner = Some(UiError::from_message(
                UiErrorContext::StartPlayback,
                format!(
                    "Please enter a valid number of disks ({}-{}).",
                    SUPPORTED_DISK_COUNTS.start(),
                    SUPPORTED_DISK_COUNTS.end()
                ),
            ));
            return;
        };
        self.status_banner = None;
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Start {
                disk_count,
                pacing_ms: self.pacing_ms,
            },
            &mut self.status,
        );
    }

    fn show_controls(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("playback_controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "Disks ({}-{}):",
                    SUPPORTED_DISK_COUNTS.start(),
                    SUPPORTED_DISK_COUNTS.end()
                ));
                let edit = ui.add(egui::TextEdit::singleline(&mut self.disk_input).desired_width(40.0));
                let submitted =
                    edit.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));

                if ui.button("Start").clicked() || submitted {
                    self.start_playback();
                }
                if ui
                    .add_enabled(self.view.is_running(), egui::Button::new("Stop"))
                    .clicked()
                {
                    dispatch_backend_command(&self.cmd_tx, BackendCommand::Stop, &mut self.status);
                }

                ui.separator();
                let slider = ui.add(
                    egui::Slider::new(&mut self.pacing_ms, SLIDER_RANGE_MS)
                        .show_value(false)
                        .step_by(10.0),
                );
                if slider.changed() {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::SetPacing {
                            pacing_ms: self.pacing_ms,
                        },
                        &mut self.status,
                    );
                }
                ui.label(format!("Speed: {} ms", self.pacing_ms));
            });
        });
    }

    fn show_status(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("playback_status").show(ctx, |ui| {
            if let Some(banner) = &self.status_banner {
                let mut dismissed = false;
                egui::Frame::NONE
                    .fill(egui::Color32::from_rgb(111, 53, 53))
                    .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
                    .corner_radius(egui::CornerRadius::same(4))
                    .inner_margin(egui::Margin::symmetric(10, 8))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(format!("{}: {}", banner.label(), banner.message()))
                                    .color(egui::Color32::WHITE),
                            );
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                dismissed = ui.button("Dismiss").clicked();
                            });
                        });
                    });
                if dismissed {
                    self.status_banner = None;
                }
            }

            let (done, total) = self.view.progress();
            ui.horizontal(|ui| {
                ui.label(&self.status);
                if total > 0 {
                    ui.add(
                        egui::ProgressBar::new(done as f32 / total as f32)
                            .desired_width(200.0)
                            .show_percentage(),
                    );
                }
            });
        });
    }
}

impl eframe::App for HanoiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_controls(ctx);
        self.show_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            paint_rods(ui, &self.view.rods(), self.view.disk_count());
        });

        if self.view.is_running() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl Drop for HanoiApp {
    fn drop(&mut self) {
        let mut status = String::new();
        dispatch_backend_command(&self.cmd_tx, BackendCommand::Shutdown, &mut status);
    }
}

#[cfg(test)]
mod tests {
    use super::parse_disk_count;

    #[test]
    fn accepts_only_supported_disk_counts() {
        assert_eq!(parse_disk_count("4"), Some(4));
        assert_eq!(parse_disk_count(" 10 "), Some(10));
        assert_eq!(parse_disk_count("3"), None);
        assert_eq!(parse_disk_count("11"), None);
        assert_eq!(parse_disk_count("-5"), None);
        assert_eq!(parse_disk_count("four"), None);
        assert_eq!(parse_disk_count(""), None);
    }
}
