use std::sync::Arc;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use clap::{Parser, ValueEnum};
use hanoi_core::{config::load_settings, PlaybackController, RodState, SessionObserver};
use shared::{domain::SessionState, protocol::SessionEvent};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Plays back the Tower of Hanoi solution in the terminal.
#[derive(Parser, Debug)]
struct Args {
    /// Number of disks (4-10). Defaults to the configured value.
    #[arg(long, short = 'n')]
    disks: Option<u8>,
    /// Delay between moves in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Stop playback after this many moves.
    #[arg(long)]
    cancel_after: Option<u64>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Redraw the rods after every move (text format only).
    #[arg(long)]
    draw: bool,
}

struct TerminalObserver {
    format: OutputFormat,
    draw: bool,
    mirror: Mutex<RodState>,
}

impl TerminalObserver {
    fn new(format: OutputFormat, draw: bool) -> Self {
        Self {
            format,
            draw,
            mirror: Mutex::new(RodState::new()),
        }
    }

    async fn print_text(&self, event: &SessionEvent) {
        match event {
            SessionEvent::SessionStarted {
                disk_count,
                pacing_ms,
                ..
            } => {
                println!("Solving {disk_count} disks, {pacing_ms} ms per move");
                let mut mirror = self.mirror.lock().await;
                if mirror.reset(*disk_count).is_ok() && self.draw {
                    print!("{}", render::draw_rods(&mirror.snapshot(), *disk_count));
                }
            }
            SessionEvent::MoveApplied { applied, .. } => {
                println!(
                    "move {}/{}: disk {} {}",
                    applied.move_number,
                    applied.total_moves,
                    applied.disk_rank,
                    applied.as_move()
                );
                if self.draw {
                    let mut mirror = self.mirror.lock().await;
                    if mirror.apply_move(applied.from, applied.to).is_ok() {
                        print!(
                            "{}",
                            render::draw_rods(&mirror.snapshot(), mirror.disk_count())
                        );
                    }
                }
            }
            SessionEvent::SessionEnded { reason, .. } => println!("Session ended: {reason:?}"),
            SessionEvent::SessionFaulted { detail, .. } => println!("Session faulted: {detail}"),
        }
    }
}

#[async_trait]
impl SessionObserver for TerminalObserver {
    async fn on_event(&self, event: SessionEvent) {
        match self.format {
            OutputFormat::Text => self.print_text(&event).await,
            OutputFormat::Json => match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(err) => tracing::warn!("failed to encode event: {err}"),
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    let settings = load_settings();

    let disk_count = args.disks.unwrap_or(settings.disk_count);
    let delay_ms = args.delay_ms.unwrap_or(settings.move_delay_ms);

    let observer = Arc::new(TerminalObserver::new(args.format, args.draw));
    let controller = PlaybackController::new_with_observer(observer);
    let mut events = controller.subscribe_events();

    let handle = controller
        .start(disk_count, delay_ms)
        .await
        .with_context(|| format!("failed to start playback for {disk_count} disks"))?;

    {
        let handle = handle.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received; stopping after the current move");
                handle.cancel();
            }
        });
    }

    if let Some(limit) = args.cancel_after {
        let handle = handle.clone();
        tokio::spawn(async move {
            while let Ok(event) = events.recv().await {
                if let SessionEvent::MoveApplied { applied, .. } = event {
                    if applied.move_number >= limit {
                        handle.cancel();
                        break;
                    }
                }
            }
        });
    }

    match handle.finished().await {
        SessionState::Faulted => bail!("playback aborted: rod bookkeeping defect"),
        state => tracing::debug!(?state, "playback finished"),
    }

    Ok(())
}
