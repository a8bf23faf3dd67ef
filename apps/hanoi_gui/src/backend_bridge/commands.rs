//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    Start { disk_count: u8, pacing_ms: u64 },
    Stop,
    SetPacing { pacing_ms: u64 },
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Start { .. } => "start",
            BackendCommand::Stop => "stop",
            BackendCommand::SetPacing { .. } => "set_pacing",
            BackendCommand::Shutdown => "shutdown",
        }
    }
}
