use std::{fs, path::Path};

use serde::Deserialize;
use tracing::warn;

use crate::{
    pacing::{validate_pacing, DEFAULT_PACING_MS},
    rod_state::SUPPORTED_DISK_COUNTS,
};

pub const SETTINGS_FILE: &str = "hanoi.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub disk_count: u8,
    pub move_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            disk_count: *SUPPORTED_DISK_COUNTS.start(),
            move_delay_ms: DEFAULT_PACING_MS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    disk_count: Option<u8>,
    move_delay_ms: Option<u64>,
}

/// Defaults, then `hanoi.toml` in the working directory, then environment.
pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.disk_count {
                    settings.set_disk_count(v, "settings file");
                }
                if let Some(v) = file_cfg.move_delay_ms {
                    settings.set_move_delay_ms(v, "settings file");
                }
            }
            Err(err) => warn!(path = %path.display(), "ignoring malformed settings file: {err}"),
        }
    }

    for name in ["HANOI_DISK_COUNT", "APP__DISK_COUNT"] {
        if let Some(v) = env(name) {
            match v.trim().parse::<u8>() {
                Ok(parsed) => settings.set_disk_count(parsed, name),
                Err(_) => warn!(variable = name, value = %v, "ignoring non-numeric disk count"),
            }
        }
    }
    for name in ["HANOI_MOVE_DELAY_MS", "APP__MOVE_DELAY_MS"] {
        if let Some(v) = env(name) {
            match v.trim().parse::<u64>() {
                Ok(parsed) => settings.set_move_delay_ms(parsed, name),
                Err(_) => warn!(variable = name, value = %v, "ignoring non-numeric move delay"),
            }
        }
    }

    settings
}

impl Settings {
    fn set_disk_count(&mut self, disk_count: u8, source: &str) {
        if SUPPORTED_DISK_COUNTS.contains(&disk_count) {
            self.disk_count = disk_count;
        } else {
            warn!(source, disk_count, "ignoring unsupported disk count");
        }
    }

    fn set_move_delay_ms(&mut self, move_delay_ms: u64, source: &str) {
        if validate_pacing(move_delay_ms).is_ok() {
            self.move_delay_ms = move_delay_ms;
        } else {
            warn!(source, move_delay_ms, "ignoring unsupported move delay");
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
