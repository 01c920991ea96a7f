use super::files::{atomic_write, read_file};
use crate::domain::Settings;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pomodoro state kept across restarts when `persist_pomodoro` is enabled.
/// The countdown itself always starts fresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroSnapshot {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub completed_work_sessions: u32,
}

/// Load the snapshot from pomodoro.json. A missing or empty file is a fresh start.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<PomodoroSnapshot> {
    let content = read_file(path)?;
    if content.trim().is_empty() {
        return Ok(PomodoroSnapshot::default());
    }

    let snapshot: PomodoroSnapshot = serde_json::from_str(&content)?;
    Ok(snapshot)
}

/// Save the snapshot to pomodoro.json
pub fn save_snapshot<P: AsRef<Path>>(path: P, snapshot: &PomodoroSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    atomic_write(path, &json)?;
    Ok(())
}
