use crate::persistence::{atomic_write, read_file};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Application configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Keep pomodoro settings and the session counter across restarts
    pub persist_pomodoro: bool,
    /// Send a desktop notification when a countdown finishes
    pub desktop_notifications: bool,
    /// Ring the terminal bell when a countdown finishes
    pub terminal_bell: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            persist_pomodoro: false,
            desktop_notifications: true,
            terminal_bell: true,
        }
    }
}

impl AppConfig {
    /// Load config.json. Missing or malformed files yield the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let content = match read_file(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(error = %e, "Could not read config, using defaults");
                return Self::default();
            }
        };

        if content.trim().is_empty() {
            return Self::default();
        }

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Malformed config, using defaults");
            Self::default()
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        atomic_write(path, &json)
    }
}
