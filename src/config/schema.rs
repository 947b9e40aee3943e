use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/playtr/config.toml` or `~/.config/playtr/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PLAYTR__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub archive: ArchiveSettings,
    pub audio: AudioSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ArchiveSettings {
    /// Root of the read-only bundled archive (the folder holding `cartridges/`).
    /// Unset means no bundled archive is available.
    pub bundled_root: Option<PathBuf>,
    /// Root of the writable local archive.
    /// Unset means `<platform data dir>/PlaytArchive`.
    pub local_root: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume applied at startup, 0.0 to 1.0.
    pub initial_volume: f32,
    /// How often the engine reports the playhead (milliseconds).
    pub position_interval_ms: u64,
    /// How often the engine checks for end of track (milliseconds).
    pub poll_interval_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            position_interval_ms: 500,
            poll_interval_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` wins when set.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
