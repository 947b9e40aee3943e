use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::ArchiveSettings;

use super::error::{ArchiveError, Result};

/// Which archive root a cartridge lives under.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArchiveSource {
    /// Shipped with the application. Never written to.
    Bundled,
    /// Per-user, writable. Cartridges get installed here.
    Local,
}

impl ArchiveSource {
    pub const ALL: [ArchiveSource; 2] = [ArchiveSource::Bundled, ArchiveSource::Local];

    /// Stable machine-readable name.
    pub fn key(self) -> &'static str {
        match self {
            Self::Bundled => "bundled",
            Self::Local => "local",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Bundled => "Bundled (Test)",
            Self::Local => "Local (On Device)",
        }
    }
}

impl fmt::Display for ArchiveSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ArchiveSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bundled" | "b" => Ok(Self::Bundled),
            "local" | "l" => Ok(Self::Local),
            other => Err(format!("unknown archive source {other:?} (expected bundled or local)")),
        }
    }
}

/// Locates archive roots. Injected into [`ArchiveLibrary`](super::ArchiveLibrary)
/// so tests can point it at temporary directories.
pub trait ArchiveRoots {
    fn root(&self, source: ArchiveSource) -> Result<PathBuf>;
}

/// Name of the archive folder under the platform data directory.
pub const LOCAL_ARCHIVE_DIR: &str = "PlaytArchive";

/// Roots taken from configuration, with a platform default for the local one.
#[derive(Clone, Debug, Default)]
pub struct ConfiguredRoots {
    pub bundled: Option<PathBuf>,
    pub local: Option<PathBuf>,
}

impl ConfiguredRoots {
    pub fn new(bundled: Option<PathBuf>, local: Option<PathBuf>) -> Self {
        Self { bundled, local }
    }

    pub fn from_settings(settings: &ArchiveSettings) -> Self {
        Self::new(settings.bundled_root.clone(), settings.local_root.clone())
    }
}

impl ArchiveRoots for ConfiguredRoots {
    fn root(&self, source: ArchiveSource) -> Result<PathBuf> {
        match source {
            ArchiveSource::Bundled => match &self.bundled {
                Some(p) if p.is_dir() => Ok(p.clone()),
                _ => Err(ArchiveError::MissingBundledArchive),
            },
            ArchiveSource::Local => {
                let root = self
                    .local
                    .clone()
                    .or_else(|| dirs::data_dir().map(|d| d.join(LOCAL_ARCHIVE_DIR)))
                    .ok_or(ArchiveError::MissingLocalArchiveRoot)?;
                fs::create_dir_all(&root).map_err(|e| ArchiveError::io(&root, e))?;
                Ok(root)
            }
        }
    }
}
