use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Catalog and storage failures. Each one is distinct so callers can tell a
/// broken catalog from a rejected path.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("bundled archive is missing")]
    MissingBundledArchive,

    #[error("local archive root could not be located or created")]
    MissingLocalArchiveRoot,

    #[error("invalid cartridge id: {0:?}")]
    InvalidCartridgeId(String),

    #[error("cartridge {0:?} not found")]
    MissingCartridge(String),

    #[error("missing playt.json at {}", .0.display())]
    MissingCatalog(PathBuf),

    #[error("malformed playt.json at {}: {source}", .path.display())]
    MalformedCatalog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid media path: {0:?}")]
    InvalidRelativePath(String),

    #[error("missing media file at {}", .0.display())]
    MissingMedia(PathBuf),

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArchiveError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
