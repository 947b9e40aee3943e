use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::playback::Track;

use super::catalog::{Cartridge, CatalogFile};
use super::error::{ArchiveError, Result};
use super::paths::{canonicalize_existing_prefix, is_valid_cartridge_id, sanitize_relative};
use super::source::{ArchiveRoots, ArchiveSource, ConfiguredRoots};
use super::{CARTRIDGES_DIR, CATALOG_FILE};

/// Cartridge lookup, loading and installation over a pair of archive roots.
///
/// Construct one per process (or per test) with whatever [`ArchiveRoots`]
/// fits; there is no global instance.
#[derive(Clone, Debug)]
pub struct ArchiveLibrary<R = ConfiguredRoots> {
    roots: R,
}

impl<R: ArchiveRoots> ArchiveLibrary<R> {
    pub fn new(roots: R) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &R {
        &self.roots
    }

    pub fn archive_root(&self, source: ArchiveSource) -> Result<PathBuf> {
        self.roots.root(source)
    }

    /// `<root>/cartridges`, created on demand for the local archive.
    pub fn cartridges_dir(&self, source: ArchiveSource) -> Result<PathBuf> {
        let dir = self.archive_root(source)?.join(CARTRIDGES_DIR);
        if source == ArchiveSource::Local {
            fs::create_dir_all(&dir).map_err(|e| ArchiveError::io(&dir, e))?;
        }
        Ok(dir)
    }

    pub fn cartridge_dir(&self, source: ArchiveSource, cartridge_id: &str) -> Result<PathBuf> {
        if !is_valid_cartridge_id(cartridge_id) {
            warn!(%source, cartridge_id, "rejected cartridge id");
            return Err(ArchiveError::InvalidCartridgeId(cartridge_id.to_string()));
        }
        Ok(self.cartridges_dir(source)?.join(cartridge_id))
    }

    pub fn catalog_path(&self, source: ArchiveSource, cartridge_id: &str) -> Result<PathBuf> {
        Ok(self.cartridge_dir(source, cartridge_id)?.join(CATALOG_FILE))
    }

    /// Cartridge ids under `source`, sorted. Plain files and hidden entries
    /// are skipped.
    pub fn list_cartridge_ids(&self, source: ArchiveSource) -> Result<Vec<String>> {
        let dir = self.cartridges_dir(source)?;
        let entries = fs::read_dir(&dir).map_err(|e| ArchiveError::io(&dir, e))?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ArchiveError::io(&dir, e))?;
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false)
                || entry.path().is_dir();
            if !is_dir {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            ids.push(name);
        }
        ids.sort();
        Ok(ids)
    }

    /// Resolve a catalog media path to an existing file inside the cartridge.
    ///
    /// The path is first checked syntactically, then both the cartridge
    /// directory and the candidate are canonicalized and the candidate must
    /// stay under the directory. Only after that is existence checked, so a
    /// missing file yields [`ArchiveError::MissingMedia`] and never the
    /// invalid-path error.
    pub fn resolve_media_path(
        &self,
        source: ArchiveSource,
        cartridge_id: &str,
        relative_path: &str,
    ) -> Result<PathBuf> {
        let Some(relative) = sanitize_relative(relative_path) else {
            warn!(%source, cartridge_id, relative_path, "rejected media path");
            return Err(ArchiveError::InvalidRelativePath(relative_path.to_string()));
        };

        let base = self.cartridge_dir(source, cartridge_id)?;
        let candidate = base.join(&relative);

        let canonical_base =
            canonicalize_existing_prefix(&base).map_err(|e| ArchiveError::io(&base, e))?;
        let canonical_media = canonicalize_existing_prefix(&candidate)
            .map_err(|e| ArchiveError::io(&candidate, e))?;

        if !canonical_media.starts_with(&canonical_base) {
            warn!(
                %source,
                cartridge_id,
                relative_path,
                resolved = %canonical_media.display(),
                "media path escapes cartridge directory"
            );
            return Err(ArchiveError::InvalidRelativePath(relative_path.to_string()));
        }

        if !canonical_media.is_file() {
            return Err(ArchiveError::MissingMedia(canonical_media));
        }

        debug!(resolved = %canonical_media.display(), "resolved media path");
        Ok(canonical_media)
    }

    pub fn load_cartridge(&self, source: ArchiveSource, cartridge_id: &str) -> Result<Cartridge> {
        let path = self.catalog_path(source, cartridge_id)?;
        if !path.is_file() {
            return Err(ArchiveError::MissingCatalog(path));
        }

        let raw = fs::read_to_string(&path).map_err(|e| ArchiveError::io(&path, e))?;
        let file: CatalogFile =
            serde_json::from_str(&raw).map_err(|err| ArchiveError::MalformedCatalog {
                path: path.clone(),
                source: err,
            })?;

        debug!(%source, cartridge_id, tracks = file.tracks.len(), "loaded cartridge");
        Ok(Cartridge::from_catalog(file, source))
    }

    /// Load a cartridge and turn it straight into queue tracks.
    pub fn load_queue_tracks(
        &self,
        source: ArchiveSource,
        cartridge_id: &str,
    ) -> Result<Vec<Track>> {
        Ok(self.load_cartridge(source, cartridge_id)?.queue_tracks())
    }

    /// Copy a bundled cartridge into the local archive.
    ///
    /// An existing local cartridge with the same id is removed first, never
    /// merged.
    pub fn install_bundled_to_local(&self, cartridge_id: &str) -> Result<PathBuf> {
        let from = self.cartridge_dir(ArchiveSource::Bundled, cartridge_id)?;
        if !from.is_dir() {
            return Err(ArchiveError::MissingCartridge(cartridge_id.to_string()));
        }
        let to = self.cartridge_dir(ArchiveSource::Local, cartridge_id)?;

        if to.is_dir() {
            fs::remove_dir_all(&to).map_err(|e| ArchiveError::io(&to, e))?;
        } else if to.exists() {
            fs::remove_file(&to).map_err(|e| ArchiveError::io(&to, e))?;
        }

        copy_tree(&from, &to)?;
        info!(cartridge_id, target = %to.display(), "installed cartridge");
        Ok(to)
    }
}

fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    for entry in WalkDir::new(from).follow_links(false) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(from).to_path_buf();
            ArchiveError::io(path, e.into())
        })?;
        let Ok(relative) = entry.path().strip_prefix(from) else {
            continue;
        };
        let target = to.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|e| ArchiveError::io(&target, e))?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target).map_err(|e| ArchiveError::io(&target, e))?;
        } else {
            debug!(path = %entry.path().display(), "skipping non-regular entry");
        }
    }
    Ok(())
}
