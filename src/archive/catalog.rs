use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::playback::{ArchiveLink, Track};

use super::source::ArchiveSource;

/// One entry of a cartridge's track list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartridgeTrack {
    pub number: u32,
    pub title: String,
    /// Relative to the cartridge directory. Untrusted.
    pub path: String,
}

impl CartridgeTrack {
    pub fn id(&self) -> String {
        format!("{}-{}", self.number, self.title)
    }
}

/// On-disk shape of `playt.json`.
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogFile {
    pub cartridge_id: String,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub year: Option<i32>,
    pub tracks: Vec<CartridgeTrack>,
}

/// A cartridge's catalog, tagged with the root it was read from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cartridge {
    pub cartridge_id: String,
    pub title: String,
    pub artist: String,
    pub year: Option<i32>,
    pub tracks: Vec<CartridgeTrack>,
    pub source: ArchiveSource,
}

impl Cartridge {
    pub(crate) fn from_catalog(file: CatalogFile, source: ArchiveSource) -> Self {
        Self {
            cartridge_id: file.cartridge_id,
            title: file.title,
            artist: file.artist,
            year: file.year,
            tracks: file.tracks,
            source,
        }
    }

    pub fn subtitle(&self) -> String {
        match self.year {
            Some(year) => format!("{} • {}", self.artist, year),
            None => self.artist.clone(),
        }
    }

    /// Playable tracks for this cartridge, in catalog order.
    ///
    /// Durations are unknown until the audio engine opens the file, so they
    /// start at zero.
    pub fn queue_tracks(&self) -> Vec<Track> {
        self.tracks
            .iter()
            .map(|t| {
                Track::from_archive(
                    t.title.clone(),
                    self.artist.clone(),
                    self.title.clone(),
                    Duration::ZERO,
                    ArchiveLink {
                        cartridge_id: self.cartridge_id.clone(),
                        source: self.source,
                        relative_path: t.path.clone(),
                        track_number: t.number,
                    },
                )
            })
            .collect()
    }
}
