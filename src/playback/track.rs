use std::time::Duration;

use uuid::Uuid;

use crate::archive::ArchiveSource;

/// Where a track's media lives inside an archive.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArchiveLink {
    pub cartridge_id: String,
    pub source: ArchiveSource,
    /// Path relative to the cartridge directory, exactly as the catalog wrote it.
    pub relative_path: String,
    pub track_number: u32,
}

/// A playable track. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub id: Uuid,
    pub title: String,
    pub artist: String,
    pub album_title: String,
    pub duration: Duration,
    pub archive: Option<ArchiveLink>,
}

impl Track {
    /// Create a free-standing track with a fresh random id.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        album_title: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            artist: artist.into(),
            album_title: album_title.into(),
            duration,
            archive: None,
        }
    }

    /// Create a track backed by a catalog entry.
    ///
    /// The id is derived from the link, so building the same entry twice gives
    /// two tracks that share an identity.
    pub fn from_archive(
        title: impl Into<String>,
        artist: impl Into<String>,
        album_title: impl Into<String>,
        duration: Duration,
        link: ArchiveLink,
    ) -> Self {
        Self {
            id: archive_track_id(&link),
            title: title.into(),
            artist: artist.into(),
            album_title: album_title.into(),
            duration,
            archive: Some(link),
        }
    }

    /// True when both tracks refer to the same catalog entry, ignoring metadata.
    pub fn same_identity(&self, other: &Track) -> bool {
        self.id == other.id
    }

    /// "artist • album" line used by front ends.
    pub fn byline(&self) -> String {
        format!("{} • {}", self.artist, self.album_title)
    }
}

fn archive_track_id(link: &ArchiveLink) -> Uuid {
    let key = format!(
        "{}/{}/{}/{}",
        link.source.key(),
        link.cartridge_id,
        link.track_number,
        link.relative_path
    );
    Uuid::new_v5(&Uuid::NAMESPACE_URL, key.as_bytes())
}
