//! Audio engines implementing [`AudioPlayerPort`](crate::ports::AudioPlayerPort).
//!
//! [`StubAudioPlayer`] is always available and makes no sound. With the
//! `output` feature, [`LocalAudioPlayer`] plays through the default output
//! device using rodio.

use std::path::PathBuf;
use std::time::Duration;

use crate::archive::{ArchiveLibrary, ArchiveRoots};
use crate::playback::Track;
use crate::ports::AudioError;

mod stub;

#[cfg(feature = "output")]
mod output;

pub use stub::*;

#[cfg(feature = "output")]
pub use output::LocalAudioPlayer;

/// Finds the media file behind a track.
pub trait MediaLocator {
    fn locate(&self, track: &Track) -> Result<PathBuf, AudioError>;
}

impl<R: ArchiveRoots> MediaLocator for ArchiveLibrary<R> {
    fn locate(&self, track: &Track) -> Result<PathBuf, AudioError> {
        let link = track
            .archive
            .as_ref()
            .ok_or_else(|| AudioError::MissingArchiveLink(track.title.clone()))?;
        Ok(self.resolve_media_path(link.source, &link.cartridge_id, &link.relative_path)?)
    }
}

/// Offset to start decoding from for a seek to `seconds`.
///
/// Negative and NaN positions mean the start of the track. `None` when the
/// position cannot be represented as a `Duration` (infinite or too large).
pub fn seek_offset(seconds: f64) -> Option<Duration> {
    if seconds.is_nan() || seconds <= 0.0 {
        return Some(Duration::ZERO);
    }
    Duration::try_from_secs_f64(seconds).ok()
}
