use std::sync::mpsc::Sender;

use uuid::Uuid;

use thiserror::Error;

use crate::archive::ArchiveError;
use crate::playback::Track;

/// What the audio engine is actually doing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AudioStatus {
    #[default]
    Idle,
    Playing,
    Paused,
    Stopped,
}

/// Failures raised by an audio engine. These never come back from a port
/// call; they arrive later as [`AudioSignal::Error`].
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("missing archive metadata for playback of {0:?}")]
    MissingArchiveLink(String),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("audio device error: {0}")]
    Device(String),

    #[error("decode error: {0}")]
    Decode(String),
}

/// Asynchronous reports from an audio engine.
#[derive(Debug)]
pub enum AudioSignal {
    /// Periodic playhead sample, in seconds.
    Position(f64),
    /// The track with this id played to its natural end.
    Finished(Uuid),
    /// Something went wrong; the engine has given up on the current track.
    Error(AudioError),
}

/// Channel an engine reports [`AudioSignal`]s on.
pub type SignalSender = Sender<AudioSignal>;

/// The audio engine as seen by the use cases.
///
/// Calls must return promptly; decoding and device work belong on the
/// engine's own thread. Contract:
/// - `play` on the identical track that is already playing does nothing,
///   on the identical paused track resumes in place, and on any other track
///   starts from 0.
/// - `pause`, `stop` and `seek` do nothing when not applicable.
pub trait AudioPlayerPort {
    fn status(&self) -> AudioStatus;
    fn play(&mut self, track: &Track);
    fn pause(&mut self);
    fn stop(&mut self);
    fn seek(&mut self, position: f64);
    fn set_volume(&mut self, level: f32);
}

impl<P: AudioPlayerPort + ?Sized> AudioPlayerPort for Box<P> {
    fn status(&self) -> AudioStatus {
        (**self).status()
    }

    fn play(&mut self, track: &Track) {
        (**self).play(track)
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn seek(&mut self, position: f64) {
        (**self).seek(position)
    }

    fn set_volume(&mut self, level: f32) {
        (**self).set_volume(level)
    }
}
