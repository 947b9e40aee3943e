use crate::playback::Track;

use super::audio::AudioError;

/// Listener for observable playback events.
///
/// Every method defaults to doing nothing, so implementors only override
/// what they display.
pub trait PlaybackEventSink {
    fn queue_loaded(&mut self, _tracks: &[Track]) {}
    fn track_started(&mut self, _track: &Track) {}
    fn track_paused(&mut self, _track: &Track) {}
    fn track_stopped(&mut self, _track: &Track) {}
    fn queue_did_end(&mut self) {}
    fn position_changed(&mut self, _position: f64) {}
    fn volume_changed(&mut self, _level: f32) {}

    /// A playhead sample reported by the audio engine.
    fn position_reported(&mut self, _position: f64) {}
    /// The audio engine failed; the message is meant for the user.
    fn playback_failed(&mut self, _error: &AudioError) {}
}

/// Sink that ignores everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullEventSink;

impl PlaybackEventSink for NullEventSink {}
