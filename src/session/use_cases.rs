//! One type per user intent.
//!
//! Use cases carry no state of their own, so building one per call or
//! keeping one around behaves the same. Without `with_events` they report to
//! nobody.

use tracing::debug;

use crate::playback::{NextOutcome, PlaybackStatus, PreviousOutcome, Track};
use crate::ports::{AudioPlayerPort, PlaybackEventSink};

use super::PlaybackSession;

/// Optional event sink; absent means every event is dropped.
struct Events<'a>(Option<&'a mut dyn PlaybackEventSink>);

impl Events<'_> {
    fn emit(&mut self, f: impl FnOnce(&mut dyn PlaybackEventSink)) {
        if let Some(sink) = self.0.as_deref_mut() {
            f(sink);
        }
    }
}

pub struct LoadQueueUseCase<'a> {
    session: &'a mut PlaybackSession,
    events: Events<'a>,
}

impl<'a> LoadQueueUseCase<'a> {
    pub fn new(session: &'a mut PlaybackSession) -> Self {
        Self {
            session,
            events: Events(None),
        }
    }

    pub fn with_events(mut self, events: &'a mut dyn PlaybackEventSink) -> Self {
        self.events = Events(Some(events));
        self
    }

    pub fn execute(&mut self, tracks: Vec<Track>) {
        debug!(tracks = tracks.len(), "loading queue");
        self.session.machine_mut().load_queue(tracks);
        let loaded = self.session.machine().queue().tracks();
        self.events.emit(|e| e.queue_loaded(loaded));
    }
}

pub struct PlayUseCase<'a> {
    session: &'a mut PlaybackSession,
    audio: &'a mut dyn AudioPlayerPort,
    events: Events<'a>,
}

impl<'a> PlayUseCase<'a> {
    pub fn new(session: &'a mut PlaybackSession, audio: &'a mut dyn AudioPlayerPort) -> Self {
        Self {
            session,
            audio,
            events: Events(None),
        }
    }

    pub fn with_events(mut self, events: &'a mut dyn PlaybackEventSink) -> Self {
        self.events = Events(Some(events));
        self
    }

    pub fn execute(&mut self) {
        let was_playing = self.session.machine().state().status == PlaybackStatus::Playing;
        let Some(track) = self.session.machine_mut().play() else {
            debug!("play ignored: nothing to play");
            return;
        };
        if was_playing {
            debug!(track = %track.title, "play ignored: already playing");
            return;
        }
        debug!(track = %track.title, "play");
        self.audio.play(&track);
        self.events.emit(|e| e.track_started(&track));
    }
}

pub struct PauseUseCase<'a> {
    session: &'a mut PlaybackSession,
    audio: &'a mut dyn AudioPlayerPort,
    events: Events<'a>,
}

impl<'a> PauseUseCase<'a> {
    pub fn new(session: &'a mut PlaybackSession, audio: &'a mut dyn AudioPlayerPort) -> Self {
        Self {
            session,
            audio,
            events: Events(None),
        }
    }

    pub fn with_events(mut self, events: &'a mut dyn PlaybackEventSink) -> Self {
        self.events = Events(Some(events));
        self
    }

    pub fn execute(&mut self) {
        let Some(track) = self.session.machine_mut().pause() else {
            debug!("pause ignored: not playing");
            return;
        };
        debug!(track = %track.title, "pause");
        self.audio.pause();
        self.events.emit(|e| e.track_paused(&track));
    }
}

pub struct StopUseCase<'a> {
    session: &'a mut PlaybackSession,
    audio: &'a mut dyn AudioPlayerPort,
    events: Events<'a>,
}

impl<'a> StopUseCase<'a> {
    pub fn new(session: &'a mut PlaybackSession, audio: &'a mut dyn AudioPlayerPort) -> Self {
        Self {
            session,
            audio,
            events: Events(None),
        }
    }

    pub fn with_events(mut self, events: &'a mut dyn PlaybackEventSink) -> Self {
        self.events = Events(Some(events));
        self
    }

    pub fn execute(&mut self) {
        let Some(track) = self.session.machine_mut().stop() else {
            debug!("stop ignored: nothing active");
            return;
        };
        debug!(track = %track.title, "stop");
        self.audio.stop();
        self.events.emit(|e| e.track_stopped(&track));
    }
}

pub struct NextUseCase<'a> {
    session: &'a mut PlaybackSession,
    audio: &'a mut dyn AudioPlayerPort,
    events: Events<'a>,
}

impl<'a> NextUseCase<'a> {
    pub fn new(session: &'a mut PlaybackSession, audio: &'a mut dyn AudioPlayerPort) -> Self {
        Self {
            session,
            audio,
            events: Events(None),
        }
    }

    pub fn with_events(mut self, events: &'a mut dyn PlaybackEventSink) -> Self {
        self.events = Events(Some(events));
        self
    }

    pub fn execute(&mut self) {
        match self.session.machine_mut().next() {
            NextOutcome::Advanced(track) => {
                debug!(track = %track.title, "next");
                self.audio.play(&track);
                self.events.emit(|e| e.track_started(&track));
            }
            NextOutcome::QueueEnded => {
                debug!("queue ended");
                self.audio.stop();
                self.events.emit(|e| e.queue_did_end());
            }
        }
    }
}

pub struct PreviousUseCase<'a> {
    session: &'a mut PlaybackSession,
    audio: &'a mut dyn AudioPlayerPort,
    events: Events<'a>,
}

impl<'a> PreviousUseCase<'a> {
    pub fn new(session: &'a mut PlaybackSession, audio: &'a mut dyn AudioPlayerPort) -> Self {
        Self {
            session,
            audio,
            events: Events(None),
        }
    }

    pub fn with_events(mut self, events: &'a mut dyn PlaybackEventSink) -> Self {
        self.events = Events(Some(events));
        self
    }

    pub fn execute(&mut self) {
        match self.session.machine_mut().previous() {
            PreviousOutcome::Advanced(track) | PreviousOutcome::Restarted(track) => {
                debug!(track = %track.title, "previous");
                self.audio.play(&track);
                self.events.emit(|e| e.track_started(&track));
            }
            PreviousOutcome::NoTrack => debug!("previous ignored: empty queue"),
        }
    }
}

pub struct SeekUseCase<'a> {
    session: &'a mut PlaybackSession,
    audio: &'a mut dyn AudioPlayerPort,
    events: Events<'a>,
}

impl<'a> SeekUseCase<'a> {
    pub fn new(session: &'a mut PlaybackSession, audio: &'a mut dyn AudioPlayerPort) -> Self {
        Self {
            session,
            audio,
            events: Events(None),
        }
    }

    pub fn with_events(mut self, events: &'a mut dyn PlaybackEventSink) -> Self {
        self.events = Events(Some(events));
        self
    }

    pub fn execute(&mut self, position: f64) {
        if self.session.machine().state().current_track.is_none() {
            debug!(position, "seek ignored: no current track");
            return;
        }
        self.session.machine_mut().seek(position);
        let clamped = self.session.machine().state().position;
        debug!(requested = position, position = clamped, "seek");
        self.audio.seek(clamped);
        self.events.emit(|e| e.position_changed(clamped));
    }
}

/// Volume belongs to the audio engine, not to playback state, so this one
/// never consults the session.
pub struct SetVolumeUseCase<'a> {
    audio: &'a mut dyn AudioPlayerPort,
    events: Events<'a>,
}

impl<'a> SetVolumeUseCase<'a> {
    pub fn new(audio: &'a mut dyn AudioPlayerPort) -> Self {
        Self {
            audio,
            events: Events(None),
        }
    }

    pub fn with_events(mut self, events: &'a mut dyn PlaybackEventSink) -> Self {
        self.events = Events(Some(events));
        self
    }

    pub fn execute(&mut self, level: f32) {
        debug!(level, "set volume");
        self.audio.set_volume(level);
        self.events.emit(|e| e.volume_changed(level));
    }
}
