use tracing::{debug, warn};

use crate::playback::{PlaybackState, PlaybackStatus, QueueState, Track};
use crate::ports::{AudioPlayerPort, AudioSignal, NullEventSink, PlaybackEventSink};

use super::PlaybackSession;
use super::use_cases::{
    LoadQueueUseCase, NextUseCase, PauseUseCase, PlayUseCase, PreviousUseCase, SeekUseCase,
    SetVolumeUseCase, StopUseCase,
};

/// One session wired to one audio engine and one listener.
///
/// Every intent builds a fresh use case, so the facade holds no playback
/// state beyond what the session owns.
pub struct Player<A, E = NullEventSink> {
    session: PlaybackSession,
    audio: A,
    events: E,
}

impl<A: AudioPlayerPort> Player<A> {
    pub fn new(audio: A) -> Self {
        Self::with_events(audio, NullEventSink)
    }
}

impl<A: AudioPlayerPort, E: PlaybackEventSink> Player<A, E> {
    pub fn with_events(audio: A, events: E) -> Self {
        Self {
            session: PlaybackSession::new(),
            audio,
            events,
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn state(&self) -> &PlaybackState {
        self.session.machine().state()
    }

    pub fn queue(&self) -> &QueueState {
        self.session.machine().queue()
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    pub fn load_queue(&mut self, tracks: Vec<Track>) {
        LoadQueueUseCase::new(&mut self.session)
            .with_events(&mut self.events)
            .execute(tracks);
    }

    pub fn play(&mut self) {
        PlayUseCase::new(&mut self.session, &mut self.audio)
            .with_events(&mut self.events)
            .execute();
    }

    pub fn pause(&mut self) {
        PauseUseCase::new(&mut self.session, &mut self.audio)
            .with_events(&mut self.events)
            .execute();
    }

    pub fn toggle_play_pause(&mut self) {
        if self.state().status == PlaybackStatus::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn stop(&mut self) {
        StopUseCase::new(&mut self.session, &mut self.audio)
            .with_events(&mut self.events)
            .execute();
    }

    pub fn next(&mut self) {
        NextUseCase::new(&mut self.session, &mut self.audio)
            .with_events(&mut self.events)
            .execute();
    }

    pub fn previous(&mut self) {
        PreviousUseCase::new(&mut self.session, &mut self.audio)
            .with_events(&mut self.events)
            .execute();
    }

    pub fn seek(&mut self, position: f64) {
        SeekUseCase::new(&mut self.session, &mut self.audio)
            .with_events(&mut self.events)
            .execute(position);
    }

    pub fn set_volume(&mut self, level: f32) {
        SetVolumeUseCase::new(&mut self.audio)
            .with_events(&mut self.events)
            .execute(level);
    }

    /// Apply an asynchronous report from the audio engine.
    ///
    /// Must run on the same thread as every other intent. End of track
    /// advances the queue, but only while the finished track is still the
    /// one playing; a completion that raced a stop, skip or pause is dropped.
    /// Position samples and errors only reach the listener and leave the
    /// state machine where it was.
    pub fn handle_signal(&mut self, signal: AudioSignal) {
        match signal {
            AudioSignal::Finished(id) => {
                let state = self.state();
                let is_current = state.status == PlaybackStatus::Playing
                    && state.current_track.as_ref().is_some_and(|t| t.id == id);
                if !is_current {
                    debug!(%id, "ignoring completion of a track that is no longer playing");
                    return;
                }
                debug!(%id, "track finished, advancing");
                self.next();
            }
            AudioSignal::Position(position) => self.events.position_reported(position),
            AudioSignal::Error(err) => {
                warn!(error = %err, "audio engine reported an error");
                self.events.playback_failed(&err);
            }
        }
    }
}
