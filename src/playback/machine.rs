//! The playback state machine.
//!
//! `PlaybackStateMachine` is the single source of truth for what should be
//! playing. Every operation is total: preconditions that do not hold turn the
//! call into a no-op reported through the return value, never an error.

use super::queue::QueueState;
use super::state::{PlaybackState, PlaybackStatus};
use super::track::Track;

/// Result of [`PlaybackStateMachine::next`].
#[derive(Clone, Debug, PartialEq)]
pub enum NextOutcome {
    /// The queue moved forward and this track is now playing from 0.
    Advanced(Track),
    /// There was nothing after the current track; playback is stopped and
    /// the current track cleared.
    QueueEnded,
}

/// Result of [`PlaybackStateMachine::previous`].
#[derive(Clone, Debug, PartialEq)]
pub enum PreviousOutcome {
    /// The queue moved back and this track is now playing from 0.
    Advanced(Track),
    /// Already at the first track, so it restarts from 0.
    Restarted(Track),
    /// The queue is empty.
    NoTrack,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaybackStateMachine {
    queue: QueueState,
    state: PlaybackState,
}

impl PlaybackStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self) -> &QueueState {
        &self.queue
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Replace the queue and return to the initial idle state.
    pub fn load_queue(&mut self, tracks: Vec<Track>) {
        self.queue.reset(tracks);
        self.state = PlaybackState::default();
    }

    /// Start or resume playback.
    ///
    /// Position is left alone so that resuming from pause continues where it
    /// stopped. Returns `None` when there is nothing to play.
    pub fn play(&mut self) -> Option<Track> {
        self.adopt_queue_track();
        let track = self.state.current_track.clone()?;
        self.state.status = PlaybackStatus::Playing;
        Some(track)
    }

    /// Fill an empty current-track slot from the queue cursor.
    ///
    /// Only an empty slot is filled; an already adopted track wins even if
    /// the cursor has since moved.
    pub fn adopt_queue_track(&mut self) {
        if self.state.current_track.is_none() {
            self.state.current_track = self.queue.current_track().cloned();
        }
    }

    pub fn pause(&mut self) -> Option<Track> {
        if self.state.status != PlaybackStatus::Playing {
            return None;
        }
        let track = self.state.current_track.clone()?;
        self.state.status = PlaybackStatus::Paused;
        Some(track)
    }

    /// Stop playback but remember the track and position.
    ///
    /// Unlike the queue-ended path of [`next`](Self::next), the current track
    /// survives an explicit stop.
    pub fn stop(&mut self) -> Option<Track> {
        if self.state.status == PlaybackStatus::Idle {
            return None;
        }
        let track = self.state.current_track.clone()?;
        self.state.status = PlaybackStatus::Stopped;
        Some(track)
    }

    /// Move the playhead. Negative positions clamp to 0. No-op without a track.
    pub fn seek(&mut self, position: f64) {
        if self.state.current_track.is_none() {
            return;
        }
        // NaN compares false against everything, so it lands on 0 as well.
        self.state.position = if position > 0.0 { position } else { 0.0 };
    }

    pub fn next(&mut self) -> NextOutcome {
        if self.queue.advance() {
            if let Some(track) = self.queue.current_track().cloned() {
                self.start_from_top(track.clone());
                return NextOutcome::Advanced(track);
            }
        }

        self.state = PlaybackState::with_status(PlaybackStatus::Stopped);
        NextOutcome::QueueEnded
    }

    pub fn previous(&mut self) -> PreviousOutcome {
        let Some(track) = self.queue.current_track().cloned() else {
            return PreviousOutcome::NoTrack;
        };

        if self.queue.is_at_start() {
            self.start_from_top(track.clone());
            return PreviousOutcome::Restarted(track);
        }

        self.queue.retreat();
        match self.queue.current_track().cloned() {
            Some(previous) => {
                self.start_from_top(previous.clone());
                PreviousOutcome::Advanced(previous)
            }
            None => PreviousOutcome::NoTrack,
        }
    }

    fn start_from_top(&mut self, track: Track) {
        self.state.current_track = Some(track);
        self.state.status = PlaybackStatus::Playing;
        self.state.position = 0.0;
    }
}
