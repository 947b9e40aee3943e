//! Playback sessions and the use cases that drive them.
//!
//! A [`PlaybackSession`] owns the state machine. Each use case applies one
//! machine transition and, only when that transition did something, issues a
//! single command to the audio port and a single event to the sink.
//!
//! Nothing in here locks: callers must serialize every call against a
//! session on one thread (see `crate::runtime` for the event loop that does).

mod player;
mod use_cases;

pub use player::*;
pub use use_cases::*;

use crate::playback::PlaybackStateMachine;

/// Exclusive owner of one playback state machine.
#[derive(Debug, Default)]
pub struct PlaybackSession {
    machine: PlaybackStateMachine,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_machine(machine: PlaybackStateMachine) -> Self {
        Self { machine }
    }

    pub fn machine(&self) -> &PlaybackStateMachine {
        &self.machine
    }

    pub(crate) fn machine_mut(&mut self) -> &mut PlaybackStateMachine {
        &mut self.machine
    }
}
