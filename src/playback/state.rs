use super::track::Track;

/// Logical playback status as decided by the state machine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    #[default]
    Idle,
    Playing,
    Paused,
    Stopped,
}

impl PlaybackStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        }
    }
}

/// What is playing and where.
///
/// `current_track` is tracked separately from the queue cursor. The two are
/// kept in step by the state machine but may diverge (e.g. after the queue
/// ends the cursor stays on the last track while `current_track` is cleared).
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackState {
    pub status: PlaybackStatus,
    pub current_track: Option<Track>,
    /// Seconds into `current_track`. Never negative.
    pub position: f64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            status: PlaybackStatus::Idle,
            current_track: None,
            position: 0.0,
        }
    }
}

impl PlaybackState {
    /// Initial state with only the status overridden.
    pub(crate) fn with_status(status: PlaybackStatus) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }
}
