use crate::playback::{PlaybackStatus, Track};
use crate::ports::{AudioError, PlaybackEventSink};

const NO_TRACK: &str = "No Track";

/// What the console shows about playback, kept current by session events.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub status: PlaybackStatus,
    pub title: String,
    pub byline: String,
    pub position: f64,
    pub volume: f32,
    pub queue_ended: bool,
    pub last_error: Option<String>,
}

impl Default for NowPlaying {
    fn default() -> Self {
        Self {
            status: PlaybackStatus::Idle,
            title: NO_TRACK.to_string(),
            byline: String::new(),
            position: 0.0,
            volume: 1.0,
            queue_ended: false,
            last_error: None,
        }
    }
}

impl NowPlaying {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    fn show(&mut self, track: &Track) {
        self.title = track.title.clone();
        self.byline = track.byline();
    }

    /// One-line summary, e.g. `[playing] Downhearted Blues (Smith, Bessie • Giants of Jazz) 1:05 vol 80%`.
    pub fn status_line(&self) -> String {
        let mut line = format!("[{}] {}", self.status.label(), self.title);
        if !self.byline.is_empty() {
            line.push_str(&format!(" ({})", self.byline));
        }
        line.push_str(&format!(
            " {} vol {:.0}%",
            format_clock(self.position),
            self.volume * 100.0
        ));
        if self.queue_ended {
            line.push_str(" [end of queue]");
        }
        if let Some(err) = &self.last_error {
            line.push_str(&format!(" [error: {err}]"));
        }
        line
    }
}

/// `m:ss` for positions under an hour, `h:mm:ss` above.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

impl PlaybackEventSink for NowPlaying {
    fn queue_loaded(&mut self, tracks: &[Track]) {
        self.queue_ended = false;
        self.last_error = None;
        self.status = PlaybackStatus::Idle;
        self.position = 0.0;
        match tracks.first() {
            Some(first) => self.show(first),
            None => {
                self.title = NO_TRACK.to_string();
                self.byline.clear();
            }
        }
    }

    fn track_started(&mut self, track: &Track) {
        // A resumed track keeps its playhead.
        if self.status != PlaybackStatus::Paused {
            self.position = 0.0;
        }
        self.queue_ended = false;
        self.status = PlaybackStatus::Playing;
        self.last_error = None;
        self.show(track);
    }

    fn track_paused(&mut self, track: &Track) {
        self.status = PlaybackStatus::Paused;
        self.show(track);
    }

    fn track_stopped(&mut self, track: &Track) {
        self.status = PlaybackStatus::Stopped;
        self.position = 0.0;
        self.show(track);
    }

    fn queue_did_end(&mut self) {
        self.queue_ended = true;
        self.status = PlaybackStatus::Stopped;
        self.position = 0.0;
    }

    fn position_changed(&mut self, position: f64) {
        self.position = position;
    }

    fn volume_changed(&mut self, level: f32) {
        self.volume = level.clamp(0.0, 1.0);
    }

    fn position_reported(&mut self, position: f64) {
        if self.status == PlaybackStatus::Playing {
            self.position = position;
        }
    }

    fn playback_failed(&mut self, error: &AudioError) {
        self.last_error = Some(error.to_string());
    }
}
