use std::rc::Rc;

use tracing::debug;
use uuid::Uuid;

use crate::playback::Track;
use crate::ports::{AudioPlayerPort, AudioSignal, AudioStatus, SignalSender};

use super::{MediaLocator, seek_offset};

/// Headless engine: follows the port contract without producing sound.
///
/// With a locator attached it still refuses tracks whose media cannot be
/// found, reporting them on the signal channel like a real engine would.
pub struct StubAudioPlayer {
    status: AudioStatus,
    current: Option<Uuid>,
    position: f64,
    volume: f32,
    locator: Option<Rc<dyn MediaLocator>>,
    signals: Option<SignalSender>,
}

impl Default for StubAudioPlayer {
    fn default() -> Self {
        Self {
            status: AudioStatus::Idle,
            current: None,
            position: 0.0,
            volume: 1.0,
            locator: None,
            signals: None,
        }
    }
}

impl StubAudioPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locator(mut self, locator: Rc<dyn MediaLocator>) -> Self {
        self.locator = Some(locator);
        self
    }

    pub fn with_signals(mut self, signals: SignalSender) -> Self {
        self.signals = Some(signals);
        self
    }

    pub fn current_track_id(&self) -> Option<Uuid> {
        self.current
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Pretend the current track played to its end.
    pub fn finish_current(&mut self) {
        if self.status != AudioStatus::Playing {
            return;
        }
        let Some(id) = self.current.take() else {
            return;
        };
        self.status = AudioStatus::Stopped;
        self.position = 0.0;
        self.signal(AudioSignal::Finished(id));
    }

    fn signal(&self, signal: AudioSignal) {
        if let Some(tx) = &self.signals {
            let _ = tx.send(signal);
        }
    }
}

impl AudioPlayerPort for StubAudioPlayer {
    fn status(&self) -> AudioStatus {
        self.status
    }

    fn play(&mut self, track: &Track) {
        if self.current == Some(track.id) {
            match self.status {
                AudioStatus::Playing => return,
                AudioStatus::Paused => {
                    self.status = AudioStatus::Playing;
                    return;
                }
                _ => {}
            }
        }

        if let Some(locator) = &self.locator {
            if let Err(err) = locator.locate(track) {
                self.status = AudioStatus::Idle;
                self.current = None;
                self.signal(AudioSignal::Error(err));
                return;
            }
        }

        debug!(track = %track.title, "stub engine playing");
        self.status = AudioStatus::Playing;
        self.current = Some(track.id);
        self.position = 0.0;
    }

    fn pause(&mut self) {
        if self.status == AudioStatus::Playing {
            self.status = AudioStatus::Paused;
            self.signal(AudioSignal::Position(self.position));
        }
    }

    fn stop(&mut self) {
        if self.status == AudioStatus::Idle {
            return;
        }
        self.status = AudioStatus::Stopped;
        self.current = None;
        self.position = 0.0;
    }

    fn seek(&mut self, position: f64) {
        if self.current.is_none() {
            return;
        }
        match seek_offset(position) {
            Some(offset) => self.position = offset.as_secs_f64(),
            None => debug!(position, "stub ignoring unrepresentable seek"),
        }
    }

    fn set_volume(&mut self, level: f32) {
        self.volume = level;
    }
}
