//! Real playback through the default output device.
//!
//! Decoding and device work run on a dedicated engine thread driven by an
//! [`EngineCmd`] channel. Port calls only update the shared [`EngineState`]
//! and post a command, so they return immediately.

use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use tracing::debug;
use uuid::Uuid;

use crate::config::AudioSettings;
use crate::playback::Track;
use crate::ports::{AudioPlayerPort, AudioSignal, AudioStatus, SignalSender};

use super::MediaLocator;

mod sink;
mod thread;

use thread::spawn_engine_thread;

#[derive(Debug)]
enum EngineCmd {
    /// Replace whatever is loaded with this track's file and start it from 0.
    Load(Uuid, PathBuf),
    Pause,
    Resume,
    Stop,
    /// Absolute position in seconds.
    Seek(f64),
    Volume(f32),
    Quit,
}

/// What the engine is doing, shared between the caller and the engine thread.
///
/// The caller publishes every intent here before posting the command. The
/// engine only writes back (end of track, failure) for the track it was
/// working on, and only while `current` still names that track.
#[derive(Debug, Default)]
struct EngineState {
    status: AudioStatus,
    current: Option<Uuid>,
}

type EngineHandle = Arc<Mutex<EngineState>>;

pub struct LocalAudioPlayer {
    tx: Sender<EngineCmd>,
    state: EngineHandle,
    locator: Rc<dyn MediaLocator>,
    signals: SignalSender,
    join: Option<JoinHandle<()>>,
}

impl LocalAudioPlayer {
    /// Start the engine thread. A missing output device is not fatal here;
    /// it is reported as [`AudioSignal::Error`] on the first play.
    pub fn spawn(
        settings: &AudioSettings,
        locator: Rc<dyn MediaLocator>,
        signals: SignalSender,
    ) -> Self {
        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let state: EngineHandle = Arc::new(Mutex::new(EngineState::default()));

        let join = spawn_engine_thread(rx, state.clone(), signals.clone(), settings.clone());

        Self {
            tx,
            state,
            locator,
            signals,
            join: Some(join),
        }
    }

    fn send(&self, cmd: EngineCmd) {
        // The engine thread only exits on Quit or when this sender drops.
        let _ = self.tx.send(cmd);
    }

    fn snapshot(&self) -> (AudioStatus, Option<Uuid>) {
        self.state
            .lock()
            .map(|s| (s.status, s.current))
            .unwrap_or((AudioStatus::Idle, None))
    }

    fn update(&self, status: AudioStatus, current: Option<Uuid>) {
        if let Ok(mut s) = self.state.lock() {
            s.status = status;
            s.current = current;
        }
    }
}

impl AudioPlayerPort for LocalAudioPlayer {
    fn status(&self) -> AudioStatus {
        self.snapshot().0
    }

    fn play(&mut self, track: &Track) {
        let (status, current) = self.snapshot();
        if current == Some(track.id) {
            match status {
                AudioStatus::Playing => return,
                AudioStatus::Paused => {
                    self.update(AudioStatus::Playing, current);
                    self.send(EngineCmd::Resume);
                    return;
                }
                _ => {}
            }
        }

        match self.locator.locate(track) {
            Ok(path) => {
                debug!(track = %track.title, path = %path.display(), "loading track");
                self.update(AudioStatus::Playing, Some(track.id));
                self.send(EngineCmd::Load(track.id, path));
            }
            Err(err) => {
                self.update(AudioStatus::Idle, None);
                self.send(EngineCmd::Stop);
                let _ = self.signals.send(AudioSignal::Error(err));
            }
        }
    }

    fn pause(&mut self) {
        let (status, current) = self.snapshot();
        if status == AudioStatus::Playing {
            self.update(AudioStatus::Paused, current);
            self.send(EngineCmd::Pause);
        }
    }

    fn stop(&mut self) {
        if self.status() == AudioStatus::Idle {
            return;
        }
        self.update(AudioStatus::Stopped, None);
        self.send(EngineCmd::Stop);
    }

    fn seek(&mut self, position: f64) {
        let (status, current) = self.snapshot();
        if current.is_some() && matches!(status, AudioStatus::Playing | AudioStatus::Paused) {
            self.send(EngineCmd::Seek(position));
        }
    }

    fn set_volume(&mut self, level: f32) {
        self.send(EngineCmd::Volume(level));
    }
}

impl Drop for LocalAudioPlayer {
    fn drop(&mut self) {
        self.send(EngineCmd::Quit);
        if let Some(handle) = self.join.take() {
            let _ = handle.join();
        }
    }
}
