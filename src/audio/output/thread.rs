use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::audio::seek_offset;
use crate::config::AudioSettings;
use crate::ports::{AudioError, AudioSignal, AudioStatus, SignalSender};

use super::sink::open_sink_at;
use super::{EngineCmd, EngineHandle};

/// Everything the worker owns between commands.
struct Worker {
    stream: Option<OutputStream>,
    sink: Option<Sink>,
    track: Option<Uuid>,
    path: Option<PathBuf>,
    paused: bool,
    // Playhead bookkeeping: time played before the last resume, plus the
    // instant of that resume while running.
    started_at: Option<Instant>,
    accumulated: Duration,
    volume: f32,
    last_report: Instant,
    state: EngineHandle,
    signals: SignalSender,
}

pub(super) fn spawn_engine_thread(
    rx: Receiver<EngineCmd>,
    state: EngineHandle,
    signals: SignalSender,
    settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio prints to stderr when the stream is dropped.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(err) => {
                warn!(error = %err, "no audio output device");
                None
            }
        };

        let poll = Duration::from_millis(settings.poll_interval_ms.max(1));
        let report_every = Duration::from_millis(settings.position_interval_ms.max(1));

        let mut worker = Worker {
            stream,
            sink: None,
            track: None,
            path: None,
            paused: true,
            started_at: None,
            accumulated: Duration::ZERO,
            volume: settings.initial_volume,
            last_report: Instant::now(),
            state,
            signals,
        };

        loop {
            match rx.recv_timeout(poll) {
                Ok(EngineCmd::Quit) => {
                    worker.drop_sink();
                    break;
                }
                Ok(cmd) => worker.handle(cmd),
                Err(RecvTimeoutError::Timeout) => worker.tick(report_every),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

impl Worker {
    fn handle(&mut self, cmd: EngineCmd) {
        match cmd {
            EngineCmd::Load(id, path) => self.load(id, path),
            EngineCmd::Pause => {
                if let Some(sink) = &self.sink {
                    if !self.paused {
                        sink.pause();
                        self.accumulated = self.elapsed();
                        self.started_at = None;
                        self.paused = true;
                    }
                }
            }
            EngineCmd::Resume => {
                if let Some(sink) = &self.sink {
                    if self.paused {
                        sink.play();
                        self.started_at = Some(Instant::now());
                        self.paused = false;
                    }
                }
            }
            // The caller already published Stopped.
            EngineCmd::Stop => self.drop_sink(),
            EngineCmd::Seek(seconds) => match seek_offset(seconds) {
                Some(target) => self.seek(target),
                None => warn!(seconds, "ignoring seek to an unrepresentable position"),
            },
            EngineCmd::Volume(level) => {
                self.volume = level;
                if let Some(sink) = &self.sink {
                    sink.set_volume(level);
                }
            }
            EngineCmd::Quit => self.drop_sink(),
        }
    }

    fn load(&mut self, id: Uuid, path: PathBuf) {
        self.drop_sink();

        let opened = match &self.stream {
            Some(stream) => open_sink_at(stream, &path, Duration::ZERO, self.volume),
            None => Err(AudioError::Device("no audio output device".to_string())),
        };

        match opened {
            Ok(sink) => {
                debug!(%id, path = %path.display(), "engine started track");
                sink.play();
                self.sink = Some(sink);
                self.track = Some(id);
                self.path = Some(path);
                self.paused = false;
                self.started_at = Some(Instant::now());
                self.accumulated = Duration::ZERO;
                self.last_report = Instant::now();
            }
            Err(err) => self.fail(id, err),
        }
    }

    fn seek(&mut self, target: Duration) {
        let (Some(stream), Some(path), Some(id)) = (&self.stream, &self.path, self.track) else {
            return;
        };
        if self.sink.is_none() {
            return;
        }

        // Rebuild the sink and skip into the file.
        match open_sink_at(stream, path, target, self.volume) {
            Ok(sink) => {
                if let Some(old) = self.sink.take() {
                    old.stop();
                }
                if self.paused {
                    self.started_at = None;
                } else {
                    sink.play();
                    self.started_at = Some(Instant::now());
                }
                self.sink = Some(sink);
                self.accumulated = target;
                let _ = self.signals.send(AudioSignal::Position(target.as_secs_f64()));
            }
            Err(err) => self.fail(id, err),
        }
    }

    fn tick(&mut self, report_every: Duration) {
        let (Some(sink), Some(id)) = (&self.sink, self.track) else {
            return;
        };
        if self.paused {
            return;
        }

        if sink.empty() {
            self.drop_sink();
            self.settle(id, AudioStatus::Stopped);
            let _ = self.signals.send(AudioSignal::Finished(id));
            return;
        }

        if self.last_report.elapsed() >= report_every {
            self.last_report = Instant::now();
            let _ = self
                .signals
                .send(AudioSignal::Position(self.elapsed().as_secs_f64()));
        }
    }

    fn fail(&mut self, id: Uuid, err: AudioError) {
        warn!(%id, error = %err, "engine gave up on track");
        self.drop_sink();
        self.settle(id, AudioStatus::Idle);
        let _ = self.signals.send(AudioSignal::Error(err));
    }

    fn drop_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.track = None;
        self.path = None;
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    /// Publish that track `id` stopped or failed, unless the caller has
    /// already moved on to something else.
    fn settle(&self, id: Uuid, status: AudioStatus) {
        if let Ok(mut shared) = self.state.lock() {
            if shared.current == Some(id) {
                shared.status = status;
                shared.current = None;
            }
        }
    }
}
