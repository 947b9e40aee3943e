use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::archive::{ArchiveLibrary, ArchiveRoots, ArchiveSource, ConfiguredRoots};
use crate::playback::Track;
use crate::ports::{AudioPlayerPort, AudioSignal};
use crate::session::Player;

use super::command::{ControlCmd, HELP};
use super::view::NowPlaying;

/// Everything the event loop reacts to, merged onto one channel.
#[derive(Debug)]
pub enum RuntimeEvent {
    Command(ControlCmd),
    /// A line that did not parse; carries the reason.
    BadInput(String),
    Signal(AudioSignal),
    InputClosed,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Read commands line by line until EOF.
pub fn spawn_input_thread<I>(input: I, tx: Sender<RuntimeEvent>) -> JoinHandle<()>
where
    I: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in input.lines() {
            let Ok(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            let event = match line.parse::<ControlCmd>() {
                Ok(cmd) => RuntimeEvent::Command(cmd),
                Err(msg) => RuntimeEvent::BadInput(msg),
            };
            if tx.send(event).is_err() {
                return;
            }
        }
        let _ = tx.send(RuntimeEvent::InputClosed);
    })
}

/// Move audio engine signals onto the runtime channel.
pub fn spawn_signal_forwarder(
    signals: Receiver<AudioSignal>,
    tx: Sender<RuntimeEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        for signal in signals {
            if tx.send(RuntimeEvent::Signal(signal)).is_err() {
                break;
            }
        }
    })
}

/// The console front end: one player, one archive library, one output.
///
/// All session work happens on the thread that calls [`Console::run`].
pub struct Console<A, R = ConfiguredRoots, W = io::Stdout> {
    player: Player<A, NowPlaying>,
    library: Rc<ArchiveLibrary<R>>,
    out: W,
}

impl<A, R, W> Console<A, R, W>
where
    A: AudioPlayerPort,
    R: ArchiveRoots,
    W: Write,
{
    pub fn new(audio: A, library: Rc<ArchiveLibrary<R>>, out: W) -> Self {
        Self {
            player: Player::with_events(audio, NowPlaying::new()),
            library,
            out,
        }
    }

    pub fn player(&self) -> &Player<A, NowPlaying> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player<A, NowPlaying> {
        &mut self.player
    }

    pub fn now_playing(&self) -> &NowPlaying {
        self.player.events()
    }

    pub fn out(&self) -> &W {
        &self.out
    }

    /// Drain `events` until quit or until every sender is gone.
    pub fn run(&mut self, events: &Receiver<RuntimeEvent>) -> io::Result<()> {
        writeln!(self.out, "playtr ready, type `help` for commands")?;
        self.out.flush()?;
        while let Ok(event) = events.recv() {
            if self.handle_event(event)? == Flow::Quit {
                break;
            }
            self.out.flush()?;
        }
        self.player.stop();
        self.out.flush()
    }

    pub fn handle_event(&mut self, event: RuntimeEvent) -> io::Result<Flow> {
        match event {
            RuntimeEvent::Command(cmd) => self.execute(cmd),
            RuntimeEvent::BadInput(msg) => {
                writeln!(self.out, "error: {msg} (type `help`)")?;
                Ok(Flow::Continue)
            }
            RuntimeEvent::Signal(signal) => {
                self.handle_signal(signal)?;
                Ok(Flow::Continue)
            }
            RuntimeEvent::InputClosed => {
                debug!("input closed");
                Ok(Flow::Quit)
            }
        }
    }

    fn handle_signal(&mut self, signal: AudioSignal) -> io::Result<()> {
        match signal {
            AudioSignal::Position(_) => {
                self.player.handle_signal(signal);
                Ok(())
            }
            AudioSignal::Finished(_) => {
                self.player.handle_signal(signal);
                self.print_status()
            }
            AudioSignal::Error(err) => {
                writeln!(self.out, "playback failed: {err}")?;
                self.player.handle_signal(AudioSignal::Error(err));
                Ok(())
            }
        }
    }

    pub fn execute(&mut self, cmd: ControlCmd) -> io::Result<Flow> {
        debug!(?cmd, "console command");
        match cmd {
            ControlCmd::Sources => self.print_sources()?,
            ControlCmd::List(source) => self.print_cartridges(source)?,
            ControlCmd::Load(source, id) => self.load(source, &id)?,
            ControlCmd::Install(id) => match self.library.install_bundled_to_local(&id) {
                Ok(path) => writeln!(self.out, "installed {id} to {}", path.display())?,
                Err(err) => self.report(&err)?,
            },
            ControlCmd::Demo => {
                self.player.load_queue(demo_tracks());
                self.print_queue()?;
            }
            ControlCmd::Play => self.then_status(|p| p.play())?,
            ControlCmd::Pause => self.then_status(|p| p.pause())?,
            ControlCmd::PlayPause => self.then_status(|p| p.toggle_play_pause())?,
            ControlCmd::Stop => self.then_status(|p| p.stop())?,
            ControlCmd::Next => self.then_status(|p| p.next())?,
            ControlCmd::Prev => self.then_status(|p| p.previous())?,
            ControlCmd::Seek(secs) => self.then_status(|p| p.seek(secs))?,
            ControlCmd::Volume(level) => {
                if (0.0..=1.0).contains(&level) {
                    self.then_status(|p| p.set_volume(level))?;
                } else {
                    writeln!(self.out, "error: volume must be between 0 and 1")?;
                }
            }
            ControlCmd::Status => {
                self.print_status()?;
                self.print_queue()?;
            }
            ControlCmd::Help => writeln!(self.out, "{HELP}")?,
            ControlCmd::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn then_status(&mut self, f: impl FnOnce(&mut Player<A, NowPlaying>)) -> io::Result<()> {
        f(&mut self.player);
        self.print_status()
    }

    fn load(&mut self, source: ArchiveSource, id: &str) -> io::Result<()> {
        match self.library.load_queue_tracks(source, id) {
            Ok(tracks) => {
                writeln!(self.out, "loaded {} tracks from {source}/{id}", tracks.len())?;
                self.player.load_queue(tracks);
                self.print_queue()
            }
            Err(err) => self.report(&err),
        }
    }

    fn print_sources(&mut self) -> io::Result<()> {
        for source in ArchiveSource::ALL {
            match self.library.archive_root(source) {
                Ok(root) => writeln!(
                    self.out,
                    "{:<8} {}: {}",
                    source.key(),
                    source.display_name(),
                    root.display()
                )?,
                Err(err) => writeln!(
                    self.out,
                    "{:<8} {}: unavailable ({err})",
                    source.key(),
                    source.display_name()
                )?,
            }
        }
        Ok(())
    }

    fn print_cartridges(&mut self, source: ArchiveSource) -> io::Result<()> {
        let ids = match self.library.list_cartridge_ids(source) {
            Ok(ids) => ids,
            Err(err) => return self.report(&err),
        };
        if ids.is_empty() {
            return writeln!(self.out, "no cartridges in {source}");
        }
        for id in ids {
            match self.library.load_cartridge(source, &id) {
                Ok(c) => writeln!(
                    self.out,
                    "  {id}  {} ({}), {} tracks",
                    c.title,
                    c.subtitle(),
                    c.tracks.len()
                )?,
                Err(err) => writeln!(self.out, "  {id}  unreadable: {err}")?,
            }
        }
        Ok(())
    }

    fn print_queue(&mut self) -> io::Result<()> {
        let queue = self.player.queue();
        if queue.is_empty() {
            return writeln!(self.out, "queue is empty");
        }
        let current = queue.current_index();
        for (i, track) in queue.tracks().iter().enumerate() {
            let marker = if Some(i) == current { '>' } else { ' ' };
            writeln!(self.out, "{marker} {:>2}. {}", i + 1, track.title)?;
        }
        Ok(())
    }

    fn print_status(&mut self) -> io::Result<()> {
        let line = self.player.events().status_line();
        writeln!(self.out, "{line}")
    }

    fn report(&mut self, err: &dyn std::error::Error) -> io::Result<()> {
        warn!(error = %err, "archive operation failed");
        writeln!(self.out, "error: {err}")
    }
}

/// A small queue that needs no archive on disk.
pub fn demo_tracks() -> Vec<Track> {
    [("Open", 210), ("Loop", 185), ("Close", 200)]
        .into_iter()
        .map(|(title, secs)| Track::new(title, "Playt", "Demo", Duration::from_secs(secs)))
        .collect()
}
