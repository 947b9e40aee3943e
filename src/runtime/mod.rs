//! Line-oriented console front end.

use std::io::{self, BufReader};
use std::rc::Rc;
use std::sync::mpsc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::archive::{ArchiveLibrary, ConfiguredRoots};
use crate::config::{LoggingSettings, Settings};
use crate::ports::{AudioPlayerPort, SignalSender};

mod command;
mod event_loop;
mod settings;
mod view;

pub use command::{ControlCmd, HELP};
pub use event_loop::{
    Console, Flow, RuntimeEvent, demo_tracks, spawn_input_thread, spawn_signal_forwarder,
};
pub use settings::load_settings;
pub use view::{NowPlaying, format_clock};

/// Install the stderr subscriber. `RUST_LOG` wins over `logging.filter`.
pub fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Run the console until `quit` or end of input.
pub fn run(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let library = Rc::new(ArchiveLibrary::new(ConfiguredRoots::from_settings(
        &settings.archive,
    )));

    let (signal_tx, signal_rx) = mpsc::channel();
    let audio = build_engine(settings, library.clone(), signal_tx);

    let (tx, rx) = mpsc::channel::<RuntimeEvent>();
    spawn_signal_forwarder(signal_rx, tx.clone());
    spawn_input_thread(BufReader::new(io::stdin()), tx);

    let mut console = Console::new(audio, library, io::stdout());
    console.player_mut().set_volume(settings.audio.initial_volume);
    console.run(&rx)?;

    info!("bye");
    Ok(())
}

#[cfg(feature = "output")]
fn build_engine(
    settings: &Settings,
    library: Rc<ArchiveLibrary>,
    signals: SignalSender,
) -> Box<dyn AudioPlayerPort> {
    info!("using local audio output");
    Box::new(crate::audio::LocalAudioPlayer::spawn(
        &settings.audio,
        library,
        signals,
    ))
}

#[cfg(not(feature = "output"))]
fn build_engine(
    _settings: &Settings,
    library: Rc<ArchiveLibrary>,
    signals: SignalSender,
) -> Box<dyn AudioPlayerPort> {
    info!("built without audio output, playback is silent");
    Box::new(
        crate::audio::StubAudioPlayer::new()
            .with_locator(library)
            .with_signals(signals),
    )
}
