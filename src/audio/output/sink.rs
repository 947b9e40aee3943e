//! Opening and decoding media files into paused `rodio` sinks.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::ports::AudioError;

/// Create a paused `Sink` for the file at `path`, starting at `start_at`.
pub(super) fn open_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
    volume: f32,
) -> Result<Sink, AudioError> {
    let file = File::open(path)
        .map_err(|err| AudioError::Decode(format!("failed to open {}: {err}", path.display())))?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|err| AudioError::Decode(format!("{}: {err}", path.display())))?
        // `skip_duration` is the seeking primitive; Duration::ZERO is a no-op.
        .skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    Ok(sink)
}
