//! Boundary contracts between the playback core and the outside world.
//!
//! The core drives an [`AudioPlayerPort`] and reports to a
//! [`PlaybackEventSink`]. Both are implemented outside the core and injected
//! when a session's use cases are built.

mod audio;
mod events;

pub use audio::*;
pub use events::*;
