//! Playtr: a cartridge-archive music player.
//!
//! The core is a pure playback state machine ([`playback`]) driven by use
//! cases ([`session`]) that talk to an audio engine and a presentation sink
//! through the traits in [`ports`]. [`archive`] turns cartridge catalogs on
//! disk into queue tracks and media paths.

pub mod archive;
pub mod audio;
pub mod config;
pub mod playback;
pub mod ports;
pub mod runtime;
pub mod session;
