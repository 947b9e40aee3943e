//! Playback domain: tracks, the navigable queue and the state machine that
//! decides what should be playing.
//!
//! Everything in here is pure and synchronous. Side effects (talking to the
//! audio engine, notifying listeners) live in `crate::session`.

mod machine;
mod queue;
mod state;
mod track;

pub use machine::*;
pub use queue::*;
pub use state::*;
pub use track::*;

#[cfg(test)]
mod tests;
