//! Playback session state machine.
//!
//! One `PlaybackSession` per process, owned by the `PlaybackController`
//! and mutated only while its lock is held.

mod controller;
mod session;

pub use controller::*;
pub use session::*;

#[cfg(test)]
mod tests;
