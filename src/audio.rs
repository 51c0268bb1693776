//! Host audio output.
//!
//! `AudioBackend` is the narrow facility the playback controller drives;
//! `RodioBackend` implements it on top of a dedicated audio thread that owns
//! the `rodio` output stream.

mod backend;
mod player;
mod sink;
mod thread;
mod types;

pub use backend::*;
pub use player::RodioBackend;
pub use types::*;

#[cfg(test)]
pub(crate) mod fake;

#[cfg(test)]
mod tests;
