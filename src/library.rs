//! Track store over a flat downloads directory.
//!
//! Uploaded files are persisted here and the directory itself is the only
//! index: every listing re-scans it.

mod display;
mod model;
mod sanitize;
mod store;

pub use display::*;
pub use model::*;
pub use store::TrackStore;
