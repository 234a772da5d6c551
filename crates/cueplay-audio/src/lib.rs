//! # cueplay-audio
//!
//! Owning handles over a native cue-playback engine.
//!
//! - [`AudioEngine`] owns the native engine and its 3D context
//! - [`SoundBank`] owns a native bank and prepares cues from it
//! - [`Cue`] owns one prepared cue: state queries, variables, 3D, and
//!   play/pause/stop control
//!
//! All audio work happens behind the [`CueBackend`] trait. Handles release
//! their native resources on `dispose()` or on drop, and never destroy a
//! handle whose owner is already gone.

pub mod backend;
pub mod config;
pub mod cue;
pub mod engine;
pub mod sound_bank;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::CueBackend;
pub use config::EngineConfig;
pub use cue::{Cue, DisposingHandler};
pub use engine::{AudioEngine, DisposalStats};
pub use sound_bank::SoundBank;
