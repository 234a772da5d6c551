//! Core domain types for cueplay.

pub mod dsp;
pub mod handle;
pub mod spatial;
pub mod state;

pub use dsp::DspSettings;
pub use handle::{CueHandle, CueIndex, Engine3dHandle, EngineHandle, SoundBankHandle, VariableIndex};
pub use spatial::{AudioEmitter, AudioListener, Vector3};
pub use state::{CueState, StopFlag, StopOptions};
