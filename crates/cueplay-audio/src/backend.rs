//! Capability interface to the native cue-playback engine.
//!
//! Everything that decodes, mixes, or spatializes audio happens behind this
//! trait. The handle types in this crate only decide *when* to call it and
//! with which handle.

use cueplay_core::{
    AudioEmitter, AudioListener, CueHandle, CueIndex, CueState, DspSettings, Engine3dHandle,
    EngineHandle, Result, SoundBankHandle, StopFlag, VariableIndex,
};

/// Native audio engine primitives.
///
/// Destroying a handle whose owner has already been released is undefined
/// behavior on real engines; callers in this crate check owner disposal
/// before calling any `destroy_*` or `shut_down_*` method.
pub trait CueBackend: Send + Sync {
    // Engine

    fn create_engine(&self) -> Result<EngineHandle>;

    fn shut_down_engine(&self, engine: EngineHandle);

    /// Create the 3D calculation context for an engine.
    fn initialize_3d(&self, engine: EngineHandle, speed_of_sound: f32) -> Result<Engine3dHandle>;

    /// Number of channels the engine mixes to.
    fn output_channels(&self, engine: EngineHandle) -> u16;

    /// Periodic engine work (notifications, stream refills).
    fn update_engine(&self, engine: EngineHandle);

    fn global_variable_index(&self, engine: EngineHandle, name: &str) -> VariableIndex;

    fn global_variable(&self, engine: EngineHandle, index: VariableIndex) -> f32;

    fn set_global_variable(&self, engine: EngineHandle, index: VariableIndex, value: f32);

    // Sound bank

    /// Load a sound bank from opaque content bytes.
    fn create_sound_bank(&self, engine: EngineHandle, data: &[u8]) -> Result<SoundBankHandle>;

    fn destroy_sound_bank(&self, bank: SoundBankHandle);

    fn sound_bank_state(&self, bank: SoundBankHandle) -> CueState;

    fn cue_index(&self, bank: SoundBankHandle, name: &str) -> CueIndex;

    fn prepare_cue(&self, bank: SoundBankHandle, index: CueIndex) -> Result<CueHandle>;

    /// Fire-and-forget playback; the engine owns the resulting cue.
    fn play_cue_index(&self, bank: SoundBankHandle, index: CueIndex) -> Result<()>;

    // Cue

    fn cue_state(&self, cue: CueHandle) -> CueState;

    fn destroy_cue(&self, cue: CueHandle);

    fn variable_index(&self, cue: CueHandle, name: &str) -> VariableIndex;

    fn variable(&self, cue: CueHandle, index: VariableIndex) -> f32;

    fn set_variable(&self, cue: CueHandle, index: VariableIndex, value: f32);

    fn play(&self, cue: CueHandle);

    fn pause(&self, cue: CueHandle, paused: bool);

    fn stop(&self, cue: CueHandle, flag: StopFlag);

    // 3D

    /// Fill `settings` with the mix for `emitter` as heard by `listener`.
    ///
    /// `settings` arrives sized by its channel counts.
    fn calculate_3d(
        &self,
        engine_3d: Engine3dHandle,
        listener: &AudioListener,
        emitter: &AudioEmitter,
        settings: &mut DspSettings,
    );

    fn apply_3d(&self, settings: &DspSettings, cue: CueHandle);
}
