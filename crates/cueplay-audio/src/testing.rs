//! Recording backend for unit tests.

use crate::backend::CueBackend;
use cueplay_core::{
    AudioEmitter, AudioListener, CueHandle, CueIndex, CueState, DspSettings, Engine3dHandle,
    EngineHandle, Result, SoundBankHandle, StopFlag, VariableIndex,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// One backend call, in the order it was made.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateEngine,
    ShutDownEngine(EngineHandle),
    Initialize3d(EngineHandle),
    UpdateEngine(EngineHandle),
    GlobalVariableIndex(String),
    GlobalVariable(VariableIndex),
    SetGlobalVariable(VariableIndex, f32),
    CreateSoundBank(usize),
    DestroySoundBank(SoundBankHandle),
    SoundBankState(SoundBankHandle),
    CueIndex(String),
    PrepareCue(SoundBankHandle, CueIndex),
    PlayCueIndex(CueIndex),
    CueState(CueHandle),
    DestroyCue(CueHandle),
    VariableIndex(CueHandle, String),
    Variable(CueHandle, VariableIndex),
    SetVariable(CueHandle, VariableIndex, f32),
    Play(CueHandle),
    Pause(CueHandle, bool),
    Stop(CueHandle, StopFlag),
    Calculate3d { src: u32, dst: u32 },
    Apply3d(CueHandle),
    /// Written by test code to order its own events against backend calls.
    Marker(&'static str),
}

struct Inner {
    calls: Vec<Call>,
    output_channels: u16,
    cues: Vec<String>,
    cue_variables: Vec<(String, f32)>,
    global_variables: Vec<(String, f32)>,
    cue_state: CueState,
    bank_state: CueState,
    next_handle: u64,
}

impl Inner {
    fn next_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

/// Backend double that records every call and serves canned answers.
pub struct RecordingBackend {
    inner: Mutex<Inner>,
}

impl RecordingBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(Inner {
                calls: Vec::new(),
                output_channels: 2,
                cues: Vec::new(),
                cue_variables: Vec::new(),
                global_variables: Vec::new(),
                cue_state: CueState::CREATED,
                bank_state: CueState::empty(),
                next_handle: 0,
            }),
        })
    }

    pub fn with_output_channels(self: Arc<Self>, channels: u16) -> Arc<Self> {
        self.inner.lock().output_channels = channels;
        self
    }

    pub fn with_cue(self: Arc<Self>, name: &str) -> Arc<Self> {
        self.inner.lock().cues.push(name.to_string());
        self
    }

    pub fn with_cue_variable(self: Arc<Self>, name: &str, value: f32) -> Arc<Self> {
        self.inner
            .lock()
            .cue_variables
            .push((name.to_string(), value));
        self
    }

    pub fn with_global_variable(self: Arc<Self>, name: &str, value: f32) -> Arc<Self> {
        self.inner
            .lock()
            .global_variables
            .push((name.to_string(), value));
        self
    }

    /// State reported for every cue from now on.
    pub fn set_cue_state(&self, state: CueState) {
        self.inner.lock().cue_state = state;
    }

    pub fn set_bank_state(&self, state: CueState) {
        self.inner.lock().bank_state = state;
    }

    pub fn mark(&self, label: &'static str) {
        self.record(Call::Marker(label));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().calls.clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|&call| predicate(call))
            .count()
    }

    /// Play, pause, and stop calls only.
    pub fn control_calls(&self) -> Vec<Call> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Play(_) | Call::Pause(..) | Call::Stop(..)))
            .cloned()
            .collect()
    }

    fn record(&self, call: Call) {
        self.inner.lock().calls.push(call);
    }
}

fn find_index(table: &[(String, f32)], name: &str) -> VariableIndex {
    table
        .iter()
        .position(|(entry, _)| entry == name)
        .map_or(VariableIndex::INVALID, |i| VariableIndex::new(i as u16))
}

impl CueBackend for RecordingBackend {
    fn create_engine(&self) -> Result<EngineHandle> {
        let mut inner = self.inner.lock();
        inner.calls.push(Call::CreateEngine);
        Ok(EngineHandle::from_raw(inner.next_handle()))
    }

    fn shut_down_engine(&self, engine: EngineHandle) {
        self.record(Call::ShutDownEngine(engine));
    }

    fn initialize_3d(&self, engine: EngineHandle, _speed_of_sound: f32) -> Result<Engine3dHandle> {
        let mut inner = self.inner.lock();
        inner.calls.push(Call::Initialize3d(engine));
        Ok(Engine3dHandle::from_raw(inner.next_handle()))
    }

    fn output_channels(&self, _engine: EngineHandle) -> u16 {
        self.inner.lock().output_channels
    }

    fn update_engine(&self, engine: EngineHandle) {
        self.record(Call::UpdateEngine(engine));
    }

    fn global_variable_index(&self, _engine: EngineHandle, name: &str) -> VariableIndex {
        let mut inner = self.inner.lock();
        inner.calls.push(Call::GlobalVariableIndex(name.to_string()));
        find_index(&inner.global_variables, name)
    }

    fn global_variable(&self, _engine: EngineHandle, index: VariableIndex) -> f32 {
        let mut inner = self.inner.lock();
        inner.calls.push(Call::GlobalVariable(index));
        inner.global_variables[usize::from(index.get())].1
    }

    fn set_global_variable(&self, _engine: EngineHandle, index: VariableIndex, value: f32) {
        let mut inner = self.inner.lock();
        inner.calls.push(Call::SetGlobalVariable(index, value));
        inner.global_variables[usize::from(index.get())].1 = value;
    }

    fn create_sound_bank(&self, _engine: EngineHandle, data: &[u8]) -> Result<SoundBankHandle> {
        let mut inner = self.inner.lock();
        inner.calls.push(Call::CreateSoundBank(data.len()));
        Ok(SoundBankHandle::from_raw(inner.next_handle()))
    }

    fn destroy_sound_bank(&self, bank: SoundBankHandle) {
        self.record(Call::DestroySoundBank(bank));
    }

    fn sound_bank_state(&self, bank: SoundBankHandle) -> CueState {
        let mut inner = self.inner.lock();
        inner.calls.push(Call::SoundBankState(bank));
        inner.bank_state
    }

    fn cue_index(&self, _bank: SoundBankHandle, name: &str) -> CueIndex {
        let mut inner = self.inner.lock();
        inner.calls.push(Call::CueIndex(name.to_string()));
        inner
            .cues
            .iter()
            .position(|cue| cue == name)
            .map_or(CueIndex::INVALID, |i| CueIndex::new(i as u16))
    }

    fn prepare_cue(&self, bank: SoundBankHandle, index: CueIndex) -> Result<CueHandle> {
        let mut inner = self.inner.lock();
        inner.calls.push(Call::PrepareCue(bank, index));
        Ok(CueHandle::from_raw(inner.next_handle()))
    }

    fn play_cue_index(&self, _bank: SoundBankHandle, index: CueIndex) -> Result<()> {
        self.record(Call::PlayCueIndex(index));
        Ok(())
    }

    fn cue_state(&self, cue: CueHandle) -> CueState {
        let mut inner = self.inner.lock();
        inner.calls.push(Call::CueState(cue));
        inner.cue_state
    }

    fn destroy_cue(&self, cue: CueHandle) {
        self.record(Call::DestroyCue(cue));
    }

    fn variable_index(&self, cue: CueHandle, name: &str) -> VariableIndex {
        let mut inner = self.inner.lock();
        inner.calls.push(Call::VariableIndex(cue, name.to_string()));
        find_index(&inner.cue_variables, name)
    }

    fn variable(&self, cue: CueHandle, index: VariableIndex) -> f32 {
        let mut inner = self.inner.lock();
        inner.calls.push(Call::Variable(cue, index));
        inner.cue_variables[usize::from(index.get())].1
    }

    fn set_variable(&self, cue: CueHandle, index: VariableIndex, value: f32) {
        let mut inner = self.inner.lock();
        inner.calls.push(Call::SetVariable(cue, index, value));
        inner.cue_variables[usize::from(index.get())].1 = value;
    }

    fn play(&self, cue: CueHandle) {
        self.record(Call::Play(cue));
    }

    fn pause(&self, cue: CueHandle, paused: bool) {
        self.record(Call::Pause(cue, paused));
    }

    fn stop(&self, cue: CueHandle, flag: StopFlag) {
        self.record(Call::Stop(cue, flag));
    }

    fn calculate_3d(
        &self,
        _engine_3d: Engine3dHandle,
        _listener: &AudioListener,
        _emitter: &AudioEmitter,
        settings: &mut DspSettings,
    ) {
        self.record(Call::Calculate3d {
            src: settings.src_channel_count,
            dst: settings.dst_channel_count,
        });
        settings.matrix_coefficients.fill(1.0);
    }

    fn apply_3d(&self, _settings: &DspSettings, cue: CueHandle) {
        self.record(Call::Apply3d(cue));
    }
}

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cueplay_audio=debug".into()),
        )
        .with_test_writer()
        .try_init();
}
