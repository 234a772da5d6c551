//! Cue handle: one playable instance of a sound bank cue.
//!
//! A `Cue` owns its native handle and nothing else. It keeps a weak link to
//! the bank that prepared it, which is only consulted when the cue is
//! disposed: destroying a cue after its bank or engine has released the
//! native resources would be a use-after-free inside the engine, so in that
//! case the handle is leaked on purpose and counted in [`DisposalStats`].
//!
//! Every call after disposal fails with [`Error::Disposed`] instead of
//! reaching the backend with a dead handle.

#![allow(clippy::unwrap_used)] // Tests use unwrap for brevity

use crate::backend::CueBackend;
use crate::engine::DisposalStats;
use crate::sound_bank::BankShared;
use cueplay_core::{
    AudioEmitter, AudioListener, CueHandle, CueState, DspSettings, Error, Result, StopFlag,
    StopOptions, VariableIndex,
};
use std::sync::{Arc, Weak};
use tracing::{debug, trace, warn};

/// Callback run once, right before a cue's native handle is released.
pub type DisposingHandler = Box<dyn FnOnce(&Cue) + Send>;

/// A prepared cue from a [`SoundBank`](crate::SoundBank).
pub struct Cue {
    handle: CueHandle,
    name: String,
    bank: Option<Weak<BankShared>>,
    backend: Arc<dyn CueBackend>,
    stats: Arc<DisposalStats>,
    warn_on_implicit_dispose: bool,
    disposing: Vec<DisposingHandler>,
    disposed: bool,
}

impl Cue {
    pub(crate) fn new(
        handle: CueHandle,
        name: String,
        bank: Weak<BankShared>,
        backend: Arc<dyn CueBackend>,
        stats: Arc<DisposalStats>,
        warn_on_implicit_dispose: bool,
    ) -> Self {
        Self {
            handle,
            name,
            bank: Some(bank),
            backend,
            stats,
            warn_on_implicit_dispose,
            disposing: Vec::new(),
            disposed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Register a callback to run right before the native handle is released.
    pub fn on_disposing(&mut self, handler: impl FnOnce(&Self) + Send + 'static) -> Result<()> {
        if self.disposed {
            return Err(Error::Disposed("cue"));
        }
        self.disposing.push(Box::new(handler));
        Ok(())
    }

    // State queries. Each one asks the backend again; flags can overlap.

    /// All state flags currently reported for this cue.
    pub fn state(&self) -> Result<CueState> {
        let handle = self.live_handle()?;
        let state = self.backend.cue_state(handle);
        trace!("{handle} state: {state}");
        Ok(state)
    }

    pub fn is_created(&self) -> Result<bool> {
        Ok(self.state()?.is_created())
    }

    pub fn is_paused(&self) -> Result<bool> {
        Ok(self.state()?.is_paused())
    }

    pub fn is_playing(&self) -> Result<bool> {
        Ok(self.state()?.is_playing())
    }

    pub fn is_prepared(&self) -> Result<bool> {
        Ok(self.state()?.is_prepared())
    }

    pub fn is_preparing(&self) -> Result<bool> {
        Ok(self.state()?.is_preparing())
    }

    pub fn is_stopped(&self) -> Result<bool> {
        Ok(self.state()?.is_stopped())
    }

    pub fn is_stopping(&self) -> Result<bool> {
        Ok(self.state()?.is_stopping())
    }

    /// Position the cue relative to `listener`.
    ///
    /// The emitter is treated as mono; the mix targets every output channel
    /// of the owning engine.
    pub fn apply_3d(&self, listener: &AudioListener, emitter: &AudioEmitter) -> Result<()> {
        listener.validate()?;
        emitter.validate()?;
        let handle = self.live_handle()?;
        let engine = self
            .bank
            .as_ref()
            .and_then(Weak::upgrade)
            .and_then(|bank| bank.live_engine())
            .ok_or(Error::Disposed("audio engine"))?;

        let mut settings = DspSettings::new(1, u32::from(engine.channels));
        self.backend
            .calculate_3d(engine.handle_3d, listener, emitter, &mut settings);
        self.backend.apply_3d(&settings, handle);
        Ok(())
    }

    /// Read a cue variable by name.
    pub fn get_variable(&self, name: &str) -> Result<f32> {
        let handle = self.live_handle()?;
        let index = self.resolve_variable(handle, name)?;
        Ok(self.backend.variable(handle, index))
    }

    /// Write a cue variable by name.
    pub fn set_variable(&self, name: &str, value: f32) -> Result<()> {
        let handle = self.live_handle()?;
        let index = self.resolve_variable(handle, name)?;
        self.backend.set_variable(handle, index, value);
        Ok(())
    }

    fn resolve_variable(&self, handle: CueHandle, name: &str) -> Result<VariableIndex> {
        if name.is_empty() {
            return Err(Error::invalid_argument("name", "must not be empty"));
        }
        let index = self.backend.variable_index(handle, name);
        if !index.is_valid() {
            return Err(Error::InvalidOperation(format!(
                "Invalid variable name: {name}"
            )));
        }
        Ok(index)
    }

    pub fn play(&self) -> Result<()> {
        let handle = self.live_handle()?;
        debug!("Playing cue {:?} ({handle})", self.name);
        self.backend.play(handle);
        Ok(())
    }

    pub fn pause(&self) -> Result<()> {
        self.backend.pause(self.live_handle()?, true);
        Ok(())
    }

    pub fn resume(&self) -> Result<()> {
        self.backend.pause(self.live_handle()?, false);
        Ok(())
    }

    /// Stop the cue, either cutting it off or letting its release play out.
    pub fn stop(&self, options: StopOptions) -> Result<()> {
        let handle = self.live_handle()?;
        let flag = StopFlag::from(options);
        debug!("Stopping cue {:?} ({handle}) with {flag:?}", self.name);
        self.backend.stop(handle, flag);
        Ok(())
    }

    fn live_handle(&self) -> Result<CueHandle> {
        if self.disposed {
            return Err(Error::Disposed("cue"));
        }
        Ok(self.handle)
    }

    /// Release the cue. Safe to call more than once.
    pub fn dispose(&mut self) {
        self.dispose_inner(false);
    }

    fn dispose_inner(&mut self, implicit: bool) {
        if self.disposed {
            return;
        }

        if implicit && self.warn_on_implicit_dispose {
            warn!("Cue {:?} dropped without being disposed", self.name);
            self.stats.record_implicit_disposal();
        }

        for handler in std::mem::take(&mut self.disposing) {
            handler(&*self);
        }

        let owners_alive = self
            .bank
            .take()
            .and_then(|bank| bank.upgrade())
            .is_some_and(|bank| bank.live_engine().is_some());

        if owners_alive {
            debug!("Destroying cue {:?} ({})", self.name, self.handle);
            self.backend.destroy_cue(self.handle);
        } else {
            warn!(
                "Sound bank or engine already disposed, leaking cue {:?} ({})",
                self.name, self.handle
            );
            self.stats.record_leaked_cue();
        }

        self.disposed = true;
    }
}

impl Drop for Cue {
    fn drop(&mut self) {
        self.dispose_inner(true);
    }
}

impl std::fmt::Debug for Cue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cue")
            .field("name", &self.name)
            .field("handle", &self.handle)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}
