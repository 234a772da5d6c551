//! Sound bank handle: owns a native bank and hands out cues.

#![allow(clippy::unwrap_used)] // Tests use unwrap for brevity

use crate::backend::CueBackend;
use crate::cue::Cue;
use crate::engine::{AudioEngine, DisposalStats, EngineShared};
use cueplay_core::{AudioEmitter, AudioListener, CueIndex, CueState, Error, Result, SoundBankHandle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, trace, warn};

/// State a cue looks at to decide whether its native handle may be destroyed.
pub(crate) struct BankShared {
    pub(crate) handle: SoundBankHandle,
    pub(crate) engine: Weak<EngineShared>,
    disposed: AtomicBool,
}

impl BankShared {
    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// The live engine, if neither this bank nor the engine is disposed.
    pub(crate) fn live_engine(&self) -> Option<Arc<EngineShared>> {
        if self.is_disposed() {
            return None;
        }
        self.engine.upgrade().filter(|engine| !engine.is_disposed())
    }
}

/// Handle to a native sound bank.
pub struct SoundBank {
    shared: Arc<BankShared>,
    backend: Arc<dyn CueBackend>,
    stats: Arc<DisposalStats>,
    warn_on_implicit_dispose: bool,
}

impl SoundBank {
    /// Load a sound bank into `engine`. The content bytes are passed through
    /// to the backend untouched.
    pub fn new(engine: &AudioEngine, data: &[u8]) -> Result<Self> {
        if engine.is_disposed() {
            return Err(Error::Disposed("audio engine"));
        }
        if data.is_empty() {
            return Err(Error::invalid_argument("data", "must not be empty"));
        }

        let engine_shared = engine.shared();
        let backend = Arc::clone(&engine_shared.backend);
        let handle = backend.create_sound_bank(engine_shared.handle, data)?;
        debug!("Loaded {handle} ({} bytes)", data.len());

        Ok(Self {
            shared: Arc::new(BankShared {
                handle,
                engine: Arc::downgrade(engine_shared),
                disposed: AtomicBool::new(false),
            }),
            backend,
            stats: Arc::clone(&engine_shared.stats),
            warn_on_implicit_dispose: engine_shared.config.warn_on_implicit_dispose,
        })
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.is_disposed()
    }

    /// Whether the backend still has cues from this bank playing or prepared.
    pub fn is_in_use(&self) -> Result<bool> {
        self.ensure_alive()?;
        Ok(self
            .backend
            .sound_bank_state(self.shared.handle)
            .contains(CueState::IN_USE))
    }

    /// Prepare a cue by name. The caller owns the returned cue.
    pub fn get_cue(&self, name: &str) -> Result<Cue> {
        let index = self.resolve_cue(name)?;
        let handle = self.backend.prepare_cue(self.shared.handle, index)?;
        trace!("Prepared cue {name:?} as {handle}");
        Ok(Cue::new(
            handle,
            name.to_string(),
            Arc::downgrade(&self.shared),
            Arc::clone(&self.backend),
            Arc::clone(&self.stats),
            self.warn_on_implicit_dispose,
        ))
    }

    /// Play a cue by name without keeping a handle to it.
    pub fn play_cue(&self, name: &str) -> Result<()> {
        let index = self.resolve_cue(name)?;
        self.backend.play_cue_index(self.shared.handle, index)
    }

    /// Prepare a cue, position it in 3D, and start it. The caller owns the
    /// returned cue and decides when it is released.
    pub fn play_cue_3d(
        &self,
        name: &str,
        listener: &AudioListener,
        emitter: &AudioEmitter,
    ) -> Result<Cue> {
        listener.validate()?;
        emitter.validate()?;
        let mut cue = self.get_cue(name)?;
        if let Err(e) = cue.apply_3d(listener, emitter).and_then(|()| cue.play()) {
            cue.dispose();
            return Err(e);
        }
        Ok(cue)
    }

    fn resolve_cue(&self, name: &str) -> Result<CueIndex> {
        self.ensure_alive()?;
        if self.shared.live_engine().is_none() {
            return Err(Error::Disposed("audio engine"));
        }
        if name.is_empty() {
            return Err(Error::invalid_argument("name", "must not be empty"));
        }
        let index = self.backend.cue_index(self.shared.handle, name);
        if !index.is_valid() {
            return Err(Error::InvalidOperation(format!("Invalid cue name: {name}")));
        }
        Ok(index)
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.is_disposed() {
            return Err(Error::Disposed("sound bank"));
        }
        Ok(())
    }

    /// Release the native bank. Safe to call more than once.
    ///
    /// The native bank is only destroyed while its engine is still running;
    /// otherwise the handle is leaked and counted in the engine's stats.
    pub fn dispose(&mut self) {
        if self.shared.disposed.load(Ordering::Acquire) {
            return;
        }

        let engine_alive = self
            .shared
            .engine
            .upgrade()
            .is_some_and(|engine| !engine.is_disposed());
        self.shared.disposed.store(true, Ordering::Release);

        if engine_alive {
            debug!("Destroying {}", self.shared.handle);
            self.backend.destroy_sound_bank(self.shared.handle);
        } else {
            warn!(
                "Engine already disposed, leaking {} instead of destroying it",
                self.shared.handle
            );
            self.stats.record_leaked_sound_bank();
        }
    }
}

impl Drop for SoundBank {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for SoundBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundBank")
            .field("handle", &self.shared.handle)
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}
