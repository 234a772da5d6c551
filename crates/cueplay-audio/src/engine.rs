//! Audio engine handle: owns the native engine and its 3D context.

#![allow(clippy::unwrap_used)] // Tests use unwrap for brevity

use crate::backend::CueBackend;
use crate::config::EngineConfig;
use cueplay_core::{Engine3dHandle, EngineHandle, Error, Result, VariableIndex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Counters for native resources that were not released cleanly.
///
/// Shared with every bank and cue of an engine so they can still report
/// after the engine itself is gone.
#[derive(Debug, Default)]
pub struct DisposalStats {
    leaked_cues: AtomicUsize,
    leaked_sound_banks: AtomicUsize,
    implicit_disposals: AtomicUsize,
}

impl DisposalStats {
    /// Cues whose native handle was skipped because the bank or engine was gone.
    pub fn leaked_cues(&self) -> usize {
        self.leaked_cues.load(Ordering::Relaxed)
    }

    /// Sound banks whose native handle was skipped because the engine was gone.
    pub fn leaked_sound_banks(&self) -> usize {
        self.leaked_sound_banks.load(Ordering::Relaxed)
    }

    /// Cues disposed by `Drop` instead of an explicit `dispose()`.
    pub fn implicit_disposals(&self) -> usize {
        self.implicit_disposals.load(Ordering::Relaxed)
    }

    pub(crate) fn record_leaked_cue(&self) {
        self.leaked_cues.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_leaked_sound_bank(&self) {
        self.leaked_sound_banks.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_implicit_disposal(&self) {
        self.implicit_disposals.fetch_add(1, Ordering::Relaxed);
    }
}

/// State shared between an engine and the banks created from it.
pub(crate) struct EngineShared {
    pub(crate) backend: Arc<dyn CueBackend>,
    pub(crate) handle: EngineHandle,
    pub(crate) handle_3d: Engine3dHandle,
    pub(crate) channels: u16,
    pub(crate) config: EngineConfig,
    pub(crate) stats: Arc<DisposalStats>,
    disposed: AtomicBool,
}

impl EngineShared {
    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

/// Handle to a native audio engine.
///
/// Sound banks and cues only hold weak references to the engine; dropping
/// the engine shuts the native engine down even while they are alive.
pub struct AudioEngine {
    shared: Arc<EngineShared>,
}

impl AudioEngine {
    /// Create a native engine and its 3D context.
    pub fn new(backend: Arc<dyn CueBackend>, config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let handle = backend.create_engine()?;
        let handle_3d = match backend.initialize_3d(handle, config.speed_of_sound) {
            Ok(handle_3d) => handle_3d,
            Err(e) => {
                backend.shut_down_engine(handle);
                return Err(e);
            }
        };
        let channels = config
            .output_channels
            .unwrap_or_else(|| backend.output_channels(handle));
        if channels == 0 {
            backend.shut_down_engine(handle);
            return Err(Error::Backend(
                "engine reported zero output channels".to_string(),
            ));
        }

        info!("Audio engine initialized: {handle}, {channels} output channels");

        Ok(Self {
            shared: Arc::new(EngineShared {
                backend,
                handle,
                handle_3d,
                channels,
                config,
                stats: Arc::new(DisposalStats::default()),
                disposed: AtomicBool::new(false),
            }),
        })
    }

    pub(crate) const fn shared(&self) -> &Arc<EngineShared> {
        &self.shared
    }

    /// Number of output channels 3D mixes are computed for.
    pub fn channels(&self) -> u16 {
        self.shared.channels
    }

    pub fn config(&self) -> &EngineConfig {
        &self.shared.config
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.is_disposed()
    }

    /// Leak and implicit-disposal counters for this engine's resources.
    pub fn stats(&self) -> &DisposalStats {
        &self.shared.stats
    }

    /// Run periodic engine work. Call once per frame.
    pub fn update(&self) -> Result<()> {
        self.ensure_alive()?;
        trace!("Updating {}", self.shared.handle);
        self.shared.backend.update_engine(self.shared.handle);
        Ok(())
    }

    /// Read a global variable by name.
    pub fn get_global_variable(&self, name: &str) -> Result<f32> {
        let index = self.resolve_global_variable(name)?;
        Ok(self.shared.backend.global_variable(self.shared.handle, index))
    }

    /// Write a global variable by name.
    pub fn set_global_variable(&self, name: &str, value: f32) -> Result<()> {
        let index = self.resolve_global_variable(name)?;
        self.shared
            .backend
            .set_global_variable(self.shared.handle, index, value);
        Ok(())
    }

    fn resolve_global_variable(&self, name: &str) -> Result<VariableIndex> {
        self.ensure_alive()?;
        if name.is_empty() {
            return Err(Error::invalid_argument("name", "must not be empty"));
        }
        let index = self
            .shared
            .backend
            .global_variable_index(self.shared.handle, name);
        if !index.is_valid() {
            return Err(Error::InvalidOperation(format!(
                "Invalid variable name: {name}"
            )));
        }
        Ok(index)
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.is_disposed() {
            return Err(Error::Disposed("audio engine"));
        }
        Ok(())
    }

    /// Shut the native engine down. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.shared.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        debug!("Disposing {}", self.shared.handle);
        self.shared.backend.shut_down_engine(self.shared.handle);
        info!("Audio engine shut down");
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for AudioEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioEngine")
            .field("handle", &self.shared.handle)
            .field("channels", &self.shared.channels)
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}
