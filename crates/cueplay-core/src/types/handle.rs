//! Opaque native handles and index types.
//!
//! Handles are plain integers minted by the audio backend. They carry no
//! ownership on their own; the wrapper types in `cueplay-audio` decide when
//! a handle is released.

use std::fmt;

macro_rules! native_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn as_raw(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{:x}", stringify!($name), self.0)
            }
        }
    };
}

native_handle!(
    /// Native audio engine instance.
    EngineHandle
);
native_handle!(
    /// Native 3D calculation context owned by an engine.
    Engine3dHandle
);
native_handle!(
    /// Native sound bank instance.
    SoundBankHandle
);
native_handle!(
    /// Native cue instance.
    CueHandle
);

/// Index of a cue or global variable, as resolved by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableIndex(u16);

impl VariableIndex {
    /// Sentinel the backend returns for an unknown variable name.
    pub const INVALID: Self = Self(0xFFFF);

    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    pub const fn get(self) -> u16 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}

/// Index of a cue inside a sound bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CueIndex(u16);

impl CueIndex {
    /// Sentinel the backend returns for an unknown cue name.
    pub const INVALID: Self = Self(0xFFFF);

    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    pub const fn get(self) -> u16 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}
