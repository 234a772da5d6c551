//! Cue state flags and stop options.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Set of cue state flags reported by the backend.
///
/// The flags are not mutually exclusive: a cue fading out reports both
/// `PLAYING` and `STOPPING` at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CueState(u32);

impl CueState {
    pub const CREATED: Self = Self(0x0000_0001);
    pub const PREPARING: Self = Self(0x0000_0002);
    pub const PREPARED: Self = Self(0x0000_0004);
    pub const PLAYING: Self = Self(0x0000_0008);
    pub const STOPPING: Self = Self(0x0000_0010);
    pub const STOPPED: Self = Self(0x0000_0020);
    pub const PAUSED: Self = Self(0x0000_0040);
    pub const IN_USE: Self = Self(0x0000_0080);
    pub const PREPARE_FAILED: Self = Self(0x8000_0000);

    const NAMED: [(Self, &'static str); 9] = [
        (Self::CREATED, "CREATED"),
        (Self::PREPARING, "PREPARING"),
        (Self::PREPARED, "PREPARED"),
        (Self::PLAYING, "PLAYING"),
        (Self::STOPPING, "STOPPING"),
        (Self::STOPPED, "STOPPED"),
        (Self::PAUSED, "PAUSED"),
        (Self::IN_USE, "IN_USE"),
        (Self::PREPARE_FAILED, "PREPARE_FAILED"),
    ];

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every flag in `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_created(self) -> bool {
        self.contains(Self::CREATED)
    }

    pub const fn is_preparing(self) -> bool {
        self.contains(Self::PREPARING)
    }

    pub const fn is_prepared(self) -> bool {
        self.contains(Self::PREPARED)
    }

    pub const fn is_playing(self) -> bool {
        self.contains(Self::PLAYING)
    }

    pub const fn is_stopping(self) -> bool {
        self.contains(Self::STOPPING)
    }

    pub const fn is_stopped(self) -> bool {
        self.contains(Self::STOPPED)
    }

    pub const fn is_paused(self) -> bool {
        self.contains(Self::PAUSED)
    }
}

impl BitOr for CueState {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CueState {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for CueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(empty)");
        }
        let mut first = true;
        for (flag, name) in Self::NAMED {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        let unknown = self.0 & !Self::NAMED.iter().fold(0, |acc, (flag, _)| acc | flag.0);
        if unknown != 0 {
            if !first {
                f.write_str(" | ")?;
            }
            write!(f, "{unknown:#x}")?;
        }
        Ok(())
    }
}

/// How a caller asks a cue to stop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StopOptions {
    /// Let authored release phases and fade-outs play out.
    #[default]
    AsAuthored,
    /// Cut the audio right away.
    Immediate,
}

/// Stop flag handed to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopFlag {
    Release,
    Immediate,
}

impl From<StopOptions> for StopFlag {
    fn from(options: StopOptions) -> Self {
        match options {
            StopOptions::Immediate => Self::Immediate,
            StopOptions::AsAuthored => Self::Release,
        }
    }
}
