//! Listener and emitter descriptions for 3D cue positioning.

#![allow(clippy::unwrap_used)] // Tests use unwrap for brevity

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Three-component vector in world units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, -1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length_squared(&self) -> f32 {
        self.z.mul_add(self.z, self.x.mul_add(self.x, self.y * self.y))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Where the player hears from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AudioListener {
    pub forward: Vector3,
    pub up: Vector3,
    pub position: Vector3,
    pub velocity: Vector3,
}

impl Default for AudioListener {
    fn default() -> Self {
        Self {
            forward: Vector3::FORWARD,
            up: Vector3::UP,
            position: Vector3::ZERO,
            velocity: Vector3::ZERO,
        }
    }
}

impl AudioListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that the listener can be handed to the 3D calculation.
    pub fn validate(&self) -> Result<()> {
        validate_frame("listener", self.forward, self.up, self.position, self.velocity)
    }
}

/// Where a sound comes from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AudioEmitter {
    pub forward: Vector3,
    pub up: Vector3,
    pub position: Vector3,
    pub velocity: Vector3,
    /// Scales the Doppler shift for this emitter.
    #[serde(default = "default_doppler_scale")]
    pub doppler_scale: f32,
}

const fn default_doppler_scale() -> f32 {
    1.0
}

impl Default for AudioEmitter {
    fn default() -> Self {
        Self {
            forward: Vector3::FORWARD,
            up: Vector3::UP,
            position: Vector3::ZERO,
            velocity: Vector3::ZERO,
            doppler_scale: default_doppler_scale(),
        }
    }
}

impl AudioEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that the emitter can be handed to the 3D calculation.
    pub fn validate(&self) -> Result<()> {
        validate_frame("emitter", self.forward, self.up, self.position, self.velocity)?;
        if !self.doppler_scale.is_finite() || self.doppler_scale < 0.0 {
            return Err(Error::invalid_argument(
                "emitter",
                format!("doppler scale must be finite and non-negative, got {}", self.doppler_scale),
            ));
        }
        Ok(())
    }
}

fn validate_frame(
    name: &'static str,
    forward: Vector3,
    up: Vector3,
    position: Vector3,
    velocity: Vector3,
) -> Result<()> {
    let vectors = [
        ("forward", forward),
        ("up", up),
        ("position", position),
        ("velocity", velocity),
    ];
    for (field, vector) in vectors {
        if !vector.is_finite() {
            return Err(Error::invalid_argument(
                name,
                format!("{field} vector is not finite"),
            ));
        }
    }
    if forward.length_squared() == 0.0 {
        return Err(Error::invalid_argument(name, "forward vector has zero length"));
    }
    if up.length_squared() == 0.0 {
        return Err(Error::invalid_argument(name, "up vector has zero length"));
    }
    Ok(())
}
