//! Global configuration constants and the per-world configuration surface.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};

/// Upper bound on concurrently live physics ids. Ids are `u8`, and the pair
/// cache is sized as `triangular(max_bodies)` bits.
pub const PHYSICS_ID_MAX: usize = 256;

/// Default gravity, in units per step. Velocities subtract it every tick.
pub const DEFAULT_GRAVITY: [f32; 2] = [0.0, -0.00981];

/// Default fixed step period (in seconds).
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// Largest amount of wall-clock time the accumulator may hold (in seconds).
pub const MAX_ACCUMULATED_TIME: f32 = 0.030;

/// Penetration depth tolerated before positional correction kicks in.
pub const POSITION_SLOP: f32 = 0.1;

/// Fraction of the penetration removed per correction.
pub const POSITION_CORRECTION_PERCENT: f32 = 0.2;

/// Tangential impulses smaller than this are skipped.
pub const FRICTION_IMPULSE_EPSILON: f32 = 1e-6;

/// How overlap beyond the slop gets worked off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CorrectionMode {
    /// Inject a velocity-space bias impulse in the same step.
    #[default]
    VelocityBias,
    /// Accumulate a position offset applied at the next integration.
    PositionProjection,
}

/// Tunables of a [`crate::PhysicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub gravity: Vec2,
    pub time_step: f32,
    pub max_accumulated_time: f32,
    pub max_bodies: usize,
    pub slop: f32,
    pub correction_percent: f32,
    pub correction_mode: CorrectionMode,
    /// Run one more fixed update after the catch-up loop on every tick.
    pub trailing_update: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::from_array(DEFAULT_GRAVITY),
            time_step: DEFAULT_TIME_STEP,
            max_accumulated_time: MAX_ACCUMULATED_TIME,
            max_bodies: PHYSICS_ID_MAX,
            slop: POSITION_SLOP,
            correction_percent: POSITION_CORRECTION_PERCENT,
            correction_mode: CorrectionMode::default(),
            trailing_update: true,
        }
    }
}

impl WorldConfig {
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_time_step(mut self, time_step: f32) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_max_bodies(mut self, max_bodies: usize) -> Self {
        self.max_bodies = max_bodies;
        self
    }

    pub fn with_correction_mode(mut self, mode: CorrectionMode) -> Self {
        self.correction_mode = mode;
        self
    }

    pub fn with_trailing_update(mut self, enabled: bool) -> Self {
        self.trailing_update = enabled;
        self
    }

    /// Checks the bounds that size world storage.
    pub fn validate(&self) -> Result<()> {
        if self.max_bodies > PHYSICS_ID_MAX {
            return Err(PhysicsError::CapacityTooLarge {
                requested: self.max_bodies,
                max: PHYSICS_ID_MAX,
            });
        }
        if !(self.time_step > 0.0 && self.time_step.is_finite()) {
            return Err(PhysicsError::InvalidTimeStep(self.time_step));
        }
        if !(self.max_accumulated_time > 0.0 && self.max_accumulated_time.is_finite()) {
            return Err(PhysicsError::InvalidSetting {
                what: "max_accumulated_time",
                value: self.max_accumulated_time,
            });
        }
        if !(self.slop >= 0.0 && self.slop.is_finite()) {
            return Err(PhysicsError::InvalidSetting {
                what: "slop",
                value: self.slop,
            });
        }
        if !(0.0..=1.0).contains(&self.correction_percent) {
            return Err(PhysicsError::InvalidSetting {
                what: "correction_percent",
                value: self.correction_percent,
            });
        }
        Ok(())
    }
}
