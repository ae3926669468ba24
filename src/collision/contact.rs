use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::utils::allocator::BodyHandle;

/// Transient result of one narrow-phase test. Nothing persists across updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from body A toward body B.
    pub normal: Vec2,
    /// Overlap depth along `normal`, zero when the shapes just touch.
    pub penetration: f32,
    /// Approximate single contact location.
    pub point: Vec2,
    /// `velocity_b - velocity_a`, filled in by the world.
    pub relative_velocity: Vec2,
    /// Relative velocity projected on the normal; negative when approaching.
    pub contact_velocity: f32,
}

impl Contact {
    pub fn new(normal: Vec2, penetration: f32, point: Vec2) -> Self {
        Self {
            normal,
            penetration,
            point,
            relative_velocity: Vec2::ZERO,
            contact_velocity: 0.0,
        }
    }

    /// Same contact seen from the other body.
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            relative_velocity: -self.relative_velocity,
            ..self
        }
    }

    pub fn with_velocities(self, velocity_a: Vec2, velocity_b: Vec2) -> Self {
        let relative_velocity = velocity_b - velocity_a;
        Self {
            relative_velocity,
            contact_velocity: relative_velocity.dot(self.normal),
            ..self
        }
    }

    /// Bodies already moving apart along the normal.
    pub fn is_separating(&self) -> bool {
        self.contact_velocity > 0.0
    }
}

/// Payload handed to `on_collide`. Both bodies of a pair receive the same
/// point and normal; only `partner` differs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub partner: BodyHandle,
    pub point: Vec2,
    pub normal: Vec2,
}
