use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Transform a body inherits from its ancestors in the host's node graph.
///
/// The node system resolves this once per frame and hands it to the body via
/// [`crate::PhysicsBody::set_inherited_transform`]. Identity by default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InheritedTransform {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for InheritedTransform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

impl InheritedTransform {
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn from_scale(scale: Vec2) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    /// Maps a point from the body's parent space into world space.
    pub fn transform_point(&self, local: Vec2) -> Vec2 {
        self.position + Vec2::from_angle(self.rotation).rotate(self.scale * local)
    }

    /// Maps a world-space displacement back into the parent space. Axes with
    /// zero scale collapse to zero.
    pub fn inverse_transform_vector(&self, world: Vec2) -> Vec2 {
        let unrotated = Vec2::from_angle(-self.rotation).rotate(world);
        let unscale = |value: f32, scale: f32| if scale == 0.0 { 0.0 } else { value / scale };
        Vec2::new(
            unscale(unrotated.x, self.scale.x),
            unscale(unrotated.y, self.scale.y),
        )
    }
}

/// World-space placement of a body's shape, after inheritance is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTransform {
    pub center: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
}

impl WorldTransform {
    pub fn resolve(inherited: &InheritedTransform, position: Vec2, rotation: f32) -> Self {
        Self {
            center: inherited.transform_point(position),
            rotation: inherited.rotation + rotation,
            scale: inherited.scale,
        }
    }
}

/// Surface coefficients that affect contact response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub friction: f32,
    /// Restitution, typically in `[0, 1]`.
    pub bounciness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            friction: 0.0,
            bounciness: 0.0,
        }
    }
}

impl Material {
    pub fn new(friction: f32, bounciness: f32) -> Self {
        Self {
            friction,
            bounciness,
        }
    }

    pub fn rubber() -> Self {
        Self::new(0.5, 0.8)
    }

    pub fn steel() -> Self {
        Self::new(0.2, 0.4)
    }

    pub fn ice() -> Self {
        Self::new(0.01, 0.05)
    }

    /// Restitution of a pair: the plain average.
    pub fn mix_bounciness(a: &Self, b: &Self) -> f32 {
        (a.bounciness + b.bounciness) * 0.5
    }

    /// Friction coefficient of a pair: the square root of the *sum*.
    pub fn mix_friction(a: &Self, b: &Self) -> f32 {
        (a.friction + b.friction).max(0.0).sqrt()
    }
}
