use glam::Vec2;

use crate::{
    collision::contact::Contact,
    config::{CorrectionMode, WorldConfig},
    core::{body::PhysicsBody, types::Material},
    dynamics::friction::apply_friction,
};

/// Impulses applied to one resolved pair.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ResolvedImpulse {
    pub normal: f32,
    /// Positional correction magnitude, zero when the overlap is within slop.
    pub correction: f32,
    pub friction: Vec2,
}

/// Single-pass impulse solver for one contact at a time.
#[derive(Debug, Clone, Copy)]
pub struct ContactSolver {
    pub slop: f32,
    pub correction_percent: f32,
    pub mode: CorrectionMode,
}

impl Default for ContactSolver {
    fn default() -> Self {
        Self::from_config(&WorldConfig::default())
    }
}

impl ContactSolver {
    pub fn from_config(config: &WorldConfig) -> Self {
        Self {
            slop: config.slop,
            correction_percent: config.correction_percent,
            mode: config.correction_mode,
        }
    }

    /// Resolves `contact` between `body_a` and `body_b`.
    ///
    /// `contact` must carry the relative velocity of the pair (see
    /// [`Contact::with_velocities`]). Returns `None` without touching either
    /// body when neither can move.
    pub fn resolve(
        &self,
        body_a: &mut PhysicsBody,
        body_b: &mut PhysicsBody,
        contact: &Contact,
    ) -> Option<ResolvedImpulse> {
        let inv_mass_a = body_a.inverse_mass();
        let inv_mass_b = body_b.inverse_mass();
        let inv_mass_sum = inv_mass_a + inv_mass_b;
        if inv_mass_sum <= 0.0 {
            return None;
        }

        let normal = contact.normal;
        let bounciness = Material::mix_bounciness(&body_a.material, &body_b.material);
        let j = -(1.0 + bounciness) * contact.contact_velocity / inv_mass_sum;

        body_a.velocity -= normal * j * inv_mass_a;
        body_b.velocity += normal * j * inv_mass_b;

        let correction = if contact.penetration > self.slop {
            let magnitude = contact.penetration * self.correction_percent / inv_mass_sum;
            self.correct(body_a, body_b, normal * magnitude);
            magnitude
        } else {
            0.0
        };

        let friction = apply_friction(body_a, body_b, normal).unwrap_or(Vec2::ZERO);

        Some(ResolvedImpulse {
            normal: j,
            correction,
            friction,
        })
    }

    // Pushes A along -normal and B along +normal.
    fn correct(&self, body_a: &mut PhysicsBody, body_b: &mut PhysicsBody, push: Vec2) {
        let inv_mass_a = body_a.inverse_mass();
        let inv_mass_b = body_b.inverse_mass();
        match self.mode {
            CorrectionMode::VelocityBias => {
                body_a.velocity -= push * inv_mass_a;
                body_b.velocity += push * inv_mass_b;
            }
            CorrectionMode::PositionProjection => {
                body_a.total_position_correction -= push * inv_mass_a;
                body_b.total_position_correction += push * inv_mass_b;
            }
        }
    }
}
