use glam::Vec2;

use crate::{
    config::FRICTION_IMPULSE_EPSILON,
    core::{body::PhysicsBody, types::Material},
};

/// Tangential impulse opposing the sliding component of `relative_velocity`.
///
/// The coefficient is `sqrt(friction_a + friction_b)`. Returns `None` when
/// there is no tangential motion or the impulse would be negligible.
pub fn friction_impulse(
    relative_velocity: Vec2,
    normal: Vec2,
    inv_mass_sum: f32,
    material_a: &Material,
    material_b: &Material,
) -> Option<Vec2> {
    if inv_mass_sum <= 0.0 {
        return None;
    }

    let tangent =
        (relative_velocity - normal * relative_velocity.dot(normal)).try_normalize()?;
    let jt = -relative_velocity.dot(tangent) / inv_mass_sum;
    if jt.abs() <= FRICTION_IMPULSE_EPSILON {
        return None;
    }

    let mu = Material::mix_friction(material_a, material_b);
    Some(tangent * jt * mu)
}

/// Applies Coulomb-style friction to a resolved pair using their current
/// velocities. Subtracted from A, added to B, each scaled by inverse mass.
pub fn apply_friction(
    body_a: &mut PhysicsBody,
    body_b: &mut PhysicsBody,
    normal: Vec2,
) -> Option<Vec2> {
    let inv_mass_a = body_a.inverse_mass();
    let inv_mass_b = body_b.inverse_mass();
    let relative_velocity = body_b.velocity - body_a.velocity;

    let impulse = friction_impulse(
        relative_velocity,
        normal,
        inv_mass_a + inv_mass_b,
        &body_a.material,
        &body_b.material,
    )?;

    body_a.velocity -= impulse * inv_mass_a;
    body_b.velocity += impulse * inv_mass_b;
    Some(impulse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shape::Shape;
    use approx::assert_relative_eq;

    #[test]
    fn friction_opposes_tangential_sliding() {
        let material = Material::new(0.25, 0.0);
        let impulse = friction_impulse(Vec2::new(5.0, 0.0), Vec2::Y, 2.0, &material, &material)
            .expect("sliding pair produces friction");

        assert!(impulse.x < 0.0);
        assert_relative_eq!(impulse.x, -2.5 * 0.5f32.sqrt(), epsilon = 1e-5);
        assert_relative_eq!(impulse.y, 0.0);
    }

    #[test]
    fn purely_normal_motion_has_no_friction() {
        let material = Material::new(1.0, 0.0);
        assert!(
            friction_impulse(Vec2::new(0.0, -3.0), Vec2::Y, 1.0, &material, &material).is_none()
        );
    }

    #[test]
    fn frictionless_materials_skip_the_impulse() {
        let material = Material::new(0.0, 0.0);
        assert!(
            friction_impulse(Vec2::new(4.0, 0.0), Vec2::Y, 1.0, &material, &material).is_none()
        );
    }

    #[test]
    fn apply_friction_slows_the_moving_body() {
        let mut floor = PhysicsBody::builder(Shape::rectangle(10.0, 1.0))
            .dynamic(false)
            .friction(0.5)
            .build()
            .unwrap();
        let mut puck = PhysicsBody::builder(Shape::circle(1.0))
            .velocity(Vec2::new(2.0, 0.0))
            .friction(0.5)
            .build()
            .unwrap();

        apply_friction(&mut floor, &mut puck, Vec2::Y).expect("puck slides");
        assert_eq!(floor.velocity, Vec2::ZERO);
        // mu = 1, so the whole tangential speed is removed.
        assert_relative_eq!(puck.velocity.x, 0.0, epsilon = 1e-6);
    }
}
