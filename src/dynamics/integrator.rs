use glam::Vec2;

use crate::{core::body::PhysicsBody, error::Result, utils::allocator::Arena};

/// Advances dynamic bodies by one integration step.
///
/// Velocities are expressed per step, so no time factor is applied.
#[derive(Debug, Clone, Default)]
pub struct Integrator {
    parallel: bool,
}

impl Integrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_parallel(&mut self, enabled: bool) {
        self.parallel = enabled;
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Applies pending correction, gravity, and velocity to one body, then
    /// refreshes its cached world shape. Non-dynamic bodies are untouched.
    pub fn integrate_body(body: &mut PhysicsBody, gravity: Vec2) -> Result<()> {
        if !body.is_dynamic() {
            return Ok(());
        }

        body.apply_position_correction();
        body.velocity -= gravity * body.gravity_scale;
        body.translate_world(body.velocity);
        if body.angular_velocity != 0.0 {
            body.set_rotation(body.rotation() + body.angular_velocity);
        }
        body.refresh_shape()
    }

    pub fn step(&self, bodies: &mut Arena<PhysicsBody>, gravity: Vec2) -> Result<()> {
        if self.parallel {
            return Self::step_parallel(bodies, gravity);
        }
        Self::step_sequential(bodies, gravity)
    }

    fn step_sequential(bodies: &mut Arena<PhysicsBody>, gravity: Vec2) -> Result<()> {
        for body in bodies.values_mut() {
            Self::integrate_body(body, gravity)?;
        }
        Ok(())
    }

    #[cfg(feature = "parallel")]
    fn step_parallel(bodies: &mut Arena<PhysicsBody>, gravity: Vec2) -> Result<()> {
        use rayon::prelude::*;
        bodies
            .par_values_mut()
            .try_for_each(|body| Self::integrate_body(body, gravity))
    }

    #[cfg(not(feature = "parallel"))]
    fn step_parallel(bodies: &mut Arena<PhysicsBody>, gravity: Vec2) -> Result<()> {
        Self::step_sequential(bodies, gravity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{shape::Shape, types::InheritedTransform};
    use approx::assert_relative_eq;

    #[test]
    fn velocity_accumulates_negated_gravity() {
        let mut body = PhysicsBody::new(Shape::circle(1.0)).unwrap();
        Integrator::integrate_body(&mut body, Vec2::new(0.0, -0.5)).unwrap();
        assert_eq!(body.velocity, Vec2::new(0.0, 0.5));
        assert_eq!(body.position(), Vec2::new(0.0, 0.5));

        Integrator::integrate_body(&mut body, Vec2::new(0.0, -0.5)).unwrap();
        assert_eq!(body.position(), Vec2::new(0.0, 1.5));
    }

    #[test]
    fn gravity_scale_is_per_axis() {
        let mut body = PhysicsBody::builder(Shape::circle(1.0))
            .gravity_scale(Vec2::new(1.0, 0.0))
            .build()
            .unwrap();
        Integrator::integrate_body(&mut body, Vec2::new(-1.0, -1.0)).unwrap();
        assert_eq!(body.velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn static_bodies_do_not_move() {
        let mut body = PhysicsBody::builder(Shape::rectangle(2.0, 2.0))
            .dynamic(false)
            .velocity(Vec2::new(3.0, 0.0))
            .build()
            .unwrap();
        Integrator::integrate_body(&mut body, Vec2::new(0.0, -1.0)).unwrap();
        assert_eq!(body.position(), Vec2::ZERO);
    }

    #[test]
    fn rotation_refreshes_rectangle_vertices() {
        let mut body = PhysicsBody::builder(Shape::rectangle(2.0, 2.0))
            .angular_velocity(std::f32::consts::FRAC_PI_4)
            .gravity_scale(Vec2::ZERO)
            .build()
            .unwrap();
        Integrator::integrate_body(&mut body, Vec2::ZERO).unwrap();

        assert!(!body.is_shape_dirty());
        let top = body
            .world_shape()
            .vertices()
            .iter()
            .map(|v| v.y)
            .fold(f32::MIN, f32::max);
        assert_relative_eq!(top, std::f32::consts::SQRT_2, epsilon = 1e-5);
    }

    #[test]
    fn pending_correction_is_applied_before_velocity() {
        let mut body = PhysicsBody::builder(Shape::circle(1.0))
            .velocity(Vec2::new(1.0, 0.0))
            .gravity_scale(Vec2::ZERO)
            .build()
            .unwrap();
        body.total_position_correction = Vec2::new(0.0, 2.0);
        Integrator::integrate_body(&mut body, Vec2::ZERO).unwrap();
        assert_eq!(body.position(), Vec2::new(1.0, 2.0));
        assert_eq!(body.total_position_correction, Vec2::ZERO);
    }

    #[test]
    fn world_velocity_moves_bodies_under_a_transformed_parent() {
        let mut body = PhysicsBody::builder(Shape::circle(1.0))
            .velocity(Vec2::new(1.0, 0.0))
            .gravity_scale(Vec2::ZERO)
            .inherited(InheritedTransform {
                position: Vec2::new(5.0, 5.0),
                rotation: std::f32::consts::FRAC_PI_2,
                scale: Vec2::splat(2.0),
            })
            .build()
            .unwrap();
        body.total_position_correction = Vec2::new(0.0, 0.5);
        let before = body.world_center();

        Integrator::integrate_body(&mut body, Vec2::ZERO).unwrap();

        let moved = body.world_center() - before;
        assert_relative_eq!(moved.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(moved.y, 0.5, epsilon = 1e-5);
        assert_relative_eq!(body.world_shape().center().x, before.x + 1.0, epsilon = 1e-5);
    }

    #[test]
    fn sequential_and_parallel_steps_agree() {
        let mut sequential = Arena::new();
        let mut parallel = Arena::new();
        for i in 0..32 {
            let body = PhysicsBody::builder(Shape::circle(1.0))
                .position(Vec2::new(i as f32, 0.0))
                .velocity(Vec2::new(0.0, i as f32 * 0.1))
                .build()
                .unwrap();
            sequential.insert(body.clone());
            parallel.insert(body);
        }

        let gravity = Vec2::new(0.0, -0.01);
        Integrator::new().step(&mut sequential, gravity).unwrap();
        let mut threaded = Integrator::new();
        threaded.set_parallel(true);
        threaded.step(&mut parallel, gravity).unwrap();

        let a: Vec<Vec2> = sequential.iter().map(|(_, b)| b.position()).collect();
        let b: Vec<Vec2> = parallel.iter().map(|(_, b)| b.position()).collect();
        assert_eq!(a, b);
    }
}
