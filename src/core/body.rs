use glam::Vec2;

use super::{
    shape::{Shape, WorldShape},
    types::{InheritedTransform, Material, WorldTransform},
};
use crate::error::{PhysicsError, Result};

/// Rigid body tracked by the physics world.
///
/// Transform fields sit behind setters so every change marks the cached
/// world shape stale; the world refreshes stale shapes before testing pairs.
#[derive(Debug, Clone)]
pub struct PhysicsBody {
    pub velocity: Vec2,
    pub angular_velocity: f32,
    pub material: Material,
    /// Participates in impulse resolution; non-solid bodies only report contacts.
    pub solid: bool,
    /// Per-axis gravity multiplier.
    pub gravity_scale: Vec2,
    /// Interaction layers (bits 0-31); pairs interact when their masks share a bit.
    pub collision_mask: u32,
    /// Positional fix-up applied and zeroed by the next integration.
    pub total_position_correction: Vec2,
    /// Opaque value for the host to map handles back to its own objects.
    pub user_data: u64,
    pub(crate) physics_id: u8,
    position: Vec2,
    rotation: f32,
    inherited: InheritedTransform,
    mass: f32,
    inverse_mass: f32,
    inverse_moment_of_inertia: f32,
    dynamic: bool,
    shape: Shape,
    world_shape: WorldShape,
    shape_dirty: bool,
}

impl PhysicsBody {
    /// Creates a dynamic, solid body of unit mass at the origin.
    pub fn new(shape: Shape) -> Result<Self> {
        Self::builder(shape).build()
    }

    pub fn builder(shape: Shape) -> BodyBuilder {
        BodyBuilder::new(shape)
    }

    pub fn physics_id(&self) -> u8 {
        self.physics_id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.shape_dirty = true;
    }

    /// Moves the body by `delta`, given in its parent space.
    pub fn translate(&mut self, delta: Vec2) {
        self.set_position(self.position + delta);
    }

    /// Moves the body by a world-space `delta`, such as a velocity or a
    /// contact correction.
    pub fn translate_world(&mut self, delta: Vec2) {
        self.translate(self.inherited.inverse_transform_vector(delta));
    }

    /// Rotation in radians.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
        self.shape_dirty = true;
    }

    pub fn inherited_transform(&self) -> &InheritedTransform {
        &self.inherited
    }

    /// Installs the transform resolved by the host's node graph and
    /// recomputes the world shape immediately.
    pub fn set_inherited_transform(&mut self, inherited: InheritedTransform) -> Result<()> {
        self.inherited = inherited;
        self.refresh_shape()
    }

    pub fn world_transform(&self) -> WorldTransform {
        WorldTransform::resolve(&self.inherited, self.position, self.rotation)
    }

    /// World-space center of the shape.
    pub fn world_center(&self) -> Vec2 {
        self.world_transform().center
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn set_shape(&mut self, shape: Shape) -> Result<()> {
        shape.validate()?;
        self.shape = shape;
        self.recompute_inverses();
        self.refresh_shape()
    }

    /// Cached world geometry. May lag behind transform setters until the next
    /// [`Self::refresh_shape`].
    pub fn world_shape(&self) -> &WorldShape {
        &self.world_shape
    }

    pub fn is_shape_dirty(&self) -> bool {
        self.shape_dirty
    }

    /// Recomputes cached world vertices and normals from the current transform.
    pub fn refresh_shape(&mut self) -> Result<()> {
        self.world_shape = self.shape.compute_absolute(&self.world_transform())?;
        self.shape_dirty = false;
        Ok(())
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f32) -> Result<()> {
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(PhysicsError::InvalidDimension {
                what: "mass",
                value: mass,
            });
        }
        self.mass = mass;
        self.recompute_inverses();
        Ok(())
    }

    /// Zero for non-dynamic bodies.
    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    /// Zero for non-dynamic bodies. Stored for hosts; contacts apply no torque.
    pub fn inverse_moment_of_inertia(&self) -> f32 {
        self.inverse_moment_of_inertia
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    pub fn set_dynamic(&mut self, dynamic: bool) {
        self.dynamic = dynamic;
        self.recompute_inverses();
    }

    /// Moves the accumulated positional correction into the position.
    pub fn apply_position_correction(&mut self) {
        if self.total_position_correction != Vec2::ZERO {
            self.translate_world(self.total_position_correction);
            self.total_position_correction = Vec2::ZERO;
        }
    }

    fn recompute_inverses(&mut self) {
        if !self.dynamic {
            self.inverse_mass = 0.0;
            self.inverse_moment_of_inertia = 0.0;
            return;
        }
        self.inverse_mass = 1.0 / self.mass;
        let inertia = self.mass * self.shape.unit_inertia();
        self.inverse_moment_of_inertia = if inertia > f32::EPSILON {
            1.0 / inertia
        } else {
            0.0
        };
    }
}

pub struct BodyBuilder {
    shape: Shape,
    position: Vec2,
    rotation: f32,
    velocity: Vec2,
    angular_velocity: f32,
    mass: f32,
    material: Material,
    dynamic: bool,
    solid: bool,
    gravity_scale: Vec2,
    collision_mask: u32,
    inherited: InheritedTransform,
    user_data: u64,
}

impl BodyBuilder {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            position: Vec2::ZERO,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            mass: 1.0,
            material: Material::default(),
            dynamic: true,
            solid: true,
            gravity_scale: Vec2::ONE,
            collision_mask: 1,
            inherited: InheritedTransform::default(),
            user_data: 0,
        }
    }

    pub fn position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn friction(mut self, friction: f32) -> Self {
        self.material.friction = friction;
        self
    }

    pub fn bounciness(mut self, bounciness: f32) -> Self {
        self.material.bounciness = bounciness;
        self
    }

    pub fn dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    pub fn solid(mut self, solid: bool) -> Self {
        self.solid = solid;
        self
    }

    pub fn gravity_scale(mut self, gravity_scale: Vec2) -> Self {
        self.gravity_scale = gravity_scale;
        self
    }

    pub fn collision_mask(mut self, mask: u32) -> Self {
        self.collision_mask = mask;
        self
    }

    pub fn inherited(mut self, inherited: InheritedTransform) -> Self {
        self.inherited = inherited;
        self
    }

    pub fn user_data(mut self, user_data: u64) -> Self {
        self.user_data = user_data;
        self
    }

    pub fn build(self) -> Result<PhysicsBody> {
        self.shape.validate()?;
        let transform = WorldTransform::resolve(&self.inherited, self.position, self.rotation);
        let world_shape = self.shape.compute_absolute(&transform)?;

        let mut body = PhysicsBody {
            velocity: self.velocity,
            angular_velocity: self.angular_velocity,
            material: self.material,
            solid: self.solid,
            gravity_scale: self.gravity_scale,
            collision_mask: self.collision_mask,
            total_position_correction: Vec2::ZERO,
            user_data: self.user_data,
            physics_id: 0,
            position: self.position,
            rotation: self.rotation,
            inherited: self.inherited,
            mass: 1.0,
            inverse_mass: 1.0,
            inverse_moment_of_inertia: 0.0,
            dynamic: self.dynamic,
            shape: self.shape,
            world_shape,
            shape_dirty: false,
        };
        body.set_mass(self.mass)?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn static_bodies_have_zero_inverse_mass() {
        let body = PhysicsBody::builder(Shape::rectangle(10.0, 10.0))
            .mass(5.0)
            .dynamic(false)
            .build()
            .unwrap();
        assert_eq!(body.inverse_mass(), 0.0);
        assert_eq!(body.inverse_moment_of_inertia(), 0.0);
    }

    #[test]
    fn mass_drives_inverse_mass_and_inertia() {
        let body = PhysicsBody::builder(Shape::circle(2.0))
            .mass(4.0)
            .build()
            .unwrap();
        assert_relative_eq!(body.inverse_mass(), 0.25);
        // m r² / 2 = 8
        assert_relative_eq!(body.inverse_moment_of_inertia(), 0.125);
    }

    #[test]
    fn toggling_dynamic_restores_inverse_mass() {
        let mut body = PhysicsBody::builder(Shape::circle(1.0))
            .mass(2.0)
            .build()
            .unwrap();
        body.set_dynamic(false);
        assert_eq!(body.inverse_mass(), 0.0);
        body.set_dynamic(true);
        assert_relative_eq!(body.inverse_mass(), 0.5);
    }

    #[test]
    fn non_positive_mass_is_rejected() {
        let result = PhysicsBody::builder(Shape::circle(1.0)).mass(0.0).build();
        assert!(matches!(
            result,
            Err(PhysicsError::InvalidDimension { what: "mass", .. })
        ));
    }

    #[test]
    fn transform_setters_mark_the_shape_stale() {
        let mut body = PhysicsBody::new(Shape::rectangle(2.0, 2.0)).unwrap();
        assert!(!body.is_shape_dirty());

        body.set_rotation(0.5);
        assert!(body.is_shape_dirty());
        body.refresh_shape().unwrap();
        assert!(!body.is_shape_dirty());

        body.translate(Vec2::new(3.0, 0.0));
        body.refresh_shape().unwrap();
        assert_eq!(body.world_shape().center(), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn position_correction_is_applied_once() {
        let mut body = PhysicsBody::new(Shape::circle(1.0)).unwrap();
        body.total_position_correction = Vec2::new(0.5, -0.5);
        body.apply_position_correction();
        assert_eq!(body.position(), Vec2::new(0.5, -0.5));
        assert_eq!(body.total_position_correction, Vec2::ZERO);
    }
}
