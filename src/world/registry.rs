use log::debug;

use crate::{
    core::body::PhysicsBody,
    error::{PhysicsError, Result},
    utils::{
        allocator::{Arena, BodyHandle},
        id_pool::IdPool,
    },
};

/// Insertion-ordered set of live bodies, each holding a dense physics id.
pub struct BodyRegistry {
    bodies: Arena<PhysicsBody>,
    ids: IdPool,
}

impl BodyRegistry {
    pub fn new(max_bodies: usize) -> Self {
        Self {
            bodies: Arena::new(),
            ids: IdPool::new(max_bodies),
        }
    }

    /// Assigns a physics id and starts tracking `body`.
    pub fn register(&mut self, mut body: PhysicsBody) -> Result<BodyHandle> {
        body.physics_id = self.ids.take_id()?;
        let physics_id = body.physics_id;
        let handle = self.bodies.insert(body);
        debug!("registered body {handle:?} with physics id {physics_id}");
        Ok(handle)
    }

    /// Stops tracking the body and returns its id to the pool.
    pub fn unregister(&mut self, handle: BodyHandle) -> Result<PhysicsBody> {
        let body = self
            .bodies
            .remove(handle)
            .ok_or(PhysicsError::UnknownBody(handle))?;
        self.ids.give_back_id(body.physics_id);
        debug!(
            "unregistered body {handle:?}, physics id {} released",
            body.physics_id
        );
        Ok(body)
    }

    /// Live handles in registration order.
    pub fn handles(&self) -> &[BodyHandle] {
        self.bodies.handles()
    }

    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(BodyHandle, &PhysicsBody),
    {
        for (handle, body) in self.iter() {
            f(handle, body);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &PhysicsBody)> + '_ {
        self.bodies.iter()
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&PhysicsBody> {
        self.bodies.get(handle)
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut PhysicsBody> {
        self.bodies.get_mut(handle)
    }

    pub fn get2_mut(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Option<(&mut PhysicsBody, &mut PhysicsBody)> {
        self.bodies.get2_mut(a, b)
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut Arena<PhysicsBody> {
        &mut self.bodies
    }

    /// Recomputes world shapes of every body whose transform changed since
    /// its last refresh.
    pub fn refresh_dirty_shapes(&mut self) -> Result<()> {
        for body in self.bodies.values_mut() {
            if body.is_shape_dirty() {
                body.refresh_shape()?;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn id_capacity(&self) -> usize {
        self.ids.capacity()
    }

    /// Drops every body and recycles all ids.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.ids.reset();
    }

    /// Removes every body, returning them in registration order.
    pub fn drain(&mut self) -> Vec<PhysicsBody> {
        let drained = self.bodies.drain();
        self.ids.reset();
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shape::Shape;

    fn circle() -> PhysicsBody {
        PhysicsBody::new(Shape::circle(1.0)).unwrap()
    }

    #[test]
    fn iteration_follows_registration_order() {
        let mut registry = BodyRegistry::new(8);
        let a = registry.register(circle()).unwrap();
        let b = registry.register(circle()).unwrap();
        let c = registry.register(circle()).unwrap();
        registry.unregister(a).unwrap();
        let d = registry.register(circle()).unwrap();

        // `d` reuses `a`'s arena slot but is iterated last.
        assert_eq!(registry.handles(), &[b, c, d]);
        assert_eq!(d.index(), a.index());
    }

    #[test]
    fn released_ids_are_reused_smallest_first() {
        let mut registry = BodyRegistry::new(8);
        let handles: Vec<_> = (0..4).map(|_| registry.register(circle()).unwrap()).collect();
        registry.unregister(handles[2]).unwrap();
        registry.unregister(handles[1]).unwrap();

        let next = registry.register(circle()).unwrap();
        assert_eq!(registry.get(next).unwrap().physics_id(), 1);
    }

    #[test]
    fn stale_handles_are_rejected() {
        let mut registry = BodyRegistry::new(4);
        let handle = registry.register(circle()).unwrap();
        registry.unregister(handle).unwrap();

        assert!(registry.get(handle).is_none());
        assert_eq!(
            registry.unregister(handle).unwrap_err(),
            PhysicsError::UnknownBody(handle)
        );
    }

    #[test]
    fn registering_past_capacity_fails() {
        let mut registry = BodyRegistry::new(2);
        registry.register(circle()).unwrap();
        registry.register(circle()).unwrap();
        assert_eq!(
            registry.register(circle()).unwrap_err(),
            PhysicsError::IdPoolExhausted { max: 2 }
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn drain_returns_bodies_in_order_and_empties() {
        let mut registry = BodyRegistry::new(4);
        for user_data in 0..3 {
            let mut body = circle();
            body.user_data = user_data;
            registry.register(body).unwrap();
        }
        let drained: Vec<u64> = registry.drain().into_iter().map(|b| b.user_data).collect();
        assert_eq!(drained, vec![0, 1, 2]);
        assert!(registry.is_empty());
        assert!(registry.register(circle()).is_ok());
    }
}
