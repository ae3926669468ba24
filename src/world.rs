pub mod events;
pub mod registry;

use glam::Vec2;
use log::{debug, trace};

use crate::{
    collision::{
        contact::{Contact, ContactInfo},
        narrowphase,
        pair_cache::{pair_index, PairCache},
    },
    config::{CorrectionMode, WorldConfig},
    core::body::PhysicsBody,
    dynamics::{integrator::Integrator, solver::ContactSolver},
    error::{PhysicsError, Result},
    utils::{
        allocator::BodyHandle,
        logging::{warn_if_accumulator_clamped, ScopedTimer},
        profiling::{self, StepProfiler},
    },
};

pub use events::{CollisionEvent, CollisionListener, EventRecorder};
pub use registry::BodyRegistry;

/// Central simulation container: owns the bodies, the per-pass pair cache,
/// and the fixed-timestep accumulator.
///
/// Every update enumerates all ordered pairs of live bodies in registration
/// order; the pair cache reduces that to one narrow-phase test per
/// unordered pair.
pub struct PhysicsWorld {
    config: WorldConfig,
    registry: BodyRegistry,
    pair_cache: PairCache,
    touching: PairCache,
    integrator: Integrator,
    solver: ContactSolver,
    time_accumulator: f32,
    listener: Option<Box<dyn CollisionListener>>,
    profiler: StepProfiler,
    parallel_enabled: bool,
}

impl PhysicsWorld {
    /// Creates a world with default settings and the given step period.
    pub fn new(time_step: f32) -> Result<Self> {
        Self::with_config(WorldConfig::default().with_time_step(time_step))
    }

    /// Creates a world from `config`, sizing the pair caches from
    /// `config.max_bodies`.
    pub fn with_config(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: WorldConfig) -> Self {
        debug!(
            "physics world: {} body slots, step {:.4}s, gravity {:?}",
            config.max_bodies, config.time_step, config.gravity
        );
        Self {
            registry: BodyRegistry::new(config.max_bodies),
            pair_cache: PairCache::for_ids(config.max_bodies),
            touching: PairCache::for_ids(config.max_bodies),
            integrator: Integrator::new(),
            solver: ContactSolver::from_config(&config),
            time_accumulator: 0.0,
            listener: None,
            profiler: StepProfiler::default(),
            parallel_enabled: false,
            config,
        }
    }

    /// Drops all bodies, ids, and cached pair state. Configuration and the
    /// installed listener survive.
    pub fn reset(&mut self) {
        debug!("physics world reset: dropping {} bodies", self.registry.len());
        self.registry.clear();
        self.pair_cache = PairCache::for_ids(self.config.max_bodies);
        self.touching = PairCache::for_ids(self.config.max_bodies);
        self.time_accumulator = 0.0;
        self.profiler.reset();
    }

    /// Consumes the world, handing back the remaining bodies in registration
    /// order.
    pub fn teardown(mut self) -> Vec<PhysicsBody> {
        let bodies = self.registry.drain();
        debug!("physics world torn down with {} bodies", bodies.len());
        bodies
    }

    pub fn register(&mut self, body: PhysicsBody) -> Result<BodyHandle> {
        self.registry.register(body)
    }

    /// Removes a body. Its touching pairs are forgotten without firing
    /// `on_separate`.
    pub fn unregister(&mut self, handle: BodyHandle) -> Result<PhysicsBody> {
        let body = self.registry.unregister(handle)?;
        for (_, other) in self.registry.iter() {
            self.touching
                .unset(pair_index(body.physics_id(), other.physics_id()));
        }
        Ok(body)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&PhysicsBody> {
        self.registry.get(handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut PhysicsBody> {
        self.registry.get_mut(handle)
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.registry.contains(handle)
    }

    /// Live handles in registration order.
    pub fn handles(&self) -> &[BodyHandle] {
        self.registry.handles()
    }

    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(BodyHandle, &PhysicsBody),
    {
        self.registry.for_each(f);
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    pub fn time_step(&self) -> f32 {
        self.config.time_step
    }

    pub fn set_time_step(&mut self, time_step: f32) -> Result<()> {
        if !(time_step > 0.0 && time_step.is_finite()) {
            return Err(PhysicsError::InvalidTimeStep(time_step));
        }
        self.config.time_step = time_step;
        Ok(())
    }

    pub fn trailing_update(&self) -> bool {
        self.config.trailing_update
    }

    pub fn set_trailing_update(&mut self, enabled: bool) {
        self.config.trailing_update = enabled;
    }

    pub fn correction_mode(&self) -> CorrectionMode {
        self.config.correction_mode
    }

    pub fn set_correction_mode(&mut self, mode: CorrectionMode) {
        self.config.correction_mode = mode;
        self.solver.mode = mode;
    }

    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.parallel_enabled = enabled;
        self.integrator.set_parallel(enabled);
    }

    pub fn parallel_enabled(&self) -> bool {
        self.parallel_enabled
    }

    pub fn set_listener<L>(&mut self, listener: L)
    where
        L: CollisionListener + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn take_listener(&mut self) -> Option<Box<dyn CollisionListener>> {
        self.listener.take()
    }

    pub fn profiler(&self) -> &StepProfiler {
        &self.profiler
    }

    pub fn reset_profiler(&mut self) {
        self.profiler.reset();
    }

    /// Unconsumed wall-clock time carried into the next tick.
    pub fn time_accumulator(&self) -> f32 {
        self.time_accumulator
    }

    /// Whether the pair was left touching by the last update that tested it.
    pub fn is_touching(&self, a: BodyHandle, b: BodyHandle) -> bool {
        match (self.registry.get(a), self.registry.get(b)) {
            (Some(body_a), Some(body_b)) if a != b => self
                .touching
                .get(pair_index(body_a.physics_id(), body_b.physics_id())),
            _ => false,
        }
    }

    /// Runs the narrow phase on two bodies' cached shapes without resolving.
    pub fn contact_between(&self, a: BodyHandle, b: BodyHandle) -> Option<Contact> {
        if a == b {
            return None;
        }
        let body_a = self.registry.get(a)?;
        let body_b = self.registry.get(b)?;
        narrowphase::collide(body_a.world_shape(), body_b.world_shape())
            .map(|contact| contact.with_velocities(body_a.velocity, body_b.velocity))
    }

    /// Advances the simulation by `dt` seconds of wall-clock time.
    ///
    /// Integrates once, then runs fixed updates while the accumulator holds
    /// more than one step, plus a trailing update when enabled.
    pub fn tick(&mut self, dt: f32) -> Result<()> {
        if !(dt >= 0.0 && dt.is_finite()) {
            return Err(PhysicsError::InvalidTimeStep(dt));
        }
        self.profiler.ticks += 1;

        {
            let _trace = ScopedTimer::new("physics::integrate");
            let _timer = profiling::ScopedTimer::new(&mut self.profiler.integration_time);
            self.integrator
                .step(self.registry.bodies_mut(), self.config.gravity)?;
        }

        let step = self.config.time_step;
        let limit = self.config.max_accumulated_time;
        self.time_accumulator += dt;
        warn_if_accumulator_clamped(self.time_accumulator, limit, step);
        self.time_accumulator = self.time_accumulator.min(limit);

        while self.time_accumulator > step {
            self.update(step)?;
            self.time_accumulator -= step;
        }
        if self.config.trailing_update {
            self.update(step)?;
        }
        Ok(())
    }

    /// One collision pass over every pair of live bodies.
    pub fn update(&mut self, step: f32) -> Result<()> {
        let _trace = ScopedTimer::new("physics::update");
        self.profiler.updates += 1;

        self.registry.refresh_dirty_shapes()?;
        self.pair_cache.erase();

        let tested_before = self.profiler.pairs_tested;
        let resolved_before = self.profiler.contacts_resolved;

        let handles = self.registry.handles().to_vec();
        for &a in &handles {
            for &b in &handles {
                if a != b {
                    self.process_pair(a, b);
                }
            }
        }

        trace!(
            "update ({step:.4}s): {} bodies, {} pairs tested, {} resolved",
            handles.len(),
            self.profiler.pairs_tested - tested_before,
            self.profiler.contacts_resolved - resolved_before
        );
        Ok(())
    }

    fn process_pair(&mut self, a: BodyHandle, b: BodyHandle) {
        let (Some(body_a), Some(body_b)) = (self.registry.get(a), self.registry.get(b)) else {
            return;
        };
        let (id_a, id_b) = (body_a.physics_id(), body_b.physics_id());
        if self.pair_cache.checked_before(id_a, id_b) {
            return;
        }
        self.profiler.pairs_tested += 1;

        let contact = if body_a.collision_mask & body_b.collision_mask != 0 {
            let _timer = profiling::ScopedTimer::new(&mut self.profiler.narrow_phase_time);
            narrowphase::collide(body_a.world_shape(), body_b.world_shape())
        } else {
            None
        };

        let pair = pair_index(id_a, id_b);
        let Some(contact) = contact else {
            if self.touching.get(pair) {
                self.touching.unset(pair);
                self.notify_separate(a, b);
            }
            return;
        };
        self.profiler.overlaps += 1;

        let Some((body_a, body_b)) = self.registry.get2_mut(a, b) else {
            return;
        };

        if !body_a.is_dynamic() {
            body_a.velocity = Vec2::ZERO;
        }
        if !body_b.is_dynamic() {
            body_b.velocity = Vec2::ZERO;
        }
        if !body_a.is_dynamic() && !body_b.is_dynamic() {
            return;
        }

        let contact = contact.with_velocities(body_a.velocity, body_b.velocity);
        if contact.is_separating() {
            return;
        }

        if body_a.solid && body_b.solid {
            let resolved = {
                let _timer = profiling::ScopedTimer::new(&mut self.profiler.resolution_time);
                self.solver.resolve(body_a, body_b, &contact)
            };
            if resolved.is_some() {
                self.profiler.contacts_resolved += 1;
            }
        }

        self.touching.set(pair);
        self.notify_collide(a, b, &contact);
    }

    fn notify_collide(&mut self, a: BodyHandle, b: BodyHandle, contact: &Contact) {
        let Some(listener) = self.listener.as_mut() else {
            return;
        };
        let info = |partner| ContactInfo {
            partner,
            point: contact.point,
            normal: contact.normal,
        };
        listener.on_collide(a, &info(b));
        listener.on_collide(b, &info(a));
        self.profiler.callbacks_fired += 2;
    }

    fn notify_separate(&mut self, a: BodyHandle, b: BodyHandle) {
        let Some(listener) = self.listener.as_mut() else {
            return;
        };
        listener.on_separate(a, b);
        listener.on_separate(b, a);
        self.profiler.callbacks_fired += 2;
    }
}
