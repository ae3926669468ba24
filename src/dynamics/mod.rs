//! Simulation dynamics: integration, impulse resolution, and friction.

pub mod friction;
pub mod integrator;
pub mod solver;

pub use friction::{apply_friction, friction_impulse};
pub use integrator::Integrator;
pub use solver::{ContactSolver, ResolvedImpulse};
