//! Error types for the physics core.
//!
//! Only configuration problems surface as errors. Numeric degeneracies such as
//! coincident circle centers or zero tangential velocity are handled in place
//! with fixed fallbacks.

use thiserror::Error;

use crate::utils::allocator::BodyHandle;

/// Main error type for the physics core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// More bodies are live than the id pool was sized for.
    #[error("physics id pool exhausted: at most {max} bodies may be registered")]
    IdPoolExhausted { max: usize },
    /// The requested body capacity exceeds the dense id range.
    #[error("body capacity {requested} exceeds PHYSICS_ID_MAX ({max})")]
    CapacityTooLarge { requested: usize, max: usize },
    /// Fixed step periods must be strictly positive.
    #[error("time step must be positive, got {0}")]
    InvalidTimeStep(f32),
    /// A convex polygon needs at least three vertices.
    #[error("convex polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },
    /// Two consecutive polygon vertices coincide.
    #[error("convex polygon edge {edge} has zero length")]
    DegenerateEdge { edge: usize },
    /// A shape dimension or mass is not a positive finite number.
    #[error("invalid {what}: {value}")]
    InvalidDimension { what: &'static str, value: f32 },
    /// A world tunable is out of its allowed range.
    #[error("invalid world setting {what}: {value}")]
    InvalidSetting { what: &'static str, value: f32 },
    /// The handle does not name a live body.
    #[error("unknown body handle {0:?}")]
    UnknownBody(BodyHandle),
}

/// Convenient Result type alias for physics operations.
pub type Result<T> = std::result::Result<T, PhysicsError>;
