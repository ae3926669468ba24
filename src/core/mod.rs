//! Core types describing physics bodies, their shapes, and shared data.

pub mod body;
pub mod shape;
pub mod types;

pub use body::{BodyBuilder, PhysicsBody};
pub use shape::{Shape, ShapeKind, WorldShape};
pub use types::{InheritedTransform, Material, WorldTransform};
