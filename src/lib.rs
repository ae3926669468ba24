//! impulse2d – a 2D rigid-body collision and impulse-resolution core.
//!
//! Bodies carry a rectangle, circle, or convex polygon shape and are
//! registered with a [`PhysicsWorld`]. Each [`PhysicsWorld::tick`] integrates
//! dynamic bodies once and then runs fixed-period updates that test every
//! pair with the separating-axis theorem, resolve approaching contacts with
//! restitution and friction impulses, and report contact changes to a
//! [`CollisionListener`].
//!
//! ```no_run
//! use impulse2d::{PhysicsBody, PhysicsWorld, Shape};
//! use glam::Vec2;
//!
//! let mut world = PhysicsWorld::new(1.0 / 60.0)?;
//! let ground = PhysicsBody::builder(Shape::rectangle(100.0, 10.0))
//!     .dynamic(false)
//!     .build()?;
//! let ball = PhysicsBody::builder(Shape::circle(5.0))
//!     .position(Vec2::new(0.0, -40.0))
//!     .build()?;
//! world.register(ground)?;
//! let ball = world.register(ball)?;
//! world.tick(1.0 / 60.0)?;
//! println!("{:?}", world.body(ball).map(|b| b.position()));
//! # Ok::<(), impulse2d::PhysicsError>(())
//! ```

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod utils;
pub mod world;

pub use glam::Vec2;

pub use collision::{
    contact::{Contact, ContactInfo},
    pair_cache::PairCache,
};
pub use config::{CorrectionMode, WorldConfig};
pub use core::{
    body::{BodyBuilder, PhysicsBody},
    shape::{Shape, ShapeKind, WorldShape},
    types::{InheritedTransform, Material, WorldTransform},
};
pub use error::{PhysicsError, Result};
pub use utils::{allocator::BodyHandle, id_pool::IdPool, profiling::StepProfiler};
pub use world::{CollisionEvent, CollisionListener, EventRecorder, PhysicsWorld};
