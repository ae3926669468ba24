//! Collision detection modules: pair cache, narrow-phase SAT, and contact points.

pub mod contact;
pub mod manifold;
pub mod narrowphase;
pub mod pair_cache;

pub use contact::{Contact, ContactInfo};
pub use narrowphase::{collide, PairTest, SatOutcome};
pub use pair_cache::{pair_index, triangular, PairCache};
