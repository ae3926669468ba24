//! Utility helpers: handle arena, id pool, 2D math, logging, and profiling.

pub mod allocator;
pub mod id_pool;
pub mod logging;
pub mod math;
pub mod profiling;

pub use allocator::{Arena, BodyHandle};
pub use id_pool::IdPool;
pub use math::*;
pub use profiling::StepProfiler;
