//! # Field Module
//!
//! The procedural particle field: randomized generation, per-tick state
//! evolution with boundary reflection, and resource disposal.

#[allow(clippy::module_inception)]
mod field;
mod particle;

pub use field::{ParticleField, DEFAULT_COUNT};
pub use particle::{wireframe_edges, Particle, BOUNDS, OPACITY};
