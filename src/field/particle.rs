//! Particle state and randomized generation.

use rand::Rng;
use std::ops::Range;

use crate::core::Id;
use crate::math::{consts, Color, Vector3};

/// Simulation boundary: a particle whose position magnitude exceeds this on an
/// axis has its velocity reflected on that axis.
pub const BOUNDS: f32 = 15.0;

/// Rendering opacity shared by every particle.
pub const OPACITY: f32 = 0.7;

/// Sampling range for box extents.
pub const DIMENSION_RANGE: Range<f32> = 0.1..0.6;
/// Sampling range for red and green tint components.
pub const TINT_RG_RANGE: Range<f32> = 0.5..1.0;
/// Sampling range for the blue tint component.
pub const TINT_B_RANGE: Range<f32> = 0.9..1.0;
/// Sampling range for initial position components.
pub const POSITION_RANGE: Range<f32> = -5.0..5.0;
/// Sampling range for initial orientation angles.
pub const ORIENTATION_RANGE: Range<f32> = 0.0..consts::PI;
/// Sampling range for rotation velocity components.
pub const ROTATION_VELOCITY_RANGE: Range<f32> = -0.005..0.005;
/// Sampling range for linear velocity components.
pub const LINEAR_VELOCITY_RANGE: Range<f32> = -0.0025..0.0025;

/// One drifting wireframe box.
///
/// Owned exclusively by the [`ParticleField`](super::ParticleField); ordering
/// within the field is creation order and carries no meaning.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Unique identifier.
    id: Id,
    /// Box extents along each axis.
    pub dimensions: Vector3,
    /// Tint color (cosmetic).
    pub color: Color,
    /// Position in world space.
    pub position: Vector3,
    /// Euler XYZ orientation in radians. Never normalized; wraparound is
    /// tolerated, not corrected.
    pub orientation: Vector3,
    /// Orientation change per tick.
    pub rotation_velocity: Vector3,
    /// Position change per tick.
    pub linear_velocity: Vector3,
    /// Local-space wireframe edge list (line-list pairs), built once at
    /// generation. This is the particle's drawable resource.
    edges: Vec<Vector3>,
}

impl Particle {
    /// Sample a new particle from the given generator.
    pub fn sample(rng: &mut impl Rng) -> Self {
        let dimensions = sample_vec(rng, DIMENSION_RANGE);
        let color = Color::new(
            rng.gen_range(TINT_RG_RANGE),
            rng.gen_range(TINT_RG_RANGE),
            rng.gen_range(TINT_B_RANGE),
        );

        Self {
            id: Id::new(),
            dimensions,
            color,
            position: sample_vec(rng, POSITION_RANGE),
            orientation: sample_vec(rng, ORIENTATION_RANGE),
            rotation_velocity: sample_vec(rng, ROTATION_VELOCITY_RANGE),
            linear_velocity: sample_vec(rng, LINEAR_VELOCITY_RANGE),
            edges: wireframe_edges(&dimensions),
        }
    }

    /// Get the unique ID.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Local-space wireframe edge vertices, as line-list pairs.
    #[inline]
    pub fn edges(&self) -> &[Vector3] {
        &self.edges
    }

    /// Advance one tick: rotate, translate, then reflect velocity on any axis
    /// whose position magnitude left the bounds.
    ///
    /// The bounds check runs after the position update, so a particle may
    /// overshoot by up to one velocity step before its velocity flips on the
    /// next tick. This is an approximate elastic bounce, not a clamp.
    pub(crate) fn advance(&mut self) {
        self.orientation += self.rotation_velocity;
        self.position += self.linear_velocity;

        reflect_axis(self.position.x, &mut self.linear_velocity.x);
        reflect_axis(self.position.y, &mut self.linear_velocity.y);
        reflect_axis(self.position.z, &mut self.linear_velocity.z);
    }
}

/// Flip the velocity sign when the position has left the bounds on one axis.
#[inline]
fn reflect_axis(position: f32, velocity: &mut f32) {
    if position.abs() > BOUNDS {
        *velocity = -*velocity;
    }
}

/// Sample a vector with each component drawn independently from `range`.
fn sample_vec(rng: &mut impl Rng, range: Range<f32>) -> Vector3 {
    Vector3::new(
        rng.gen_range(range.clone()),
        rng.gen_range(range.clone()),
        rng.gen_range(range),
    )
}

/// Build the 12-edge wireframe of a box with the given extents, centered at
/// the origin, as 24 line-list vertices.
pub fn wireframe_edges(dimensions: &Vector3) -> Vec<Vector3> {
    let h = *dimensions * 0.5;

    // 8 corners
    let c000 = Vector3::new(-h.x, -h.y, -h.z);
    let c001 = Vector3::new(-h.x, -h.y, h.z);
    let c010 = Vector3::new(-h.x, h.y, -h.z);
    let c011 = Vector3::new(-h.x, h.y, h.z);
    let c100 = Vector3::new(h.x, -h.y, -h.z);
    let c101 = Vector3::new(h.x, -h.y, h.z);
    let c110 = Vector3::new(h.x, h.y, -h.z);
    let c111 = Vector3::new(h.x, h.y, h.z);

    vec![
        // Bottom face
        c000, c100, c100, c101, c101, c001, c001, c000,
        // Top face
        c010, c110, c110, c111, c111, c011, c011, c010,
        // Vertical edges
        c000, c010, c100, c110, c101, c111, c001, c011,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_wireframe_edge_count() {
        let edges = wireframe_edges(&Vector3::ONE);
        assert_eq!(edges.len(), 24);
    }

    #[test]
    fn test_wireframe_edges_span_extents() {
        let dims = Vector3::new(0.2, 0.4, 0.6);
        for v in wireframe_edges(&dims) {
            assert!(v.abs().x <= 0.1 + 1e-6);
            assert!(v.abs().y <= 0.2 + 1e-6);
            assert!(v.abs().z <= 0.3 + 1e-6);
        }
    }

    #[test]
    fn test_sampled_particle_has_edges() {
        let mut rng = StdRng::seed_from_u64(7);
        let particle = Particle::sample(&mut rng);
        assert_eq!(particle.edges().len(), 24);
    }
}
