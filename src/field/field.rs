//! The particle field: generation, per-tick advancement, disposal.

use rand::Rng;

use super::Particle;

/// Particle count used by the default run.
pub const DEFAULT_COUNT: usize = 50;

/// Owns the set of drifting particles and advances their state each tick.
#[derive(Debug, Default)]
pub struct ParticleField {
    /// Live particles in creation order.
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Create an empty field.
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
        }
    }

    /// Populate the field with `count` independently sampled particles,
    /// replacing any existing ones.
    pub fn generate(&mut self, count: usize, rng: &mut impl Rng) {
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(Particle::sample(rng));
        }
        log::debug!("generated {} particles", count);
    }

    /// Advance every particle by one tick: rotate, translate, reflect.
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.advance();
        }
    }

    /// Release per-particle drawable resources and clear the collection.
    /// Safe to call when already empty.
    pub fn dispose(&mut self) {
        if !self.particles.is_empty() {
            log::debug!("disposing {} particles", self.particles.len());
        }
        self.particles.clear();
    }

    /// The live particles, in creation order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the field holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::super::particle::{
        BOUNDS, DIMENSION_RANGE, LINEAR_VELOCITY_RANGE, ORIENTATION_RANGE, POSITION_RANGE,
        ROTATION_VELOCITY_RANGE, TINT_B_RANGE, TINT_RG_RANGE,
    };
    use super::*;
    use crate::math::Vector3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::ops::Range;

    fn in_range(v: f32, range: &Range<f32>) -> bool {
        range.start <= v && v < range.end
    }

    fn components_in_range(v: &Vector3, range: &Range<f32>) -> bool {
        in_range(v.x, range) && in_range(v.y, range) && in_range(v.z, range)
    }

    #[test]
    fn test_generated_attributes_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut field = ParticleField::new();
        field.generate(200, &mut rng);
        assert_eq!(field.len(), 200);

        for p in field.particles() {
            assert!(components_in_range(&p.dimensions, &DIMENSION_RANGE));
            assert!(in_range(p.color.r, &TINT_RG_RANGE));
            assert!(in_range(p.color.g, &TINT_RG_RANGE));
            assert!(in_range(p.color.b, &TINT_B_RANGE));
            assert!(components_in_range(&p.position, &POSITION_RANGE));
            assert!(components_in_range(&p.orientation, &ORIENTATION_RANGE));
            assert!(components_in_range(&p.rotation_velocity, &ROTATION_VELOCITY_RANGE));
            assert!(components_in_range(&p.linear_velocity, &LINEAR_VELOCITY_RANGE));
        }
    }

    #[test]
    fn test_generate_zero_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = ParticleField::new();
        field.generate(0, &mut rng);
        assert!(field.is_empty());
    }

    #[test]
    fn test_positions_stay_inside_reflection_envelope() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = ParticleField::new();
        field.generate(50, &mut rng);

        for _ in 0..1000 {
            field.update();
        }

        for p in field.particles() {
            assert!(p.position.x.abs() <= BOUNDS + p.linear_velocity.x.abs());
            assert!(p.position.y.abs() <= BOUNDS + p.linear_velocity.y.abs());
            assert!(p.position.z.abs() <= BOUNDS + p.linear_velocity.z.abs());
            // End-to-end bound from the stated velocity ranges.
            assert!(p.position.abs().max_component() <= 16.0);
        }
    }

    #[test]
    fn test_reflection_flips_velocity_exactly_once_per_crossing() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut field = ParticleField::new();
        field.generate(1, &mut rng);

        // Place the particle just inside the boundary, heading out fast enough
        // to cross on the next tick.
        {
            let p = &mut field.particles[0];
            p.position = Vector3::new(14.999, 0.0, 0.0);
            p.linear_velocity = Vector3::new(0.002, 0.0, 0.0);
            p.rotation_velocity = Vector3::ZERO;
        }

        field.update();
        let p = &field.particles[0];
        assert!(p.position.x > BOUNDS);
        assert_eq!(p.linear_velocity.x, -0.002);

        // Inbound again: no further flip while returning.
        field.update();
        let p = &field.particles[0];
        assert!(p.position.x <= BOUNDS);
        assert_eq!(p.linear_velocity.x, -0.002);

        field.update();
        assert_eq!(field.particles[0].linear_velocity.x, -0.002);
    }

    #[test]
    fn test_orientation_accumulates_without_normalization() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut field = ParticleField::new();
        field.generate(1, &mut rng);

        {
            let p = &mut field.particles[0];
            p.orientation = Vector3::ZERO;
            p.rotation_velocity = Vector3::splat(0.005);
        }

        for _ in 0..10_000 {
            field.update();
        }

        // 50 radians: far past 2π and deliberately left unwrapped.
        let p = &field.particles[0];
        assert!((p.orientation.x - 50.0).abs() < 0.1);
    }

    #[test]
    fn test_dispose_clears_and_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut field = ParticleField::new();
        field.generate(10, &mut rng);

        field.dispose();
        assert!(field.is_empty());
        field.dispose();
        assert!(field.is_empty());
        field.update(); // no particles, still safe
    }
}
